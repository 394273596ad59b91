use crate::engine::fact::Fact;
use crate::engine::stats::SessionStats;
use crate::session::practice::{Phase, PracticeSession};

/// Snapshot of a finished session for the end screen. A mastered session
/// has no difficult facts left by definition; a stopped one lists whatever
/// the learner was still struggling with.
#[derive(Clone, Debug)]
pub struct SessionSummary {
    pub stats: SessionStats,
    pub mastered: bool,
    pub tricky: Vec<Fact>,
}

impl SessionSummary {
    pub fn from_session(session: &PracticeSession) -> Self {
        let mastered = session.phase() == Phase::Mastered;
        Self {
            stats: *session.stats(),
            mastered,
            tricky: if mastered {
                Vec::new()
            } else {
                session.difficult_facts()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn session(seed: u64) -> PracticeSession {
        PracticeSession::new(&[7], 12, (100, 20), SmallRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_stopped_session_lists_difficult_facts() {
        let mut s = session(1);
        s.advance();
        let fact = s.current().unwrap();
        s.evaluate(fact, 0);
        s.stop();

        let summary = SessionSummary::from_session(&s);
        assert!(!summary.mastered);
        assert_eq!(summary.tricky, vec![fact]);
        assert_eq!(summary.stats.session_incorrect, 1);
        assert_eq!(summary.stats.lifetime_incorrect, 21);
    }

    #[test]
    fn test_mastered_session_has_nothing_tricky() {
        let mut s = session(2);
        while s.advance() == Phase::Active {
            let fact = s.current().unwrap();
            s.evaluate(fact, u32::from(fact.product()));
        }

        let summary = SessionSummary::from_session(&s);
        assert!(summary.mastered);
        assert!(summary.tricky.is_empty());
        assert_eq!(summary.stats.session_correct, 12);
        assert_eq!(summary.stats.lifetime_correct, 112);
    }
}
