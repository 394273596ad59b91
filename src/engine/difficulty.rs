use std::collections::HashMap;

use rand::Rng;

use crate::engine::fact::Fact;

/// Consecutive correct answers needed to retire a difficult fact.
pub const MASTERY_STREAK: u32 = 3;

/// Tracks which facts the learner has missed this session. Membership in
/// `misses` is the definition of "difficult"; `streaks` counts consecutive
/// correct answers toward mastery and only matters while a fact is difficult.
#[derive(Clone, Debug, Default)]
pub struct DifficultyTracker {
    misses: HashMap<Fact, u32>,
    streaks: HashMap<Fact, u32>,
}

impl DifficultyTracker {
    pub fn record_miss(&mut self, fact: Fact) {
        *self.misses.entry(fact).or_insert(0) += 1;
        // Mastery must be re-earned from scratch after any miss.
        self.streaks.insert(fact, 0);
    }

    /// Returns true when this answer completed the mastery streak and the
    /// fact was retired.
    pub fn record_correct(&mut self, fact: Fact) -> bool {
        if self.misses.contains_key(&fact) {
            let streak = self.streaks.entry(fact).or_insert(0);
            *streak += 1;
            if *streak >= MASTERY_STREAK {
                self.misses.remove(&fact);
                self.streaks.remove(&fact);
                return true;
            }
        } else {
            // Not difficult: drop any stale streak left behind.
            self.streaks.remove(&fact);
        }
        false
    }

    #[allow(dead_code)]
    pub fn is_difficult(&self, fact: Fact) -> bool {
        self.misses.contains_key(&fact)
    }

    pub fn is_empty(&self) -> bool {
        self.misses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.misses.len()
    }

    /// Total misses, informational only; the selection policy never reads it.
    #[allow(dead_code)]
    pub fn miss_count(&self, fact: Fact) -> u32 {
        self.misses.get(&fact).copied().unwrap_or(0)
    }

    #[allow(dead_code)]
    pub fn streak(&self, fact: Fact) -> u32 {
        self.streaks.get(&fact).copied().unwrap_or(0)
    }

    /// Difficult facts in a stable order, for the end-of-session listing.
    pub fn facts(&self) -> Vec<Fact> {
        let mut facts: Vec<Fact> = self.misses.keys().copied().collect();
        facts.sort_unstable();
        facts
    }

    /// Uniformly random difficult fact, if any. The fact stays tracked.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Option<Fact> {
        if self.misses.is_empty() {
            return None;
        }
        let facts = self.facts();
        Some(facts[rng.gen_range(0..facts.len())])
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn test_miss_makes_fact_difficult() {
        let mut tracker = DifficultyTracker::default();
        let fact = Fact::new(3, 7);
        assert!(!tracker.is_difficult(fact));

        tracker.record_miss(fact);
        assert!(tracker.is_difficult(fact));
        assert_eq!(tracker.miss_count(fact), 1);

        tracker.record_miss(fact);
        assert_eq!(tracker.miss_count(fact), 2);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_three_straight_correct_retires_fact() {
        let mut tracker = DifficultyTracker::default();
        let fact = Fact::new(6, 8);
        tracker.record_miss(fact);

        assert!(!tracker.record_correct(fact));
        assert!(!tracker.record_correct(fact));
        assert!(tracker.record_correct(fact));

        assert!(!tracker.is_difficult(fact));
        assert!(tracker.is_empty());
        assert_eq!(tracker.streak(fact), 0);
    }

    #[test]
    fn test_miss_resets_streak() {
        let mut tracker = DifficultyTracker::default();
        let fact = Fact::new(4, 9);
        tracker.record_miss(fact);
        tracker.record_correct(fact);
        tracker.record_correct(fact);
        assert_eq!(tracker.streak(fact), 2);

        tracker.record_miss(fact);
        assert_eq!(tracker.streak(fact), 0);

        // Must re-earn all three.
        assert!(!tracker.record_correct(fact));
        assert!(!tracker.record_correct(fact));
        assert!(tracker.record_correct(fact));
    }

    #[test]
    fn test_correct_on_easy_fact_is_a_no_op() {
        let mut tracker = DifficultyTracker::default();
        let fact = Fact::new(2, 2);
        assert!(!tracker.record_correct(fact));
        assert!(tracker.is_empty());
        assert_eq!(tracker.streak(fact), 0);
    }

    #[test]
    fn test_pick_only_returns_tracked_facts() {
        let mut tracker = DifficultyTracker::default();
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(tracker.pick(&mut rng), None);

        tracker.record_miss(Fact::new(3, 7));
        tracker.record_miss(Fact::new(9, 7));
        for _ in 0..50 {
            let fact = tracker.pick(&mut rng).unwrap();
            assert!(tracker.is_difficult(fact));
        }
        // Picking never retires anything.
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_facts_listing_is_sorted() {
        let mut tracker = DifficultyTracker::default();
        tracker.record_miss(Fact::new(9, 7));
        tracker.record_miss(Fact::new(3, 7));
        tracker.record_miss(Fact::new(3, 4));
        assert_eq!(
            tracker.facts(),
            vec![Fact::new(3, 4), Fact::new(3, 7), Fact::new(9, 7)]
        );
    }
}
