use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::SmallRng;

use crate::engine::difficulty::DifficultyTracker;
use crate::engine::fact::Fact;
use crate::engine::queue::{self, TableSelectionError};
use crate::engine::stats::SessionStats;

/// Difficult repeats are spaced out by 2-3 ordinary problems, with the
/// exact gap redrawn every time a repeat is due.
const SPACING_MIN: u32 = 2;
const SPACING_MAX: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Active,
    /// Queue drained and every difficult fact retired.
    Mastered,
    /// Learner ended the session early.
    Stopped,
}

/// Result of scoring one answer against the fact that was posed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub fact: Fact,
    pub correct: bool,
    pub expected: u16,
}

/// One practice run over a chosen table set. Owns the shuffled problem
/// queue, the difficulty tracker, and the re-scheduling policy; every
/// operation runs to completion synchronously and the session is owned by
/// exactly one caller, so there is no interior locking anywhere.
#[derive(Debug)]
pub struct PracticeSession {
    tables: Vec<u8>,
    queue: VecDeque<Fact>,
    tracker: DifficultyTracker,
    stats: SessionStats,
    current: Option<Fact>,
    since_difficult: u32,
    phase: Phase,
    rng: SmallRng,
}

impl PracticeSession {
    /// Start a session over `tables` with `per_table` problems each. The
    /// selection is treated as a set (duplicates collapse) and validated
    /// against the 1-12 range. Lifetime totals are carried in so that
    /// [`SessionStats`] can keep both scopes in one place.
    ///
    /// The first problem is not drawn yet; call [`advance`](Self::advance).
    pub fn new(
        tables: &[u8],
        per_table: u8,
        lifetime: (u64, u64),
        mut rng: SmallRng,
    ) -> Result<Self, TableSelectionError> {
        let mut tables = tables.to_vec();
        tables.sort_unstable();
        tables.dedup();

        let queue = queue::build_queue(&tables, per_table, &mut rng)?;
        Ok(Self {
            tables,
            queue: queue.into(),
            tracker: DifficultyTracker::default(),
            stats: SessionStats::with_lifetime(lifetime.0, lifetime.1),
            current: None,
            since_difficult: 0,
            phase: Phase::Active,
            rng,
        })
    }

    /// Pick the next problem to pose:
    /// 1. a random difficult fact, once enough ordinary problems have gone
    ///    by since the last repeat (the fact stays tracked);
    /// 2. otherwise the front of the shuffled queue;
    /// 3. otherwise a random difficult fact until all are mastered;
    /// 4. otherwise nothing is left.
    fn select_next(&mut self) -> Option<Fact> {
        if !self.tracker.is_empty()
            && self.since_difficult >= self.rng.gen_range(SPACING_MIN..=SPACING_MAX)
        {
            self.since_difficult = 0;
            return self.tracker.pick(&mut self.rng);
        }
        if let Some(fact) = self.queue.pop_front() {
            self.since_difficult += 1;
            return Some(fact);
        }
        self.tracker.pick(&mut self.rng)
    }

    /// Move to the next problem. When nothing remains the session flips to
    /// `Mastered`, which is terminal.
    pub fn advance(&mut self) -> Phase {
        if self.phase != Phase::Active {
            return self.phase;
        }
        match self.select_next() {
            Some(fact) => self.current = Some(fact),
            None => {
                self.current = None;
                self.phase = Phase::Mastered;
            }
        }
        self.phase
    }

    /// Score `answer` against `fact` and apply all bookkeeping in one step:
    /// counters in both scopes, difficulty membership, and the mastery
    /// streak. Parsing happens before this call; by the time we are here
    /// the answer is a number.
    pub fn evaluate(&mut self, fact: Fact, answer: u32) -> Outcome {
        let expected = fact.product();
        let correct = answer == u32::from(expected);
        self.stats.record(correct);
        if correct {
            self.tracker.record_correct(fact);
        } else {
            self.tracker.record_miss(fact);
        }
        Outcome {
            fact,
            correct,
            expected,
        }
    }

    /// Learner-initiated stop. Terminal, like `Mastered`, but difficult
    /// facts may still remain and show up in the summary.
    pub fn stop(&mut self) {
        if self.phase == Phase::Active {
            self.phase = Phase::Stopped;
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<Fact> {
        self.current
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[allow(dead_code)] // Used by integration tests
    pub fn tables(&self) -> &[u8] {
        &self.tables
    }

    pub fn difficult_facts(&self) -> Vec<Fact> {
        self.tracker.facts()
    }

    pub fn difficult_count(&self) -> usize {
        self.tracker.len()
    }

    /// Unseen problems still waiting in the shuffled queue.
    pub fn remaining_new(&self) -> usize {
        self.queue.len()
    }
}
