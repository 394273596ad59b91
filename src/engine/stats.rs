/// Running answer totals. Session counters start at zero for every new
/// session; lifetime counters are seeded from the stored profile and only
/// ever increase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub session_correct: u32,
    pub session_incorrect: u32,
    pub lifetime_correct: u64,
    pub lifetime_incorrect: u64,
}

impl SessionStats {
    pub fn with_lifetime(correct: u64, incorrect: u64) -> Self {
        Self {
            lifetime_correct: correct,
            lifetime_incorrect: incorrect,
            ..Self::default()
        }
    }

    pub fn record(&mut self, correct: bool) {
        if correct {
            self.session_correct += 1;
            self.lifetime_correct += 1;
        } else {
            self.session_incorrect += 1;
            self.lifetime_incorrect += 1;
        }
    }

    /// Whole-number session accuracy; None before any answer.
    pub fn session_percent(&self) -> Option<u32> {
        let total = self.session_correct + self.session_incorrect;
        if total == 0 {
            return None;
        }
        Some((f64::from(self.session_correct) / f64::from(total) * 100.0).round() as u32)
    }

    pub fn lifetime_percent(&self) -> Option<u32> {
        let total = self.lifetime_correct + self.lifetime_incorrect;
        if total == 0 {
            return None;
        }
        Some((self.lifetime_correct as f64 / total as f64 * 100.0).round() as u32)
    }
}
