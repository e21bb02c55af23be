use crate::error::{JournalError, Result};

/// Configuration for the suggestion engine. All windows are exclusive
/// upper bounds in days.
#[derive(Debug, Clone)]
pub struct SuggestConfig {
    /// Prayer → grace window for an `answers` candidate. Default: 90.
    pub answer_window_days: i64,

    /// Within this gap an `answers` candidate is strong even without a
    /// keyword match. Default: 30.
    pub answer_strong_days: i64,

    /// Word → any window for a `fulfills` candidate. Default: 180.
    pub fulfill_window_days: i64,

    /// Scripture → any window, either direction, for an `illuminates`
    /// candidate. Default: 7.
    pub scripture_window_days: i64,

    /// Grace → earlier prayer window for a `flows_from` candidate.
    /// Default: 90.
    pub flows_window_days: i64,

    /// Within this gap a `flows_from` candidate is strong. Default: 30.
    pub flows_strong_days: i64,

    /// Prayer-subject tokens must be strictly longer than this to count
    /// as keywords. Default: 3.
    pub min_keyword_len: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            answer_window_days: 90,
            answer_strong_days: 30,
            fulfill_window_days: 180,
            scripture_window_days: 7,
            flows_window_days: 90,
            flows_strong_days: 30,
            min_keyword_len: 3,
        }
    }
}

impl SuggestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answer_window_days(mut self, days: i64) -> Self {
        self.answer_window_days = days;
        self
    }

    pub fn with_fulfill_window_days(mut self, days: i64) -> Self {
        self.fulfill_window_days = days;
        self
    }

    pub fn with_scripture_window_days(mut self, days: i64) -> Self {
        self.scripture_window_days = days;
        self
    }

    pub fn with_flows_window_days(mut self, days: i64) -> Self {
        self.flows_window_days = days;
        self
    }

    pub fn with_min_keyword_len(mut self, len: usize) -> Self {
        self.min_keyword_len = len;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, days) in [
            ("answer_window_days", self.answer_window_days),
            ("fulfill_window_days", self.fulfill_window_days),
            ("scripture_window_days", self.scripture_window_days),
            ("flows_window_days", self.flows_window_days),
        ] {
            if days <= 0 {
                return Err(JournalError::Validation(format!("{name} must be > 0")));
            }
        }

        if self.answer_strong_days > self.answer_window_days {
            return Err(JournalError::Validation(
                "answer_strong_days must be <= answer_window_days".into(),
            ));
        }

        if self.flows_strong_days > self.flows_window_days {
            return Err(JournalError::Validation(
                "flows_strong_days must be <= flows_window_days".into(),
            ));
        }

        Ok(())
    }
}
