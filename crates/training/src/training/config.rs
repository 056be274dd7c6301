//! Training configuration.

use super::index::Selection;
use bpetrain_core::{Result, TrainerError, DEFAULT_END_OF_WORD};

/// Configuration for BPE training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingConfig {
    /// Maximum number of merges to perform
    pub num_merges: usize,
    /// Stop once the best pair weighs less than this
    pub min_frequency: u64,
    /// Marker appended to every word
    pub end_of_word: String,
    /// Best-pair selection strategy
    pub selection: Selection,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_merges: 30_000,
            min_frequency: 1,
            end_of_word: DEFAULT_END_OF_WORD.to_string(),
            selection: Selection::Heap,
        }
    }
}

impl TrainingConfig {
    /// Start building a configuration from the defaults.
    pub fn builder() -> TrainingConfigBuilder {
        TrainingConfigBuilder::default()
    }

    /// Create a default configuration with the given merge budget.
    pub fn with_merges(num_merges: usize) -> Self {
        Self {
            num_merges,
            ..Default::default()
        }
    }

    /// Check the configuration for values training cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.end_of_word.is_empty() {
            return Err(TrainerError::InvalidConfig(
                "end-of-word marker must not be empty".to_string(),
            ));
        }
        if self.end_of_word.chars().any(char::is_whitespace) {
            return Err(TrainerError::InvalidConfig(format!(
                "end-of-word marker {:?} must not contain whitespace",
                self.end_of_word
            )));
        }
        Ok(())
    }
}

/// Builder for [`TrainingConfig`].
#[derive(Debug, Clone, Default)]
pub struct TrainingConfigBuilder {
    config: TrainingConfig,
}

impl TrainingConfigBuilder {
    /// Set the merge budget.
    pub fn num_merges(mut self, num_merges: usize) -> Self {
        self.config.num_merges = num_merges;
        self
    }

    /// Set the minimum pair weight worth merging.
    pub fn min_frequency(mut self, min_frequency: u64) -> Self {
        self.config.min_frequency = min_frequency;
        self
    }

    /// Set the end-of-word marker.
    pub fn end_of_word(mut self, marker: impl Into<String>) -> Self {
        self.config.end_of_word = marker.into();
        self
    }

    /// Set the best-pair selection strategy.
    pub fn selection(mut self, selection: Selection) -> Self {
        self.config.selection = selection;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<TrainingConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrainingConfig::default();
        assert_eq!(config.num_merges, 30_000);
        assert_eq!(config.min_frequency, 1);
        assert_eq!(config.end_of_word, "§");
        assert_eq!(config.selection, Selection::Heap);
    }

    #[test]
    fn test_builder() {
        let config = TrainingConfig::builder()
            .num_merges(10)
            .min_frequency(3)
            .end_of_word("</w>")
            .selection(Selection::Scan)
            .build()
            .unwrap();

        assert_eq!(config.num_merges, 10);
        assert_eq!(config.min_frequency, 3);
        assert_eq!(config.end_of_word, "</w>");
        assert_eq!(config.selection, Selection::Scan);
    }

    #[test]
    fn test_invalid_marker() {
        assert!(matches!(
            TrainingConfig::builder().end_of_word("").build(),
            Err(TrainerError::InvalidConfig(_))
        ));
        assert!(matches!(
            TrainingConfig::builder().end_of_word("a b").build(),
            Err(TrainerError::InvalidConfig(_))
        ));
    }
}
