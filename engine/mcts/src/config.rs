//! Search configuration.

/// Configuration for a Monte Carlo Tree Search session.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of search rounds (one simulation each) to run per search.
    pub rounds: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { rounds: 800 }
    }
}

impl SearchConfig {
    /// Fast config for tests.
    pub fn for_testing() -> Self {
        Self { rounds: 50 }
    }

    /// Builder pattern: set the number of rounds.
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert_eq!(SearchConfig::default().rounds, 800);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SearchConfig::for_testing().with_rounds(200);
        assert_eq!(config.rounds, 200);
    }
}
