//! Configuration for sampling generators.

use crate::generator::NOMINAL_SIZE;
use crate::rng::Random;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid number of samples (must be > 0)
    InvalidSamples(usize),
    /// Invalid number of worker threads (must be > 0)
    InvalidThreads(usize),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidSamples(n) => {
                write!(f, "Invalid samples count: {} (must be > 0)", n)
            }
            ConfigError::InvalidThreads(n) => {
                write!(f, "Invalid thread count: {} (must be > 0)", n)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parameters for drawing values out of a generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    /// Size passed to every invocation
    pub size: usize,
    /// Seed for the root random stream; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Number of values to draw
    pub samples: usize,
    /// Worker threads used by parallel sampling
    pub threads: usize,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            size: NOMINAL_SIZE,
            seed: None,
            samples: 100,
            threads: num_cpus::get(),
        }
    }
}

impl GenConfig {
    /// Create a new configuration with validation
    pub fn new(
        size: usize,
        seed: Option<u64>,
        samples: usize,
        threads: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            size,
            seed,
            samples,
            threads,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration. A size of zero is allowed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples == 0 {
            return Err(ConfigError::InvalidSamples(self.samples));
        }
        if self.threads == 0 {
            return Err(ConfigError::InvalidThreads(self.threads));
        }
        Ok(())
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Root random stream for this configuration
    pub fn random(&self) -> Random {
        match self.seed {
            Some(seed) => Random::new(seed),
            None => Random::from_entropy(),
        }
    }
}

// Per-thread global configuration, `None` until set
thread_local! {
    static GLOBAL_CONFIG: std::cell::RefCell<Option<GenConfig>> = const { std::cell::RefCell::new(None) };
}

/// Get the current global configuration, falling back to the defaults
pub fn get_global_config() -> GenConfig {
    GLOBAL_CONFIG.with(|config| config.borrow().clone().unwrap_or_default())
}

/// Set the global configuration
pub fn set_global_config(config: GenConfig) -> Result<(), ConfigError> {
    config.validate()?;
    GLOBAL_CONFIG.with(|global| *global.borrow_mut() = Some(config));
    Ok(())
}

/// Drop any global configuration so that defaults apply again
pub fn reset_global_config() {
    GLOBAL_CONFIG.with(|global| *global.borrow_mut() = None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn test_defaults() {
        let config = GenConfig::default();
        assert_eq!(config.size, 100);
        assert_eq!(config.samples, 100);
        assert!(config.seed.is_none());
        assert!(config.threads >= 1);
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            GenConfig::new(10, None, 0, 1),
            Err(ConfigError::InvalidSamples(0))
        );
        assert_eq!(
            GenConfig::new(10, None, 5, 0),
            Err(ConfigError::InvalidThreads(0))
        );
        assert!(GenConfig::new(0, Some(1), 5, 1).is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let config = GenConfig::default()
            .with_size(7)
            .with_seed(99)
            .with_samples(3)
            .with_threads(2);
        assert_eq!(config.size, 7);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.samples, 3);
        assert_eq!(config.threads, 2);
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let config = GenConfig::default().with_seed(42);
        assert_eq!(config.random().next_u64(), config.random().next_u64());
    }

    #[test]
    fn test_thread_local_global_config() {
        reset_global_config();
        assert_eq!(get_global_config().samples, 100);

        let updated = GenConfig::default().with_samples(5).with_seed(555);
        set_global_config(updated).unwrap();
        assert_eq!(get_global_config().samples, 5);
        assert_eq!(get_global_config().seed, Some(555));

        let invalid = GenConfig::default().with_samples(0);
        assert_eq!(
            set_global_config(invalid),
            Err(ConfigError::InvalidSamples(0))
        );
        assert_eq!(get_global_config().samples, 5);

        reset_global_config();
        assert!(get_global_config().seed.is_none());
    }
}
