//! Sizing configuration for [`Hashtable`](crate::Hashtable).

use super::{parse_env_bool, parse_env_var, Config};
use crate::error::{ChainTableError, Result};
use crate::hash_map::{DEFAULT_BUCKET_SIZE, DEFAULT_LOAD_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Construction parameters for a hashtable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashtableConfig {
    /// Number of slots allocated up front
    pub initial_capacity: usize,
    /// Growth threshold for `len / bucket_size`; growth happens on the first
    /// insertion of a new key after the ratio exceeds it
    pub load_limit: f32,
    /// Round `initial_capacity` up to the next prime at construction.
    /// Capacities chosen by growth are always prime.
    pub enforce_prime_capacity: bool,
}

impl Default for HashtableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_BUCKET_SIZE,
            load_limit: DEFAULT_LOAD_LIMIT,
            enforce_prime_capacity: false,
        }
    }
}

impl HashtableConfig {
    /// Config with the given capacity and the default load limit.
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            ..Self::default()
        }
    }

    /// Set the load limit.
    pub fn load_limit(mut self, load_limit: f32) -> Self {
        self.load_limit = load_limit;
        self
    }

    /// Enable or disable rounding the initial capacity to a prime.
    pub fn enforce_prime_capacity(mut self, enabled: bool) -> Self {
        self.enforce_prime_capacity = enabled;
        self
    }
}

impl Config for HashtableConfig {
    fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(ChainTableError::configuration(
                "initial_capacity must be at least 1",
            ));
        }
        if !self.load_limit.is_finite() || self.load_limit <= 0.0 {
            return Err(ChainTableError::configuration(format!(
                "load_limit must be a finite value greater than 0, got {}",
                self.load_limit
            )));
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.initial_capacity = parse_env_var(
            &format!("{}HASHTABLE_INITIAL_CAPACITY", prefix),
            config.initial_capacity,
        );
        config.load_limit =
            parse_env_var(&format!("{}HASHTABLE_LOAD_LIMIT", prefix), config.load_limit);
        config.enforce_prime_capacity = parse_env_bool(
            &format!("{}HASHTABLE_PRIME_CAPACITY", prefix),
            config.enforce_prime_capacity,
        );
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self {
            initial_capacity: 4099,
            load_limit: 0.5,
            enforce_prime_capacity: true,
        }
    }

    fn memory_preset() -> Self {
        Self {
            initial_capacity: 257,
            load_limit: 2.0,
            enforce_prime_capacity: true,
        }
    }

    fn realtime_preset() -> Self {
        Self {
            initial_capacity: 16381,
            load_limit: 0.75,
            enforce_prime_capacity: true,
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            ChainTableError::configuration(format!("Failed to serialize hashtable config: {}", e))
        })?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            ChainTableError::configuration(format!("Failed to parse hashtable config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}
