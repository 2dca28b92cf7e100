//! Runtime-tunable configuration for the scoring engine.
//!
//! The engine polls its `ConfigSource` on every computation, so a value
//! changed at runtime takes effect on the next call without restarts or
//! cache invalidation. Absent or misconfigured (non-positive) values fall
//! back to the documented defaults rather than failing.

use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Configuration key names understood by the engine.
pub mod keys {
    /// Whether the time-decay factor is applied (bool).
    pub const TIME_DECAY_ENABLED: &str = "scoring.time_decay.enabled";
    /// Upper bound for the time-decay multiplier (decimal).
    pub const TIME_DECAY_MAX_MULTIPLIER: &str = "scoring.time_decay.max_multiplier";
    /// Baseline for the business-value weight (decimal).
    pub const BUSINESS_VALUE_BASE_WEIGHT: &str = "scoring.business_value.base_weight";
    /// Whether the capacity adjustment is applied (bool).
    pub const CAPACITY_ADJUSTMENT_ENABLED: &str = "scoring.capacity_adjustment.enabled";
}

/// Fallback values used when a key is absent from the source.
pub mod defaults {
    /// Time decay is applied unless configured off.
    pub const TIME_DECAY_ENABLED: bool = true;
    /// Default cap for the time-decay multiplier.
    pub const TIME_DECAY_MAX_MULTIPLIER: f64 = 2.0;
    /// Default business-value baseline.
    pub const BUSINESS_VALUE_BASE_WEIGHT: f64 = 1.0;
    /// Capacity adjustment is applied unless configured off.
    pub const CAPACITY_ADJUSTMENT_ENABLED: bool = true;
}

/// Typed lookup of named runtime configuration values.
///
/// Implementations must reflect the current runtime-configured value on
/// every call; the engine never caches lookups across computations.
pub trait ConfigSource: Send + Sync {
    /// Fetch a boolean value, `None` if the key is absent.
    fn get_bool(&self, key: &str) -> Option<bool>;

    /// Fetch a decimal value, `None` if the key is absent.
    fn get_decimal(&self, key: &str) -> Option<f64>;
}

/// Typed configuration value held by [`InMemoryConfigSource`].
#[derive(Debug, Clone, Copy, PartialEq)]
enum ConfigValue {
    Bool(bool),
    Decimal(f64),
}

/// In-memory configuration source for testing and embedding.
///
/// Values are mutable at runtime; readers see the latest write on their
/// next lookup.
#[derive(Debug, Default)]
pub struct InMemoryConfigSource {
    values: RwLock<BTreeMap<String, ConfigValue>>,
}

impl InMemoryConfigSource {
    /// Create a new empty source (every lookup falls back to defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a boolean value.
    pub fn set_bool(&self, key: &str, value: bool) {
        self.values
            .write()
            .insert(key.to_string(), ConfigValue::Bool(value));
    }

    /// Set a decimal value.
    pub fn set_decimal(&self, key: &str, value: f64) {
        self.values
            .write()
            .insert(key.to_string(), ConfigValue::Decimal(value));
    }

    /// Remove a value, restoring the engine default for that key.
    pub fn unset(&self, key: &str) {
        self.values.write().remove(key);
    }
}

impl ConfigSource for InMemoryConfigSource {
    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.read().get(key) {
            Some(ConfigValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    fn get_decimal(&self, key: &str) -> Option<f64> {
        match self.values.read().get(key) {
            Some(ConfigValue::Decimal(v)) => Some(*v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_keys_return_none() {
        let source = InMemoryConfigSource::new();
        assert_eq!(source.get_bool(keys::TIME_DECAY_ENABLED), None);
        assert_eq!(source.get_decimal(keys::BUSINESS_VALUE_BASE_WEIGHT), None);
    }

    #[test]
    fn test_values_mutable_at_runtime() {
        let source = InMemoryConfigSource::new();

        source.set_bool(keys::TIME_DECAY_ENABLED, false);
        assert_eq!(source.get_bool(keys::TIME_DECAY_ENABLED), Some(false));

        source.set_bool(keys::TIME_DECAY_ENABLED, true);
        assert_eq!(source.get_bool(keys::TIME_DECAY_ENABLED), Some(true));

        source.unset(keys::TIME_DECAY_ENABLED);
        assert_eq!(source.get_bool(keys::TIME_DECAY_ENABLED), None);
    }

    #[test]
    fn test_type_mismatch_reads_as_absent() {
        let source = InMemoryConfigSource::new();
        source.set_decimal(keys::TIME_DECAY_ENABLED, 1.0);

        assert_eq!(source.get_bool(keys::TIME_DECAY_ENABLED), None);
    }
}
