use crate::error::InvalidArgument;

/// Number of buckets a table starts with when none is requested.
pub const DEFAULT_CAPACITY: usize = 8;

/// Load factor at or above which the next `set` doubles the bucket count.
pub const DEFAULT_LOAD_FACTOR_THRESHOLD: f64 = 0.6;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used by tables that don't name one.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used by tables that don't name one.
        pub type DefaultHashBuilder = std::hash::RandomState;
    } else {
        compile_error!("chain-hash needs either the `foldhash` or the `std` feature for a default hasher");
    }
}

/// Construction parameters for a [`HashTable`](crate::HashTable).
///
/// Both fields are checked by [`Config::validate`] before any storage is
/// allocated.
///
/// # Examples
///
/// ```rust
/// use chain_hash::Config;
///
/// let config = Config::new(16, 0.75);
/// assert!(config.validate().is_ok());
/// assert!(Config::new(0, 0.75).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Initial number of buckets. Must be at least one.
    pub capacity: usize,
    /// Growth trigger, in `(0, 1]`.
    pub load_factor_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR_THRESHOLD)
    }
}

impl Config {
    /// Creates a config from its two parameters without validating them.
    pub const fn new(capacity: usize, load_factor_threshold: f64) -> Self {
        Self {
            capacity,
            load_factor_threshold,
        }
    }

    /// Creates a config with the given capacity and the default threshold.
    pub const fn with_capacity(capacity: usize) -> Self {
        Self::new(capacity, DEFAULT_LOAD_FACTOR_THRESHOLD)
    }

    /// Checks that the capacity is positive and the threshold lies in
    /// `(0, 1]`. A NaN threshold is rejected.
    pub fn validate(&self) -> Result<(), InvalidArgument> {
        if self.capacity < 1 {
            return Err(InvalidArgument::ZeroCapacity);
        }

        let threshold = self.load_factor_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(InvalidArgument::LoadFactorThreshold(threshold));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = Config::default();
        assert_eq!(config.capacity, 8);
        assert_eq!(config.load_factor_threshold, 0.6);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_capacity() {
        assert_eq!(
            Config::new(0, 0.5).validate(),
            Err(InvalidArgument::ZeroCapacity)
        );
    }

    #[test]
    fn threshold_bounds() {
        assert_eq!(
            Config::new(1, 0.0).validate(),
            Err(InvalidArgument::LoadFactorThreshold(0.0))
        );
        assert_eq!(
            Config::new(1, 1.1).validate(),
            Err(InvalidArgument::LoadFactorThreshold(1.1))
        );
        assert_eq!(
            Config::new(1, -0.5).validate(),
            Err(InvalidArgument::LoadFactorThreshold(-0.5))
        );
        assert!(Config::new(1, f64::NAN).validate().is_err());
        assert_eq!(Config::new(1, 1.0).validate(), Ok(()));
        assert_eq!(Config::new(1, f64::MIN_POSITIVE).validate(), Ok(()));
    }

    #[test]
    fn capacity_is_checked_before_threshold() {
        assert_eq!(
            Config::new(0, 2.0).validate(),
            Err(InvalidArgument::ZeroCapacity)
        );
    }
}
