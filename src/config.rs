//! Construction-time parameters of a `ChainedMap`.

use crate::error::ConfigError;
use core::num::NonZeroUsize;

/// Bucket count used by `ChainedMap::new` and `TableConfig::default`.
pub const DEFAULT_BUCKET_COUNT: usize = 10;

/// Table configuration. The bucket count is fixed for the lifetime of the
/// table built from it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TableConfig {
    bucket_count: NonZeroUsize,
}

impl TableConfig {
    /// Validate a raw bucket count.
    pub fn new(bucket_count: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(bucket_count)
            .map(Self::with_bucket_count)
            .ok_or(ConfigError::ZeroBuckets)
    }

    pub const fn with_bucket_count(bucket_count: NonZeroUsize) -> Self {
        Self { bucket_count }
    }

    #[inline]
    pub const fn bucket_count(&self) -> NonZeroUsize {
        self.bucket_count
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        match NonZeroUsize::new(DEFAULT_BUCKET_COUNT) {
            Some(n) => Self::with_bucket_count(n),
            None => unreachable!("DEFAULT_BUCKET_COUNT is non-zero"),
        }
    }
}
