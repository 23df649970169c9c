//! Error types.

use std::collections::TryReserveError;

/// Which owned copy an insert was preparing when allocation failed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CopyTarget {
    Key,
    Value,
}

impl core::fmt::Display for CopyTarget {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            CopyTarget::Key => "key",
            CopyTarget::Value => "value",
        })
    }
}

/// Failure of `ChainedMap::insert`. The map is unchanged when this is
/// returned.
#[derive(Debug, thiserror::Error)]
pub enum InsertError {
    #[error("out of memory copying {target} ({len} bytes)")]
    OutOfMemory {
        target: CopyTarget,
        len: usize,
        #[source]
        source: TryReserveError,
    },
}

impl InsertError {
    pub fn is_out_of_memory(&self) -> bool {
        matches!(self, InsertError::OutOfMemory { .. })
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("bucket count must be at least 1")]
    ZeroBuckets,
}
