//! Chain entries and fallible string copies.

use crate::error::{CopyTarget, InsertError};
use slotmap::DefaultKey;

/// One link of a bucket chain. Owns its key and value; `next` names the
/// following entry in the same arena, if any.
#[derive(Debug)]
pub(crate) struct Entry {
    pub(crate) key: String,
    pub(crate) value: String,
    pub(crate) next: Option<DefaultKey>,
}

impl Entry {
    /// Copy both strings. Nothing is returned unless both copies succeed.
    pub(crate) fn try_new(key: &str, value: &str) -> Result<Self, InsertError> {
        let key = try_copy(key, CopyTarget::Key)?;
        let value = try_copy(value, CopyTarget::Value)?;
        Ok(Self {
            key,
            value,
            next: None,
        })
    }
}

/// Owned copy of `s` that reports allocation failure instead of aborting.
pub(crate) fn try_copy(s: &str, target: CopyTarget) -> Result<String, InsertError> {
    let mut out = String::new();
    out.try_reserve_exact(s.len())
        .map_err(|source| InsertError::OutOfMemory {
            target,
            len: s.len(),
            source,
        })?;
    out.push_str(s);
    Ok(out)
}
