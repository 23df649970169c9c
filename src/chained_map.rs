//! ChainedMap: fixed bucket array with singly linked chains in an arena.

use crate::config::TableConfig;
use crate::entry::{try_copy, Entry};
use crate::error::{ConfigError, CopyTarget, InsertError};
use crate::hash::{reduce, KeyHash, PolynomialHash};
use log::{debug, trace};
use slotmap::{DefaultKey, SlotMap};

/// Counts reported by `ChainedMap::destroy`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Teardown {
    pub buckets: usize,
    pub entries_released: usize,
    pub strings_released: usize,
}

pub struct ChainedMap<H = PolynomialHash> {
    hasher: H,
    config: TableConfig,
    heads: Vec<Option<DefaultKey>>,
    entries: SlotMap<DefaultKey, Entry>, // chain storage; links are arena keys
}

/// Where a key sits in its chain, or where it would be appended.
enum Slot {
    Occupied(DefaultKey),
    Vacant { tail: Option<DefaultKey> },
}

/// Walks one chain from a head link.
struct Chain<'a> {
    entries: &'a SlotMap<DefaultKey, Entry>,
    cur: Option<DefaultKey>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = (DefaultKey, &'a Entry);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cur?;
        let e = self.entries.get(k)?;
        self.cur = e.next;
        Some((k, e))
    }
}

impl ChainedMap {
    /// Table with `DEFAULT_BUCKET_COUNT` buckets and the polynomial hash.
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    pub fn with_config(config: TableConfig) -> Self {
        Self::with_config_and_hasher(config, PolynomialHash)
    }

    pub fn with_bucket_count(bucket_count: usize) -> Result<Self, ConfigError> {
        TableConfig::new(bucket_count).map(Self::with_config)
    }
}

impl Default for ChainedMap {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ChainedMap<H> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.heads.len()
    }

    pub fn config(&self) -> TableConfig {
        self.config
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Entries in bucket order, each chain from head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            entries: &self.entries,
            heads: self.heads.iter(),
            cur: None,
            remaining: self.entries.len(),
        }
    }
}

impl<H: KeyHash> ChainedMap<H> {
    pub fn with_config_and_hasher(config: TableConfig, hasher: H) -> Self {
        let n = config.bucket_count().get();
        debug!("creating chained map with {} buckets", n);
        Self {
            hasher,
            config,
            heads: vec![None; n],
            entries: SlotMap::with_key(),
        }
    }

    #[inline]
    fn bucket_of(&self, key: &str) -> usize {
        reduce(self.hasher.hash_key(key), self.config.bucket_count())
    }

    fn chain(&self, bucket: usize) -> Chain<'_> {
        Chain {
            entries: &self.entries,
            cur: self.heads.get(bucket).copied().flatten(),
        }
    }

    fn locate(&self, bucket: usize, key: &str) -> Slot {
        let mut tail = None;
        for (k, e) in self.chain(bucket) {
            if e.key == key {
                return Slot::Occupied(k);
            }
            tail = Some(k);
        }
        Slot::Vacant { tail }
    }

    /// Number of entries chained from `bucket`, or `None` if the index is
    /// out of range.
    pub fn chain_len(&self, bucket: usize) -> Option<usize> {
        if bucket >= self.heads.len() {
            return None;
        }
        Some(self.chain(bucket).count())
    }

    /// Insert or update `key`. Both strings are copied; the caller's buffers
    /// are not retained. On an existing key only the value is replaced and
    /// the previous value is released.
    ///
    /// On allocation failure the map is left exactly as it was.
    pub fn insert(&mut self, key: &str, value: &str) -> Result<(), InsertError> {
        let bucket = self.bucket_of(key);
        match self.locate(bucket, key) {
            Slot::Occupied(k) => {
                let value = try_copy(value, CopyTarget::Value)?;
                if let Some(e) = self.entries.get_mut(k) {
                    e.value = value;
                }
            }
            Slot::Vacant { tail } => {
                let entry = Entry::try_new(key, value)?;
                let k = self.entries.insert(entry);
                match tail.and_then(|t| self.entries.get_mut(t)) {
                    Some(last) => last.next = Some(k),
                    None => self.heads[bucket] = Some(k),
                }
                trace!("appended key of {} bytes to bucket {}", key.len(), bucket);
            }
        }
        Ok(())
    }

    /// Value stored for `key`. `None` means absent; a stored empty string
    /// is `Some("")`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.chain(self.bucket_of(key))
            .find(|(_, e)| e.key == key)
            .map(|(_, e)| e.value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Release every entry chain by chain, head to tail, then the bucket
    /// array. Consumes the map, so it cannot be used afterwards.
    pub fn destroy(self) -> Teardown {
        let ChainedMap {
            heads, mut entries, ..
        } = self;
        let mut report = Teardown {
            buckets: heads.len(),
            ..Teardown::default()
        };
        for &head in &heads {
            let mut cur = head;
            while let Some(k) = cur {
                let Some(Entry { key, value, next }) = entries.remove(k) else {
                    break;
                };
                cur = next;
                drop(key);
                drop(value);
                report.entries_released += 1;
                report.strings_released += 2;
            }
        }
        debug_assert!(entries.is_empty(), "entry not reachable from any bucket");
        drop(entries);
        drop(heads);
        debug!(
            "destroyed chained map: {} entries, {} strings across {} buckets",
            report.entries_released, report.strings_released, report.buckets
        );
        report
    }

    /// Structural invariants; panics on the first violation.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let mut seen = 0;
        for bucket in 0..self.heads.len() {
            let mut keys = std::collections::HashSet::new();
            for (_, e) in self.chain(bucket) {
                assert_eq!(self.bucket_of(&e.key), bucket, "entry in wrong bucket");
                assert!(keys.insert(e.key.as_str()), "duplicate key in chain");
                seen += 1;
            }
        }
        assert_eq!(seen, self.entries.len(), "unreachable entries in arena");
    }
}

impl<H> core::fmt::Debug for ChainedMap<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, H> IntoIterator for &'a ChainedMap<H> {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Iterator over `(key, value)` pairs of a `ChainedMap`.
pub struct Iter<'a> {
    entries: &'a SlotMap<DefaultKey, Entry>,
    heads: core::slice::Iter<'a, Option<DefaultKey>>,
    cur: Option<DefaultKey>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);
    fn next(&mut self) -> Option<Self::Item> {
        let entries = self.entries;
        loop {
            match self.cur.and_then(|k| entries.get(k)) {
                Some(e) => {
                    self.cur = e.next;
                    self.remaining = self.remaining.saturating_sub(1);
                    return Some((e.key.as_str(), e.value.as_str()));
                }
                None => self.cur = *self.heads.next()?,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
