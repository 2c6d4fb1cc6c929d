use std::collections::hash_map::Entry;
use std::time::{Duration, Instant};

use blockinfo_shared::block::BlockDefinitionId;
use glam::Vec2;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::lines::{Line, StyledRun};

/// Entries not shown for this long are dropped by [`TextCache::purge_expired`].
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Clone, Debug, PartialEq)]
pub struct RichTextResult {
    pub runs: Vec<StyledRun>,
    pub size: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NotificationResult {
    /// Already padded to the widest line.
    pub lines: Vec<Line>,
}

/// Generated text of one block in one rendering mode.
#[derive(Clone, Debug, PartialEq)]
pub enum FormattedResult {
    Rich(RichTextResult),
    Notification(NotificationResult),
}

struct CacheEntry<T> {
    value: T,
    expires: Instant,
}

/// Per-mode text cache keyed by block definition.
pub struct TextCache<T> {
    entries: FxHashMap<BlockDefinitionId, CacheEntry<T>>,
    ttl: Duration,
}

impl<T> Default for TextCache<T> {
    fn default() -> Self {
        Self::new(CACHE_TTL)
    }
}

impl<T> TextCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: FxHashMap::default(),
            ttl,
        }
    }

    /// Cached value for `id`, pushing its expiry out since it is being shown again.
    pub fn get(&mut self, id: &BlockDefinitionId, now: Instant) -> Option<&T> {
        let entry = self.entries.get_mut(id)?;
        entry.expires = now + self.ttl;
        Some(&entry.value)
    }

    /// Inserts or replaces the whole entry.
    pub fn put(&mut self, id: BlockDefinitionId, value: T, now: Instant) -> &T {
        let fresh = CacheEntry {
            value,
            expires: now + self.ttl,
        };
        let entry = match self.entries.entry(id) {
            Entry::Occupied(mut slot) => {
                slot.insert(fresh);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(fresh),
        };
        &entry.value
    }

    pub fn invalidate(&mut self, id: &BlockDefinitionId) -> bool {
        self.entries.remove(id).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drops entries whose expiry has passed and returns how many were removed.
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires > now);
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!("purged {removed} expired text cache entries");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use blockinfo_shared::block::{BlockCategory, BlockDefinitionId};

    use super::TextCache;

    fn id(subtype: &str) -> BlockDefinitionId {
        BlockDefinitionId::new(BlockCategory::Thrust, subtype)
    }

    #[test]
    fn put_get_invalidate() {
        let base = Instant::now();
        let mut cache = TextCache::new(Duration::from_secs(10));

        cache.put(id("Small"), "small text".to_string(), base);
        assert_eq!(cache.get(&id("Small"), base).map(String::as_str), Some("small text"));
        assert!(cache.get(&id("Large"), base).is_none());

        assert!(cache.invalidate(&id("Small")));
        assert!(!cache.invalidate(&id("Small")));
        assert!(cache.is_empty());
    }

    #[test]
    fn put_replaces_whole_entry() {
        let base = Instant::now();
        let mut cache = TextCache::new(Duration::from_secs(10));
        cache.put(id("A"), 1, base);
        cache.put(id("A"), 2, base);
        assert_eq!(cache.get(&id("A"), base), Some(&2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn expiry_is_pushed_out_by_reads() {
        let base = Instant::now();
        let ttl = Duration::from_secs(10);
        let mut cache = TextCache::new(ttl);
        cache.put(id("Shown"), (), base);
        cache.put(id("Hidden"), (), base);

        let later = base + Duration::from_secs(8);
        assert!(cache.get(&id("Shown"), later).is_some());

        assert_eq!(cache.purge_expired(base + Duration::from_secs(12)), 1);
        assert_eq!(cache.len(), 1);

        assert!(cache.get(&id("Shown"), base + Duration::from_secs(15)).is_some());
        assert_eq!(cache.purge_expired(base + Duration::from_secs(24)), 0);
        assert!(cache.get(&id("Hidden"), base + Duration::from_secs(24)).is_none());
        assert_eq!(cache.purge_expired(base + Duration::from_secs(26)), 1);
        assert!(cache.is_empty());
    }
}
