//! Transposition cache for leaf evaluations.
//!
//! Direct-mapped: a fingerprint owns the slot `fingerprint % capacity`, and a
//! store always overwrites whatever lived there. A lookup only hits when the
//! stored tag equals the fingerprint, so a collision reads as a miss and the
//! caller simply recomputes.

#[derive(Debug, Clone, Copy)]
struct Entry {
    tag: u64,
    value: i32,
}

/// Hit and miss counters, reset together with the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
}

pub struct TransTable {
    entries: Vec<Option<Entry>>,
    stats: CacheStats,
}

impl TransTable {
    /// Create a table with `capacity` slots (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![None; capacity.max(1)],
            stats: CacheStats::default(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn slot(&self, fingerprint: u64) -> usize {
        (fingerprint % self.entries.len() as u64) as usize
    }

    /// Cached value for `fingerprint`, if the slot holds exactly that tag.
    pub fn lookup(&mut self, fingerprint: u64) -> Option<i32> {
        let idx = self.slot(fingerprint);
        match self.entries[idx] {
            Some(e) if e.tag == fingerprint => {
                self.stats.hits += 1;
                Some(e.value)
            }
            _ => {
                self.stats.misses += 1;
                None
            }
        }
    }

    pub fn store(&mut self, fingerprint: u64, value: i32) {
        let idx = self.slot(fingerprint);
        self.entries[idx] = Some(Entry {
            tag: fingerprint,
            value,
        });
        self.stats.stores += 1;
    }

    /// Invalidate every slot.
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.stats = CacheStats::default();
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_then_lookup() {
        let mut tt = TransTable::new(101);
        assert_eq!(tt.lookup(42), None);
        tt.store(42, -7000);
        assert_eq!(tt.lookup(42), Some(-7000));
        let stats = tt.stats();
        assert_eq!((stats.hits, stats.misses, stats.stores), (1, 1, 1));
    }

    #[test]
    fn test_collision_evicts() {
        let mut tt = TransTable::new(101);
        tt.store(5, 1);
        tt.store(5 + 101, 2);
        assert_eq!(tt.lookup(5), None);
        assert_eq!(tt.lookup(5 + 101), Some(2));
    }

    #[test]
    fn test_clear() {
        let mut tt = TransTable::new(16);
        tt.store(3, 9);
        tt.clear();
        assert_eq!(tt.lookup(3), None);
        assert_eq!(tt.stats().stores, 0);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut tt = TransTable::new(0);
        assert_eq!(tt.capacity(), 1);
        tt.store(u64::MAX, 4);
        assert_eq!(tt.lookup(u64::MAX), Some(4));
    }
}
