//! Fixed-capacity identifier pool (used-set over `[0, capacity)`).

use crate::error::{Result, SwarmError};
use crate::shape::BotId;

/// Reference pool size.
pub const MAX_IDS: usize = 1000;

/// Tracks which identifiers in `[0, capacity)` are taken.
///
/// Invariant: `used.len() == capacity` and `count` equals the number of `true` slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdAllocator {
    used: Vec<bool>,
    count: usize,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(MAX_IDS)
    }
}

impl IdAllocator {
    pub fn new(capacity: usize) -> Self {
        Self {
            used: vec![false; capacity],
            count: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.used.len()
    }

    /// Number of identifiers currently taken.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn free_count(&self) -> usize {
        self.capacity() - self.count
    }

    /// Whether `id` lies in `[0, capacity)`.
    #[inline]
    pub fn contains(&self, id: i64) -> bool {
        id >= 0 && (id as u64) < self.capacity() as u64
    }

    /// Range-checked conversion to a `BotId`.
    pub fn check(&self, id: i64) -> Result<BotId> {
        if self.contains(id) {
            Ok(id as BotId)
        } else {
            Err(SwarmError::InvalidIdentifier {
                id,
                capacity: self.capacity(),
            })
        }
    }

    #[inline]
    pub fn is_used(&self, id: BotId) -> bool {
        self.used.get(id as usize).copied().unwrap_or(false)
    }

    /// Lowest identifier not yet taken.
    pub fn lowest_free(&self) -> Option<BotId> {
        self.used.iter().position(|u| !u).map(|i| i as BotId)
    }

    /// Lowest free identifier, or `CapacityExhausted`.
    pub fn next_free(&self) -> Result<BotId> {
        self.lowest_free().ok_or(SwarmError::CapacityExhausted {
            capacity: self.capacity(),
        })
    }

    /// Mark `id` as taken. Returns `Ok(false)` if it already was.
    pub fn insert(&mut self, id: BotId) -> Result<bool> {
        let id = self.check(i64::from(id))?;
        let slot = &mut self.used[id as usize];
        if *slot {
            return Ok(false);
        }
        *slot = true;
        self.count += 1;
        Ok(true)
    }

    /// Free `id`; out-of-range or untaken ids are ignored.
    pub fn remove(&mut self, id: BotId) -> bool {
        match self.used.get_mut(id as usize) {
            Some(slot) if *slot => {
                *slot = false;
                self.count -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.used.iter_mut().for_each(|u| *u = false);
        self.count = 0;
    }

    /// Reset to exactly the given identifiers.
    pub fn rebuild<I: IntoIterator<Item = BotId>>(&mut self, ids: I) -> Result<()> {
        self.clear();
        for id in ids {
            if !self.insert(id)? {
                return Err(SwarmError::DuplicateIdentifier { id });
            }
        }
        Ok(())
    }

    /// Taken identifiers in ascending order.
    pub fn iter_used(&self) -> impl Iterator<Item = BotId> + '_ {
        self.used
            .iter()
            .enumerate()
            .filter(|(_, u)| **u)
            .map(|(i, _)| i as BotId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_lowest_free_first() {
        let mut ids = IdAllocator::new(4);
        assert_eq!(ids.lowest_free(), Some(0));
        ids.insert(0).unwrap();
        ids.insert(2).unwrap();
        assert_eq!(ids.lowest_free(), Some(1));
        ids.insert(1).unwrap();
        assert_eq!(ids.lowest_free(), Some(3));
        assert_eq!(ids.len(), 3);
        assert_eq!(ids.free_count(), 1);
    }

    #[test]
    fn exhaustion_and_range_errors() {
        let mut ids = IdAllocator::new(2);
        ids.insert(0).unwrap();
        ids.insert(1).unwrap();
        assert!(matches!(
            ids.next_free(),
            Err(SwarmError::CapacityExhausted { capacity: 2 })
        ));
        assert!(matches!(
            ids.insert(2),
            Err(SwarmError::InvalidIdentifier { id: 2, capacity: 2 })
        ));
        assert!(matches!(
            ids.check(-1),
            Err(SwarmError::InvalidIdentifier { id: -1, .. })
        ));
    }

    #[test]
    fn double_insert_reports_false() {
        let mut ids = IdAllocator::new(3);
        assert!(ids.insert(1).unwrap());
        assert!(!ids.insert(1).unwrap());
        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn remove_and_rebuild() {
        let mut ids = IdAllocator::new(5);
        ids.rebuild([4, 0, 2]).unwrap();
        assert_eq!(ids.iter_used().collect::<Vec<_>>(), vec![0, 2, 4]);
        assert!(ids.remove(2));
        assert!(!ids.remove(2));
        assert!(!ids.remove(77));
        assert_eq!(ids.lowest_free(), Some(1));
        assert!(matches!(
            ids.rebuild([1, 1]),
            Err(SwarmError::DuplicateIdentifier { id: 1 })
        ));
        ids.clear();
        assert!(ids.is_empty());
    }
}
