//! Generational arena for tree nodes.
//!
//! Nodes refer to each other by `NodeId` instead of pointers. Every slot carries a
//! generation that is bumped when the slot is reused, so a `(NodeId, generation)`
//! pair handed out to callers can be checked for staleness after deletions.

use std::convert::TryFrom;
use std::ops::{Index, IndexMut};

/// Node ID type for arena-based allocation
pub type NodeId = u32;

/// Marker for an absent link
pub const NULL_NODE: NodeId = u32::MAX;

/// Statistics for an arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaStats {
    pub total_capacity: usize,
    pub allocated_count: usize,
    pub free_count: usize,
    pub utilization: f64,
    pub fragmentation: f64,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    item: Option<T>,
}

/// Arena allocator with a free list and per-slot generations
#[derive(Debug, Clone)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    /// Free slot indices for reuse
    free_list: Vec<usize>,
    allocated: usize,
}

impl<T> Arena<T> {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            allocated: 0,
        }
    }

    /// Create a new arena with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            allocated: 0,
        }
    }

    /// Allocate a new item in the arena and return its ID
    #[inline]
    pub fn allocate(&mut self, item: T) -> NodeId {
        self.allocated += 1;

        let index = if let Some(free_index) = self.free_list.pop() {
            let slot = &mut self.slots[free_index];
            slot.generation = slot.generation.wrapping_add(1);
            slot.item = Some(item);
            free_index
        } else {
            let index = self.slots.len();
            self.slots.push(Slot {
                generation: 0,
                item: Some(item),
            });
            index
        };

        // NULL_NODE is reserved; an arena that large cannot be addressed.
        match NodeId::try_from(index) {
            Ok(id) if id != NULL_NODE => id,
            _ => panic!("arena exhausted the NodeId space at index {}", index),
        }
    }

    /// Deallocate an item from the arena and return it
    #[inline]
    pub fn deallocate(&mut self, id: NodeId) -> Option<T> {
        let index = Self::index_of(id)?;
        let item = self.slots.get_mut(index)?.item.take()?;
        self.free_list.push(index);
        self.allocated -= 1;
        Some(item)
    }

    /// Deallocate a slot that is known to be live.
    ///
    /// Panics like indexing does if `id` is not allocated.
    #[inline]
    pub fn remove(&mut self, id: NodeId) -> T {
        match self.deallocate(id) {
            Some(item) => item,
            None => panic!("arena access to unallocated node {}", id),
        }
    }

    /// Get a reference to an item in the arena
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        let index = Self::index_of(id)?;
        self.slots.get(index)?.item.as_ref()
    }

    /// Get a mutable reference to an item in the arena
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        let index = Self::index_of(id)?;
        self.slots.get_mut(index)?.item.as_mut()
    }

    /// Current generation of a live slot
    #[inline]
    pub fn generation(&self, id: NodeId) -> Option<u32> {
        let index = Self::index_of(id)?;
        let slot = self.slots.get(index)?;
        slot.item.as_ref().map(|_| slot.generation)
    }

    /// Check that `id` is allocated and has not been reused since `generation`
    #[inline]
    pub fn is_live(&self, id: NodeId, generation: u32) -> bool {
        self.generation(id) == Some(generation)
    }

    /// Check if an ID is valid and allocated
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Get arena statistics
    pub fn stats(&self) -> ArenaStats {
        let total_capacity = self.slots.capacity();
        let allocated_count = self.allocated;
        let free_count = self.free_list.len();
        let utilization = if total_capacity > 0 {
            allocated_count as f64 / total_capacity as f64
        } else {
            0.0
        };
        let fragmentation = if allocated_count > 0 {
            free_count as f64 / (allocated_count + free_count) as f64
        } else {
            0.0
        };

        ArenaStats {
            total_capacity,
            allocated_count,
            free_count,
            utilization,
            fragmentation,
        }
    }

    /// Get the number of allocated items
    pub fn len(&self) -> usize {
        self.allocated
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.allocated == 0
    }

    /// Clear all items from the arena.
    ///
    /// Slots are kept with bumped generations so that ids handed out before the
    /// clear never validate against items allocated after it.
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.item.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free_list.push(index);
        }
        self.allocated = 0;
    }

    #[inline]
    fn index_of(id: NodeId) -> Option<usize> {
        if id == NULL_NODE {
            return None;
        }
        usize::try_from(id).ok()
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = T;

    /// Panics if `id` is not allocated; tree links always point at live nodes.
    #[inline]
    fn index(&self, id: NodeId) -> &T {
        match self.get(id) {
            Some(item) => item,
            None => panic!("arena access to unallocated node {}", id),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match self.get_mut(id) {
            Some(item) => item,
            None => panic!("arena access to unallocated node {}", id),
        }
    }
}
