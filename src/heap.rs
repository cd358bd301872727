//! Heap - the flat, insertion-ordered registry of allocated objects.
//!
//! The heap is the single authoritative owner of every allocated object's
//! storage. It knows nothing about roots or edge semantics; it only
//! registers distinct objects and hands out ids. Objects leave the heap
//! either through an explicit [`Heap::remove_object`] or through the
//! collector's sweep phase.

use indexmap::IndexMap;

use crate::error::{HeapError, HeapResult};
use crate::object::{Object, ObjectId, TypeValue};

/// The object registry.
#[derive(Debug, Default)]
pub struct Heap {
    /// All registered objects, in registration order
    objects: IndexMap<ObjectId, Object>,

    /// Next id to mint. Monotonic; ids are never reused.
    next_id: u32,
}

impl Heap {
    /// Create an empty heap
    pub fn new() -> Heap {
        Heap {
            objects: IndexMap::new(),
            next_id: 0,
        }
    }

    /// Create and register an object with a fresh id.
    ///
    /// This is the normal allocation path.
    pub fn alloc(&mut self, ident: impl Into<String>) -> ObjectId {
        let id = self.mint_id();
        self.objects.insert(id, Object::new(id, ident));
        id
    }

    /// Create and register an object carrying a payload value
    pub fn alloc_with_value(&mut self, ident: impl Into<String>, value: TypeValue) -> ObjectId {
        let id = self.mint_id();
        self.objects.insert(id, Object::with_value(id, ident, value));
        id
    }

    fn mint_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register an already-built object, e.g. one previously removed.
    ///
    /// Fails with [`HeapError::DuplicateObject`] if an object with the
    /// same id is already registered; the heap is left untouched.
    pub fn add_object(&mut self, object: Object) -> HeapResult<ObjectId> {
        let id = object.id();
        if self.objects.contains_key(&id) {
            return Err(HeapError::DuplicateObject(id));
        }

        // Keep the counter ahead of re-registered ids so fresh ids
        // stay unique.
        self.next_id = self.next_id.max(id.0 + 1);
        self.objects.insert(id, object);
        Ok(id)
    }

    /// Remove and return the object with the given id.
    ///
    /// Fails with [`HeapError::NotFound`] if no such object is
    /// registered. Edges in other objects that point at the removed id
    /// are left in place and simply dangle; the collector ignores them.
    pub fn remove_object(&mut self, id: ObjectId) -> HeapResult<Object> {
        // shift_remove keeps the survivors in registration order
        self.objects.shift_remove(&id).ok_or(HeapError::NotFound(id))
    }

    /// Number of currently registered objects
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if no objects are registered
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Check whether an object with the given id is registered
    #[inline]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Get a registered object
    #[inline]
    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id)
    }

    /// Get a registered object mutably
    #[inline]
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(&id)
    }

    /// Iterate over all registered objects in registration order
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values()
    }

    /// Display names of all registered objects, in registration order.
    ///
    /// Convenience for diagnostics and tests.
    pub fn idents(&self) -> Vec<&str> {
        self.objects.values().map(|object| object.ident()).collect()
    }

    /// Iterate mutably over all registered objects (collector use)
    pub(crate) fn objects_mut(&mut self) -> impl Iterator<Item = &mut Object> {
        self.objects.values_mut()
    }

    /// Retain only the objects satisfying `keep`, preserving their
    /// relative order (collector use).
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&Object) -> bool) {
        self.objects.retain(|_, object| keep(object));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_registers_in_order() {
        let mut heap = Heap::new();
        heap.alloc("a");
        heap.alloc("b");
        heap.alloc("c");
        assert_eq!(heap.idents(), vec!["a", "b", "c"]);
        assert_eq!(heap.len(), 3);
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut heap = Heap::new();
        let a = heap.alloc("a");
        heap.remove_object(a).unwrap();
        let b = heap.alloc("b");
        assert_ne!(a, b);
        assert!(!heap.contains(a));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut heap = Heap::new();
        let a = heap.alloc("a");
        let removed = heap.remove_object(a).unwrap();

        assert_eq!(heap.add_object(removed.clone()), Ok(a));
        assert_eq!(
            heap.add_object(removed),
            Err(HeapError::DuplicateObject(a))
        );
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn test_remove_absent_rejected() {
        let mut heap = Heap::new();
        let a = heap.alloc("a");
        heap.remove_object(a).unwrap();
        assert_eq!(heap.remove_object(a), Err(HeapError::NotFound(a)));
        assert!(heap.is_empty());
    }
}
