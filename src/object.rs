//! Heap objects and their reference edges.
//!
//! An `Object` records its identity, an optional payload value, and the set
//! of outgoing reference edges. Edges are `ObjectId`s into the heap arena
//! and are non-owning: the heap is the single owner of every object's
//! storage, so a cyclic object graph never implies an ownership cycle.

use core::fmt;

use indexmap::IndexSet;

/// Handle to an object registered in a [`Heap`](crate::Heap).
///
/// Ids are minted by the heap and never reused for the heap's lifetime,
/// so a stale id held after a sweep fails lookup instead of aliasing a
/// different object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Payload value carried by an object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeValue {
    /// Integer payload
    Int(i64),
}

impl fmt::Display for TypeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TypeValue::Int(i) => write!(f, "Int: {}", i),
        }
    }
}

/// A heap node: identity, optional payload, outgoing edges, and the
/// transient mark bit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Object {
    id: ObjectId,
    ident: String,
    value: Option<TypeValue>,

    /// Outgoing edges. Deduplicated, insertion-ordered, non-owning.
    pub(crate) references: IndexSet<ObjectId>,

    /// "Found reachable so far" flag. Only meaningful while a collection
    /// cycle is running; always false between cycles.
    pub(crate) marked: bool,
}

impl Object {
    /// Create an object with the given id and display name.
    ///
    /// Ids come from a heap ([`Heap::alloc`](crate::Heap::alloc) is the
    /// usual way to create an object); this constructor mainly serves
    /// rebuilding an object that was previously removed.
    pub fn new(id: ObjectId, ident: impl Into<String>) -> Object {
        Object {
            id,
            ident: ident.into(),
            value: None,
            references: IndexSet::new(),
            marked: false,
        }
    }

    /// Create an object carrying a payload value.
    pub fn with_value(id: ObjectId, ident: impl Into<String>, value: TypeValue) -> Object {
        let mut object = Object::new(id, ident);
        object.value = Some(value);
        object
    }

    /// Get this object's id
    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Get this object's display name
    #[inline]
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// Get this object's payload value
    #[inline]
    pub fn value(&self) -> Option<TypeValue> {
        self.value
    }

    /// Replace this object's payload value
    #[inline]
    pub fn set_value(&mut self, value: Option<TypeValue>) {
        self.value = value;
    }

    /// Insert an edge to `target` if not already present.
    ///
    /// Idempotent: inserting an existing edge has no effect. Self-edges
    /// are permitted; termination of marking over cyclic graphs is the
    /// mark bit's job, not this operation's.
    ///
    /// Returns true if the edge was newly inserted.
    pub fn add_reference(&mut self, target: ObjectId) -> bool {
        self.references.insert(target)
    }

    /// Remove the edge to `target` if present.
    ///
    /// A no-op if the edge does not exist. Returns true if an edge was
    /// removed.
    pub fn remove_reference(&mut self, target: ObjectId) -> bool {
        // shift_remove keeps the remaining edges in insertion order
        self.references.shift_remove(&target)
    }

    /// Check whether an edge to `target` exists
    #[inline]
    pub fn has_reference(&self, target: ObjectId) -> bool {
        self.references.contains(&target)
    }

    /// Iterate over the outgoing edges in insertion order
    pub fn references(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.references.iter().copied()
    }

    /// Number of outgoing edges
    #[inline]
    pub fn ref_count(&self) -> usize {
        self.references.len()
    }

    /// Check whether this object has no outgoing edges
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.references.is_empty()
    }

    /// Check whether this object is currently marked.
    ///
    /// Outside of a collection cycle this is always false.
    #[inline]
    pub fn is_marked(&self) -> bool {
        self.marked
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({})", self.ident)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_reference_idempotent() {
        let mut object = Object::new(ObjectId(0), "a");
        assert!(object.add_reference(ObjectId(1)));
        assert!(!object.add_reference(ObjectId(1)));
        assert_eq!(object.ref_count(), 1);
    }

    #[test]
    fn test_add_then_remove_restores_edge_set() {
        let mut object = Object::new(ObjectId(0), "a");
        object.add_reference(ObjectId(1));
        object.add_reference(ObjectId(2));
        let before: Vec<ObjectId> = object.references().collect();

        object.add_reference(ObjectId(3));
        object.remove_reference(ObjectId(3));

        let after: Vec<ObjectId> = object.references().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_remove_absent_reference_is_noop() {
        let mut object = Object::new(ObjectId(0), "a");
        object.add_reference(ObjectId(1));
        assert!(!object.remove_reference(ObjectId(9)));
        assert_eq!(object.ref_count(), 1);
    }

    #[test]
    fn test_self_reference_permitted() {
        let mut object = Object::new(ObjectId(0), "a");
        assert!(object.add_reference(ObjectId(0)));
        assert!(object.has_reference(ObjectId(0)));
    }

    #[test]
    fn test_display() {
        let object = Object::with_value(ObjectId(0), "root", TypeValue::Int(42));
        assert_eq!(object.to_string(), "Object(root)");
        assert_eq!(object.value().unwrap().to_string(), "Int: 42");
    }
}
