//! Mark-and-sweep collection.
//!
//! `MarkSweep` runs the two phases over a [`Heap`]:
//! - mark: explicit-worklist depth-first traversal from the root set.
//!   The mark bit doubles as the visited check, which is what makes
//!   cyclic graphs terminate.
//! - sweep: retain exactly the marked objects, in their relative order,
//!   resetting their mark bits for the next cycle.
//!
//! A cycle is synchronous and atomic from the collaborator's point of
//! view: Idle -> Marking -> Sweeping -> Idle within a single call.

use core::mem;

use log::{debug, trace};

use crate::heap::Heap;
use crate::object::ObjectId;

/// Collection phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GcPhase {
    /// No collection in progress
    Idle,
    /// Tracing reachable objects from the roots
    Marking,
    /// Discarding unmarked objects
    Sweeping,
}

impl Default for GcPhase {
    fn default() -> Self {
        GcPhase::Idle
    }
}

/// Result of one completed collection cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Objects discarded by the sweep phase
    pub objects_freed: usize,
    /// Objects remaining in the heap after the sweep
    pub live_objects: usize,
}

/// Capability interface between the controller and a collector.
///
/// Anything that can run a full collection over a heap given a root set
/// can stand in for [`MarkSweep`].
pub trait Collector {
    /// Perform one full collection cycle over `heap` with the given roots
    fn collect_garbage(&mut self, heap: &mut Heap, roots: &[ObjectId]) -> CycleStats;
}

/// The mark-and-sweep collector.
pub struct MarkSweep {
    /// Current phase. Idle whenever no cycle is running.
    phase: GcPhase,

    /// Worklist of marked objects whose edges still need scanning.
    /// An explicit stack, so graph depth never bounds the call stack.
    worklist: Vec<ObjectId>,

    /// Scratch buffer for one object's edges during tracing
    scratch: Vec<ObjectId>,

    /// Objects freed by the most recent cycle
    pub objects_freed_this_cycle: usize,

    /// Completed cycles since construction
    pub cycles_completed: usize,

    /// Objects freed across all cycles
    pub objects_freed_total: usize,
}

impl MarkSweep {
    /// Create a new collector
    pub fn new() -> MarkSweep {
        MarkSweep {
            phase: GcPhase::Idle,
            worklist: Vec::new(),
            scratch: Vec::new(),
            objects_freed_this_cycle: 0,
            cycles_completed: 0,
            objects_freed_total: 0,
        }
    }

    /// Get the current collection phase
    #[inline]
    pub fn phase(&self) -> GcPhase {
        self.phase
    }

    /// Check if a collection cycle is in progress
    #[inline]
    pub fn gc_in_progress(&self) -> bool {
        self.phase != GcPhase::Idle
    }

    /// Mark every object reachable from `root`.
    ///
    /// The mark bit is checked and set before an object enters the
    /// worklist, so each object is scanned at most once regardless of
    /// cycles, self-edges, or shared structure. An already-marked root
    /// returns immediately.
    ///
    /// A root id that is not registered in the heap is a benign no-op:
    /// sweep only inspects the heap, so marking an unregistered object
    /// could have no observable effect anyway. Dangling edges left by an
    /// explicit removal are ignored the same way.
    pub fn mark(&mut self, heap: &mut Heap, root: ObjectId) {
        match heap.object_mut(root) {
            Some(object) => {
                if object.marked {
                    return;
                }
                object.marked = true;
            }
            None => {
                trace!("mark: root {} is not registered, ignoring", root);
                return;
            }
        }
        self.worklist.push(root);

        while let Some(id) = self.worklist.pop() {
            // Snapshot the edges so the heap can be borrowed mutably
            // while marking the targets.
            let mut edges = mem::take(&mut self.scratch);
            edges.clear();
            if let Some(object) = heap.object(id) {
                edges.extend(object.references.iter().copied());
            }

            for &target in &edges {
                if let Some(object) = heap.object_mut(target) {
                    if !object.marked {
                        object.marked = true;
                        self.worklist.push(target);
                    }
                }
            }

            self.scratch = edges;
        }
    }

    /// Mark from every root in the given root set.
    ///
    /// Root order does not affect the final marked set: marking is
    /// idempotent and monotonic, so the result is the union of
    /// reachability from each root.
    pub fn mark_all(&mut self, heap: &mut Heap, roots: &[ObjectId]) {
        for &root in roots {
            self.mark(heap, root);
        }
    }

    /// Discard every unmarked object, keeping survivors in their
    /// relative order, and reset every survivor's mark bit for the next
    /// cycle.
    ///
    /// Returns the number of objects discarded. Discarded objects are
    /// gone for good; their ids are never reused.
    pub fn sweep(&mut self, heap: &mut Heap) -> usize {
        let before = heap.len();
        heap.retain(|object| object.marked);
        for object in heap.objects_mut() {
            object.marked = false;
        }

        let freed = before - heap.len();
        self.objects_freed_this_cycle = freed;
        self.objects_freed_total += freed;
        freed
    }

    /// Run one full collection cycle: mark from `roots`, then sweep.
    ///
    /// An empty root set marks nothing, so the sweep reclaims the entire
    /// heap. That is the intended behavior: nothing is reachable.
    pub fn collect_garbage(&mut self, heap: &mut Heap, roots: &[ObjectId]) -> CycleStats {
        self.phase = GcPhase::Marking;
        self.mark_all(heap, roots);

        self.phase = GcPhase::Sweeping;
        let freed = self.sweep(heap);

        self.phase = GcPhase::Idle;
        self.cycles_completed += 1;

        let stats = CycleStats {
            objects_freed: freed,
            live_objects: heap.len(),
        };
        debug!(
            "gc cycle {}: freed {} objects, {} live",
            self.cycles_completed, stats.objects_freed, stats.live_objects
        );
        stats
    }
}

impl Default for MarkSweep {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector for MarkSweep {
    fn collect_garbage(&mut self, heap: &mut Heap, roots: &[ObjectId]) -> CycleStats {
        MarkSweep::collect_garbage(self, heap, roots)
    }
}
