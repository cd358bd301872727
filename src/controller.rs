//! Threshold-triggered collection policy.
//!
//! The controller owns a single policy decision: given the current heap
//! size and a fixed threshold, should a full collection run now? It
//! depends on collectors only through the [`Collector`] trait, so any
//! collection strategy can substitute for [`MarkSweep`](crate::MarkSweep).

use core::fmt;

use crate::collector::{Collector, CycleStats};
use crate::heap::Heap;
use crate::object::ObjectId;

/// Outcome of a single [`Controller::check_gc`] call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GcDecision {
    /// The heap was over threshold and a full cycle ran
    Collected(CycleStats),
    /// The heap was at or under threshold; nothing happened
    NotNeeded,
}

impl GcDecision {
    /// Check whether this decision triggered a collection
    #[inline]
    pub fn collected(&self) -> bool {
        matches!(self, GcDecision::Collected(_))
    }

    /// Human-readable status message
    pub fn status(&self) -> &'static str {
        match self {
            GcDecision::Collected(_) => "Garbage collected",
            GcDecision::NotNeeded => "GC not needed",
        }
    }
}

impl fmt::Display for GcDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status())
    }
}

/// Level-triggered collection policy with a fixed size threshold.
///
/// Every check against an over-threshold heap runs a full cycle; there is
/// no hysteresis, debouncing, or rate limiting. A heap that drops back to
/// threshold size after a collection will not collect again until it
/// grows past the threshold once more. Whether to batch mutations between
/// checks is the collaborator's policy decision, not the controller's.
#[derive(Clone, Copy, Debug)]
pub struct Controller {
    /// Heap size above which collection runs. Fixed at construction.
    threshold: usize,
}

impl Controller {
    /// Create a controller with the given threshold
    pub const fn new(threshold: usize) -> Controller {
        Controller { threshold }
    }

    /// Get the configured threshold
    #[inline]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Run `gc` over `heap` if the heap has grown past the threshold.
    ///
    /// In stress test mode every check collects, threshold or not.
    pub fn check_gc<C: Collector>(
        &self,
        gc: &mut C,
        heap: &mut Heap,
        roots: &[ObjectId],
    ) -> GcDecision {
        if cfg!(feature = "gc_stress_test") || heap.len() > self.threshold {
            GcDecision::Collected(gc.collect_garbage(heap, roots))
        } else {
            GcDecision::NotNeeded
        }
    }
}
