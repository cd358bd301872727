//! A minimal stop-the-world mark-and-sweep garbage collector.
//!
//! A [`Heap`] owns every allocated [`Object`]; objects reference each
//! other through non-owning [`ObjectId`] edges, so the object graph may
//! freely contain cycles. [`MarkSweep`] reclaims everything unreachable
//! from a caller-supplied root set, and [`Controller`] decides when a
//! collection should run based on a fixed heap-size threshold.
//!
//! Key types:
//! - `ObjectId`: a handle to a heap-registered object
//! - `Heap`: the insertion-ordered object registry, single owner of storage
//! - `MarkSweep`: the mark and sweep phases
//! - `Controller`: the threshold-triggered policy
//!
//! Key traits:
//! - `Collector`: implemented by collection strategies, used by the controller
//!
//! ```
//! use tracegc::{Controller, Heap, MarkSweep};
//!
//! let mut heap = Heap::new();
//! let root = heap.alloc("root");
//! let child = heap.alloc("child");
//! heap.object_mut(root).unwrap().add_reference(child);
//! heap.alloc("orphan");
//!
//! let mut gc = MarkSweep::new();
//! let controller = Controller::new(2);
//!
//! let decision = controller.check_gc(&mut gc, &mut heap, &[root]);
//! assert!(decision.collected());
//! assert_eq!(heap.len(), 2);
//! ```

mod collector;
mod controller;
mod error;
mod heap;
mod object;

pub use collector::{Collector, CycleStats, GcPhase, MarkSweep};
pub use controller::{Controller, GcDecision};
pub use error::{HeapError, HeapResult};
pub use heap::Heap;
pub use object::{Object, ObjectId, TypeValue};
