//! Group resolution: renaming the survivor, deleting the rest.
//!
//! The resolver walks each duplicate group through a small state machine
//! (`PENDING -> RENAMING -> DELETING -> RESOLVED`, or the terminal
//! `FAILED`), honoring the action gate, simulate mode, the audit sink and
//! byte accounting. Any filesystem error is fatal and aborts the run.

pub mod resolve;

pub use resolve::{GroupResolver, GroupState, ResolveError, ResolverConfig};
