//! Ticket allocation and patient registration
//!
//! Split in two layers: [`allocator`] reserves collision-free, per-area
//! monotonic ticket numbers on a database connection; [`registration`]
//! wraps one reservation and one patient insert in a transaction and owns
//! the bounded retry policy for counter drift.

pub mod allocator;
pub mod registration;

pub use allocator::{AllocationError, AllocationResult};
pub use registration::register;
