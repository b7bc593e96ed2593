//! Derivation engine.
//!
//! Turns a kernel (the comparison logic of one assertion) into a complete
//! assertion:
//!
//! - [`derive_single`]: guard, then a bounded wait for the next message
//! - [`derive_aggregate`]: guard, then the full received log
//!
//! Kernels decide pass/fail and the message for both polarities themselves;
//! the engine only adds the rejections that fail regardless of polarity.

mod aggregate;
mod single;

pub use aggregate::{AggregateAssertion, derive_aggregate};
pub use single::{SingleMessageAssertion, derive_single};
