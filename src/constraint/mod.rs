//! Implements the constraint data model and its algebra (merge, gather, distribute)

mod algebra;
mod collection;
mod constraint;
pub use crate::constraint::algebra::*;
pub use crate::constraint::collection::*;
pub use crate::constraint::constraint::*;
