//! Implements the finite element model produced by the mechanical tests

mod fe_model;
mod material_table;
pub use crate::model::fe_model::*;
pub use crate::model::material_table::*;
