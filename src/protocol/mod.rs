//! Implements the virtual mechanical tests that generate boundary conditions

mod bending;
mod compression;
mod directional_shear;
mod symmetric_shear;
mod test_config;
mod test_setup;
mod torsion;
pub use crate::protocol::bending::*;
pub use crate::protocol::compression::*;
pub use crate::protocol::directional_shear::*;
pub use crate::protocol::mechanical_test::*;
pub use crate::protocol::symmetric_shear::*;
pub use crate::protocol::test_config::*;
pub use crate::protocol::test_setup::*;
pub use crate::protocol::torsion::*;
