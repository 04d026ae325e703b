//! Implements the base structures: mesh, cellmap, coordinate frame, and enums

mod cellmap;
mod constants;
mod enums;
mod frame;
mod mesh;
mod sample_meshes;
mod testing;
pub use crate::base::cellmap::*;
pub use crate::base::constants::*;
pub use crate::base::enums::*;
pub use crate::base::frame::*;
pub use crate::base::mesh::*;
pub use crate::base::sample_meshes::*;

#[allow(unused_imports)]
pub(crate) use crate::base::testing::*;
