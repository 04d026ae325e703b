//! Implements functions to find node and element sets on the faces of a voxel mesh

mod node_sets;
mod visible_surface;
pub use crate::locate::node_sets::*;
pub use crate::locate::visible_surface::*;
