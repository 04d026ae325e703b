//! Bonebc generates boundary conditions for virtual mechanical tests on voxel meshes
//!
//! A voxel mesh (e.g., obtained from a segmented CT image of bone) is loaded by a
//! virtual compression, bending, torsion, or shear test. The result is a finite
//! element model with named node sets, element sets, and constraints.

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod constraint;
pub mod locate;
pub mod model;
pub mod prelude;
pub mod protocol;
