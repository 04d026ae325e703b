//! Makes available common structures needed to generate a model
//!
//! You may write `use bonebc::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{Cellmap, Mesh, Samples, TestFrame, DEFAULT_OUT_DIR, DEFAULT_TEST_DIR};
pub use crate::base::{FACE_X0, FACE_X1, FACE_Y0, FACE_Y1, FACE_Z0, FACE_Z1};
pub use crate::constraint::{Constraint, ConstraintCollection, PerId};
pub use crate::model::{MaterialTable, Model};
pub use crate::protocol::{apply_test, MechanicalTest, TestConfig, TestKind, TestSetup};
pub use crate::protocol::{Bending, Compression, DirectionalShear, SymmetricShear, Torsion};
pub use crate::StrError;
