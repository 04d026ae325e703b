use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines the physical meaning of constraint values
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum ConstraintKind {
    /// Prescribed displacement
    Displacement,

    /// Applied force
    Force,
}

impl ConstraintKind {
    /// Returns the other kind (used by convergence sets)
    pub fn flipped(&self) -> Self {
        match self {
            ConstraintKind::Displacement => ConstraintKind::Force,
            ConstraintKind::Force => ConstraintKind::Displacement,
        }
    }
}

/// Defines the mesh entities referenced by constraint indices
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum AppliedTo {
    /// Indices are point ids
    Nodes,

    /// Indices are cell ids
    Elements,
}

/// Defines how a force applied to an element is spread over its points
///
/// Note: The fixed numbering scheme matches the usual FACE_X0, ..., BODY codes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Distribution {
    /// Face at the low x side of the voxel
    FaceX0 = 0,

    /// Face at the high x side of the voxel
    FaceX1 = 1,

    /// Face at the low y side of the voxel
    FaceY0 = 2,

    /// Face at the high y side of the voxel
    FaceY1 = 3,

    /// Face at the low z side of the voxel
    FaceZ0 = 4,

    /// Face at the high z side of the voxel
    FaceZ1 = 5,

    /// All points of the voxel
    Body = 6,
}

impl Distribution {
    /// Returns the local (voxel) corner ids receiving a share of the value
    #[rustfmt::skip]
    pub fn corners(&self) -> &'static [usize] {
        match self {
            Distribution::FaceX0 => &[0, 2, 4, 6],
            Distribution::FaceX1 => &[1, 3, 5, 7],
            Distribution::FaceY0 => &[0, 1, 4, 5],
            Distribution::FaceY1 => &[2, 3, 6, 7],
            Distribution::FaceZ0 => &[0, 1, 2, 3],
            Distribution::FaceZ1 => &[4, 5, 6, 7],
            Distribution::Body   => &[0, 1, 2, 3, 4, 5, 6, 7],
        }
    }

    /// Returns the distribution of a voxel face given the data frame axis and side (0 = low, 1 = high)
    pub fn face(axis: usize, side: usize) -> Self {
        match (axis % 3, side % 2) {
            (0, 0) => Distribution::FaceX0,
            (0, _) => Distribution::FaceX1,
            (1, 0) => Distribution::FaceY0,
            (1, _) => Distribution::FaceY1,
            (_, 0) => Distribution::FaceZ0,
            (_, _) => Distribution::FaceZ1,
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::Displacement => f.pad("DISPLACEMENT"),
            ConstraintKind::Force => f.pad("FORCE"),
        }
    }
}

impl fmt::Display for AppliedTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppliedTo::Nodes => f.pad("NODES"),
            AppliedTo::Elements => f.pad("ELEMENTS"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
