use super::Bounds;
use std::fmt;

/// Permutations of the voxel corner ids indexed by the test axis
///
/// Row `a` maps a corner id given in the test frame (axial direction
/// along local z) to the corner id of the voxel in the data frame.
#[rustfmt::skip]
const VOXEL_LOCAL_IDS: [[usize; 8]; 3] = [
    [0, 2, 4, 6, 1, 3, 5, 7], // test axis along x
    [0, 4, 1, 5, 2, 6, 3, 7], // test axis along y
    [0, 1, 2, 3, 4, 5, 6, 7], // test axis along z
];

/// Maps the logical test frame to the physical (data) frame of the mesh
///
/// In the test frame, the sense 2 is the axial direction (the test axis) and
/// the senses 0 and 1 are the lateral directions. The data frame is the x, y, z
/// frame of the mesh. The two frames are related by a cyclic permutation:
///
/// | test axis | sense 0 | sense 1 | sense 2 |
/// |:---------:|:-------:|:-------:|:-------:|
/// |     x     |    y    |    z    |    x    |
/// |     y     |    z    |    x    |    y    |
/// |     z     |    x    |    y    |    z    |
///
/// Any integer is accepted as a sense or axis; values are taken modulo 3 with
/// negative values counting from the end (e.g., -1 is the same as 2).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TestFrame {
    test_axis: usize,
}

impl TestFrame {
    /// Allocates a new instance given the test axis (0 = x, 1 = y, 2 = z)
    pub fn new(test_axis: i32) -> Self {
        TestFrame {
            test_axis: test_axis.rem_euclid(3) as usize,
        }
    }

    /// Returns the (normalized) test axis
    pub fn test_axis(&self) -> usize {
        self.test_axis
    }

    /// Converts a test frame sense into a data frame sense
    pub fn data_frame_sense(&self, test_frame_sense: i32) -> usize {
        (test_frame_sense + self.test_axis as i32 - 2).rem_euclid(3) as usize
    }

    /// Converts a data frame sense into a test frame sense
    pub fn test_frame_sense(&self, data_frame_sense: i32) -> usize {
        (data_frame_sense - self.test_axis as i32 + 2).rem_euclid(3) as usize
    }

    /// Returns the data frame polarity (0 = low side; 1 = high side)
    ///
    /// The frames are related by a rotation only, hence the polarity is unchanged.
    pub fn data_frame_polarity(&self, _test_frame_sense: i32, polarity: usize) -> usize {
        polarity
    }

    /// Returns the bound along the test frame sense at the given polarity
    pub fn test_frame_bound(&self, bounds: &Bounds, test_frame_sense: i32, polarity: usize) -> f64 {
        let sense = self.data_frame_sense(test_frame_sense);
        bounds[2 * sense + self.data_frame_polarity(test_frame_sense, polarity)]
    }

    /// Returns the data frame voxel corner id corresponding to a test frame corner id
    ///
    /// For instance, with the test axis along x, the local "bottom" face of the
    /// voxel (corners 0, 1, 2, 3 in the test frame) is the face at the low x side.
    pub fn voxel_local_id(&self, test_frame_local_id: usize) -> usize {
        VOXEL_LOCAL_IDS[self.test_axis][test_frame_local_id % 8]
    }

    /// Returns the coordinates of a data frame point in the test frame
    pub fn to_test_frame(&self, x: &[f64; 3]) -> [f64; 3] {
        [
            x[self.data_frame_sense(0)],
            x[self.data_frame_sense(1)],
            x[self.data_frame_sense(2)],
        ]
    }

    /// Returns the outward unit normal (in the data frame) of the low (0) or high (1) axial face
    pub fn axial_normal(&self, polarity: usize) -> [f64; 3] {
        let mut normal = [0.0; 3];
        normal[self.data_frame_sense(2)] = if self.data_frame_polarity(2, polarity) == 1 {
            1.0
        } else {
            -1.0
        };
        normal
    }
}

impl Default for TestFrame {
    fn default() -> Self {
        TestFrame { test_axis: 2 }
    }
}

impl fmt::Display for TestFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = ["x", "y", "z"][self.test_axis];
        write!(f, "{}", name)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
