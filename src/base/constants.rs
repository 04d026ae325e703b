/// Defines the directory where the generated model files are saved
pub const DEFAULT_OUT_DIR: &str = "/tmp/bonebc/results";

/// Defines an auxiliary directory where the test result files are saved
pub const DEFAULT_TEST_DIR: &str = "/tmp/bonebc/test";

/// Number of points of a voxel (hexahedron) cell
pub const NNODE_VOXEL: usize = 8;

/// Relative tolerance used when comparing point coordinates against plane values
pub const COORDINATE_TOLERANCE: f64 = 1e-6;

/// Tolerance of the ray casting performed by the visible surface search
pub const VISIBILITY_TOLERANCE: f64 = 1e-4;

/// Name of the constraint produced by gathering displacement constraints
pub const GATHERED_DISPLACED_NODES: &str = "GATHERED DISPLACED NODES";

/// Name of the constraint produced by distributing one constraint to nodes
pub const CONSTRAINT_DISTRIBUTED_TO_NODES: &str = "CONSTRAINT DISTRIBUTED TO NODES";

/// Name of the constraint produced by distributing all force constraints to nodes
pub const FORCE_CONSTRAINTS_DISTRIBUTED_TO_NODES: &str = "FORCE CONSTRAINTS DISTRIBUTED TO NODES";

/// Name of the convergence set stored in the model
pub const CONVERGENCE_SET: &str = "convergence_set";

/// Names of the six canonical face sets (data frame after mapping by the test frame)
pub const FACE_X0: &str = "face_x0";
pub const FACE_X1: &str = "face_x1";
pub const FACE_Y0: &str = "face_y0";
pub const FACE_Y1: &str = "face_y1";
pub const FACE_Z0: &str = "face_z0";
pub const FACE_Z1: &str = "face_z1";

/// Returns true if two coordinates are equal within a relative tolerance
#[inline]
pub fn approximately_equal(a: f64, b: f64) -> bool {
    let scale = f64::max(1.0, f64::max(a.abs(), b.abs()));
    (a - b).abs() <= COORDINATE_TOLERANCE * scale
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
