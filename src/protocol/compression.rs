use super::MechanicalTest;
use crate::base::{CellId, Mesh, TestFrame, FACE_X0, FACE_X1, FACE_Y0, FACE_Y1, FACE_Z0, FACE_Z1};
use crate::constraint::{create_boundary_condition, PerId};
use crate::model::Model;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Holds the parameters of a uniaxial compression test
///
/// The bottom face is supported along the test axis and the top face is displaced along
/// the test axis.
///
/// ```text
///      ↓  ↓  ↓  ↓  ↓   top_displacement
///    ┌──────────────┐
///    │              │
///    │              │
///    │              │
///    └──────────────┘
///      △  △  △  △  △   bottom_fixed
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Compression {
    /// Applied strain (negative in compression); used if the applied displacement is zero
    pub applied_strain: f64,

    /// Applied displacement of the top face; takes precedence over the strain if nonzero
    pub applied_displacement: f64,

    /// Fixes the top face laterally (no slip)
    pub top_surface_contact_friction: bool,

    /// Fixes the bottom face in all senses (no slip)
    pub bottom_surface_contact_friction: bool,

    /// Prevents the lateral faces from moving outward (normal senses fixed)
    pub confine_sides: bool,

    /// Pins one cell to prevent rigid body motion (only without friction and confinement)
    pub pin: bool,

    /// Pins the cell closest to the lateral center; otherwise, `pin_cell_id` is used
    pub pin_cell_closest_to_xy_center: bool,

    /// Cell to pin if `pin_cell_closest_to_xy_center` is false
    pub pin_cell_id: CellId,
}

impl Compression {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Compression {
            applied_strain: -0.01,
            applied_displacement: 0.0,
            top_surface_contact_friction: false,
            bottom_surface_contact_friction: false,
            confine_sides: false,
            pin: false,
            pin_cell_closest_to_xy_center: true,
            pin_cell_id: 0,
        }
    }

    /// Sets the applied strain
    pub fn set_applied_strain(&mut self, value: f64) -> &mut Self {
        self.applied_strain = value;
        self
    }

    /// Sets the applied displacement (zero means that the strain is used instead)
    pub fn set_applied_displacement(&mut self, value: f64) -> &mut Self {
        self.applied_displacement = value;
        self
    }

    /// Sets the contact friction of the top and bottom faces
    pub fn set_contact_friction(&mut self, top: bool, bottom: bool) -> &mut Self {
        self.top_surface_contact_friction = top;
        self.bottom_surface_contact_friction = bottom;
        self
    }

    /// Sets the confinement of the lateral faces
    pub fn set_confine_sides(&mut self, flag: bool) -> &mut Self {
        self.confine_sides = flag;
        self
    }

    /// Enables pinning the cell closest to the lateral center
    pub fn set_pin(&mut self, flag: bool) -> &mut Self {
        self.pin = flag;
        self
    }

    /// Enables pinning a specific cell
    pub fn set_pin_cell_id(&mut self, cell_id: CellId) -> &mut Self {
        self.pin = true;
        self.pin_cell_closest_to_xy_center = false;
        self.pin_cell_id = cell_id;
        self
    }

    /// Returns the cell whose center is closest to the lateral center of the mesh
    ///
    /// The distance is measured in the lateral plane of the test frame. Ties go to the
    /// cell with the smaller axial coordinate, then to the lowest id.
    pub fn cell_closest_to_lateral_center(mesh: &Mesh, frame: &TestFrame) -> CellId {
        let bounds = mesh.bounds();
        let mid = |b: &[f64; 6], sense: i32| (frame.test_frame_bound(b, sense, 0) + frame.test_frame_bound(b, sense, 1)) / 2.0;
        let (xc, yc) = (mid(&bounds, 0), mid(&bounds, 1));
        let mut best = 0;
        let mut r2_closest = f64::MAX;
        let mut z_min = f64::MAX;
        for cell in &mesh.cells {
            let b = mesh.cell_bounds(cell);
            let (x, y, z) = (mid(&b, 0), mid(&b, 1), mid(&b, 2));
            let r2 = (x - xc) * (x - xc) + (y - yc) * (y - yc);
            if r2 < r2_closest || (r2 == r2_closest && z < z_min) {
                best = cell.id;
                r2_closest = r2;
                z_min = z;
            }
        }
        best
    }

    /// Adds the pinned nodes (two corners of one cell) to prevent rigid body motion
    fn pin_cell(&self, model: &mut Model<'_>, frame: &TestFrame) -> Result<(), StrError> {
        let cell_id = if self.pin_cell_closest_to_xy_center {
            Compression::cell_closest_to_lateral_center(model.mesh, frame)
        } else {
            self.pin_cell_id
        };
        let cell = model.mesh.cells.get(cell_id).ok_or("pin cell id is out of range")?;
        debug!(cell_id, "pinned cell");
        let a = cell.points[frame.voxel_local_id(0)];
        let b = cell.points[frame.voxel_local_id(1)];
        let (s0, s1) = (frame.data_frame_sense(0), frame.data_frame_sense(1));
        let pinned = create_boundary_condition(&[a, a, b], PerId::Each(vec![s0, s1, s1]), PerId::All(0.0), "pinned_nodes")?;
        model.constraints.add_or_merge(pinned)?;
        Ok(())
    }
}

impl Default for Compression {
    fn default() -> Self {
        Compression::new()
    }
}

impl MechanicalTest for Compression {
    fn name(&self) -> &'static str {
        "Compression"
    }

    fn add_constraints(&self, model: &mut Model<'_>, frame: &TestFrame) -> Result<(), StrError> {
        let (s0, s1, s2) = (frame.data_frame_sense(0), frame.data_frame_sense(1), frame.data_frame_sense(2));

        // top and bottom
        if self.bottom_surface_contact_friction {
            model.fix_nodes(FACE_Z0, "bottom_fixed")?;
        } else {
            model.apply_boundary_condition(FACE_Z0, PerId::All(s2), PerId::All(0.0), "bottom_fixed")?;
        }
        if self.pin && !self.bottom_surface_contact_friction && !self.top_surface_contact_friction && !self.confine_sides {
            self.pin_cell(model, frame)?;
        }
        if self.top_surface_contact_friction {
            model
                .apply_boundary_condition(FACE_Z1, PerId::All(s0), PerId::All(0.0), "top_fixed")?
                .apply_boundary_condition(FACE_Z1, PerId::All(s1), PerId::All(0.0), "top_fixed")?;
        }
        let displacement = if self.applied_displacement == 0.0 {
            let bounds = model.mesh.bounds();
            (frame.test_frame_bound(&bounds, 2, 1) - frame.test_frame_bound(&bounds, 2, 0)) * self.applied_strain
        } else {
            self.applied_displacement
        };
        model.apply_boundary_condition(FACE_Z1, PerId::All(s2), PerId::All(displacement), "top_displacement")?;

        // sides
        if self.confine_sides {
            model
                .apply_boundary_condition(FACE_X0, PerId::All(s0), PerId::All(0.0), "face_x0_fixed")?
                .apply_boundary_condition(FACE_X1, PerId::All(s0), PerId::All(0.0), "face_x1_fixed")?
                .apply_boundary_condition(FACE_Y0, PerId::All(s1), PerId::All(0.0), "face_y0_fixed")?
                .apply_boundary_condition(FACE_Y1, PerId::All(s1), PerId::All(0.0), "face_y1_fixed")?;
        }
        Ok(())
    }

    fn convergence_constraint(&self) -> &'static str {
        "top_displacement"
    }

    fn post_processing_sets(&self) -> &'static [&'static str] {
        &[FACE_Z1, FACE_Z0]
    }
}

impl fmt::Display for Compression {
    /// Prints the parameters (one per line)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "applied_strain = {:?}", self.applied_strain)?;
        writeln!(f, "applied_displacement = {:?}", self.applied_displacement)?;
        writeln!(f, "top_surface_contact_friction = {}", self.top_surface_contact_friction)?;
        writeln!(f, "bottom_surface_contact_friction = {}", self.bottom_surface_contact_friction)?;
        writeln!(f, "confine_sides = {}", self.confine_sides)?;
        writeln!(f, "pin = {}", self.pin)?;
        writeln!(f, "pin_cell_closest_to_xy_center = {}", self.pin_cell_closest_to_xy_center)?;
        writeln!(f, "pin_cell_id = {}", self.pin_cell_id)?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
