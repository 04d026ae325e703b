use super::{rotation_center_about, MechanicalTest};
use crate::base::{Bounds, TestFrame, FACE_Z0, FACE_Z1};
use crate::constraint::{create_boundary_condition, PerId};
use crate::model::Model;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds the parameters of a torsion test
///
/// The bottom face is fixed and the top face is rotated about an axis parallel to the
/// test axis; the top face is kept at its axial position.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Torsion {
    /// Rotation angle of the top face (radians, counterclockwise about the test axis)
    pub twist_angle: f64,

    /// Point of the twist axis (lateral coordinates in the test frame)
    pub twist_axis_origin: [f64; 2],
}

impl Torsion {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Torsion {
            twist_angle: 1.0_f64.to_radians(),
            twist_axis_origin: [0.0, 0.0],
        }
    }

    /// Sets the twist angle (radians)
    pub fn set_twist_angle(&mut self, angle: f64) -> &mut Self {
        self.twist_angle = angle;
        self
    }

    /// Sets the point of the twist axis
    pub fn set_twist_axis_origin(&mut self, x: f64, y: f64) -> &mut Self {
        self.twist_axis_origin = [x, y];
        self
    }

    /// Returns the lateral displacement of a point at (x, y) due to the twist
    pub fn lateral_displacement(&self, x: f64, y: f64) -> [f64; 2] {
        let (sin, cos) = self.twist_angle.sin_cos();
        let s = [x - self.twist_axis_origin[0], y - self.twist_axis_origin[1]];
        let r = [cos * s[0] - sin * s[1], sin * s[0] + cos * s[1]];
        [r[0] - s[0], r[1] - s[1]]
    }
}

impl Default for Torsion {
    fn default() -> Self {
        Torsion::new()
    }
}

impl MechanicalTest for Torsion {
    fn name(&self) -> &'static str {
        "Torsion"
    }

    fn add_constraints(&self, model: &mut Model<'_>, frame: &TestFrame) -> Result<(), StrError> {
        let (s0, s1, s2) = (frame.data_frame_sense(0), frame.data_frame_sense(1), frame.data_frame_sense(2));
        model
            .fix_nodes(FACE_Z0, "bottom_fixed")?
            .apply_boundary_condition(FACE_Z1, PerId::All(s2), PerId::All(0.0), "top_fixed")?;
        let top = model.node_set(FACE_Z1)?;
        let mut nodes = Vec::with_capacity(2 * top.len());
        let mut senses = Vec::with_capacity(2 * top.len());
        let mut values = Vec::with_capacity(2 * top.len());
        for p in top {
            let x = frame.to_test_frame(&model.mesh.points[*p].coords);
            let u = self.lateral_displacement(x[0], x[1]);
            nodes.extend_from_slice(&[*p, *p]);
            senses.extend_from_slice(&[s0, s1]);
            values.extend_from_slice(&u);
        }
        let constraint = create_boundary_condition(&nodes, PerId::Each(senses), PerId::Each(values), "top_displacement")?;
        model.constraints.add_or_merge(constraint)?;
        Ok(())
    }

    fn convergence_constraint(&self) -> &'static str {
        "top_displacement"
    }

    fn post_processing_sets(&self) -> &'static [&'static str] {
        &[FACE_Z1, FACE_Z0]
    }

    fn rotation_center(&self, bounds: &Bounds, frame: &TestFrame) -> Option<[f64; 3]> {
        Some(rotation_center_about(&self.twist_axis_origin, bounds, frame))
    }
}

impl fmt::Display for Torsion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "twist_angle = {:?}", self.twist_angle)?;
        writeln!(
            f,
            "twist_axis_origin = ({:?}, {:?})",
            self.twist_axis_origin[0], self.twist_axis_origin[1]
        )?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
