use super::{rotation_center_about, MechanicalTest};
use crate::base::{Bounds, PointId, TestFrame, FACE_Z0, FACE_Z1};
use crate::constraint::{create_boundary_condition, PerId};
use crate::model::Model;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds the parameters of a bending test
///
/// The top and bottom faces are rotated in opposite directions about the neutral axis,
/// a line in the lateral plane of the test frame. The faces are fixed laterally.
///
/// ```text
///        ↑ ↑         ↓ ↓   top_displacement
///    ┌────────┬────────┐
///    │        :        │
///    │        :        │   : neutral axis
///    │        :        │
///    └────────┴────────┘
///        ↓ ↓         ↑ ↑   bottom_displacement
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Bending {
    /// Angle of the neutral axis in the lateral plane (radians, from sense 0 of the test frame)
    pub neutral_axis_angle: f64,

    /// Total bending angle (radians); each face rotates by half of it
    pub bending_angle: f64,

    /// A point of the neutral axis (lateral coordinates in the test frame)
    pub neutral_axis_origin: [f64; 2],
}

impl Bending {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Bending {
            neutral_axis_angle: std::f64::consts::FRAC_PI_2,
            bending_angle: 1.0_f64.to_radians(),
            neutral_axis_origin: [0.0, 0.0],
        }
    }

    /// Sets the angle of the neutral axis (radians)
    pub fn set_neutral_axis_angle(&mut self, angle: f64) -> &mut Self {
        self.neutral_axis_angle = angle;
        self
    }

    /// Sets the bending angle (radians)
    pub fn set_bending_angle(&mut self, angle: f64) -> &mut Self {
        self.bending_angle = angle;
        self
    }

    /// Sets a point of the neutral axis
    pub fn set_neutral_axis_origin(&mut self, x: f64, y: f64) -> &mut Self {
        self.neutral_axis_origin = [x, y];
        self
    }

    /// Returns the signed distance of a lateral position from the neutral axis
    ///
    /// The distance is positive to the right of the axis (looking along its direction).
    pub fn signed_distance(&self, x: f64, y: f64) -> f64 {
        let nau = [self.neutral_axis_angle.cos(), self.neutral_axis_angle.sin()];
        let nao = &self.neutral_axis_origin;
        let dot = (x - nao[0]) * nau[0] + (y - nao[1]) * nau[1];
        let n = [x - (nao[0] + dot * nau[0]), y - (nao[1] + dot * nau[1])];
        n[0] * nau[1] - n[1] * nau[0]
    }

    /// Computes the axial displacements of the nodes of a face (top: sign = 1; bottom: sign = -1)
    fn axial_displacements(
        &self,
        model: &Model<'_>,
        frame: &TestFrame,
        face: &str,
        sign: f64,
    ) -> Result<(Vec<PointId>, Vec<f64>), StrError> {
        let slope = f64::tan(self.bending_angle / 2.0);
        let nodes = model.node_set(face)?.to_vec();
        let values = nodes
            .iter()
            .map(|p| {
                let x = frame.to_test_frame(&model.mesh.points[*p].coords);
                sign * slope * self.signed_distance(x[0], x[1])
            })
            .collect();
        Ok((nodes, values))
    }
}

impl Default for Bending {
    fn default() -> Self {
        Bending::new()
    }
}

impl MechanicalTest for Bending {
    fn name(&self) -> &'static str {
        "Bending"
    }

    fn add_constraints(&self, model: &mut Model<'_>, frame: &TestFrame) -> Result<(), StrError> {
        let (s0, s1, s2) = (frame.data_frame_sense(0), frame.data_frame_sense(1), frame.data_frame_sense(2));
        model
            .apply_boundary_condition(FACE_Z0, PerId::All(s0), PerId::All(0.0), "bottom_fixed")?
            .apply_boundary_condition(FACE_Z0, PerId::All(s1), PerId::All(0.0), "bottom_fixed")?
            .apply_boundary_condition(FACE_Z1, PerId::All(s0), PerId::All(0.0), "top_fixed")?
            .apply_boundary_condition(FACE_Z1, PerId::All(s1), PerId::All(0.0), "top_fixed")?;
        let (nodes, values) = self.axial_displacements(model, frame, FACE_Z1, 1.0)?;
        let top = create_boundary_condition(&nodes, PerId::All(s2), PerId::Each(values), "top_displacement")?;
        let (nodes, values) = self.axial_displacements(model, frame, FACE_Z0, -1.0)?;
        let bottom = create_boundary_condition(&nodes, PerId::All(s2), PerId::Each(values), "bottom_displacement")?;
        model.constraints.add_or_merge(top)?.add_or_merge(bottom)?;
        Ok(())
    }

    fn convergence_constraint(&self) -> &'static str {
        "top_displacement"
    }

    fn post_processing_sets(&self) -> &'static [&'static str] {
        &[FACE_Z1, FACE_Z0]
    }

    fn rotation_center(&self, bounds: &Bounds, frame: &TestFrame) -> Option<[f64; 3]> {
        Some(rotation_center_about(&self.neutral_axis_origin, bounds, frame))
    }
}

impl fmt::Display for Bending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "neutral_axis_angle = {:?}", self.neutral_axis_angle)?;
        writeln!(f, "bending_angle = {:?}", self.bending_angle)?;
        writeln!(
            f,
            "neutral_axis_origin = ({:?}, {:?})",
            self.neutral_axis_origin[0], self.neutral_axis_origin[1]
        )?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
