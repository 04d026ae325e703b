use super::MechanicalTest;
use crate::base::{TestFrame, FACE_Z0, FACE_Z1};
use crate::constraint::PerId;
use crate::model::Model;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds the parameters of a directional shear test
///
/// The bottom face is fixed and the top face is displaced laterally along the shear vector
/// while kept at its axial position.
///
/// ```text
///       → → → → →      top_displacement
///      ┌──────────────┐
///     /              /
///    /              /
///   └──────────────┘
///     △  △  △  △  △    bottom_fixed
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DirectionalShear {
    /// Lateral displacement (or strain if scaled) of the top face in the test frame
    pub shear_vector: [f64; 2],

    /// Multiplies the shear vector by the height of the specimen
    pub scale_shear_to_height: bool,
}

impl DirectionalShear {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        DirectionalShear {
            shear_vector: [0.01, 0.0],
            scale_shear_to_height: true,
        }
    }

    /// Sets the shear vector
    pub fn set_shear_vector(&mut self, v0: f64, v1: f64) -> &mut Self {
        self.shear_vector = [v0, v1];
        self
    }

    /// Sets whether the shear vector is multiplied by the height of the specimen
    pub fn set_scale_shear_to_height(&mut self, flag: bool) -> &mut Self {
        self.scale_shear_to_height = flag;
        self
    }
}

impl Default for DirectionalShear {
    fn default() -> Self {
        DirectionalShear::new()
    }
}

impl MechanicalTest for DirectionalShear {
    fn name(&self) -> &'static str {
        "DirectionalShear"
    }

    fn add_constraints(&self, model: &mut Model<'_>, frame: &TestFrame) -> Result<(), StrError> {
        let (s0, s1, s2) = (frame.data_frame_sense(0), frame.data_frame_sense(1), frame.data_frame_sense(2));
        let scale = if self.scale_shear_to_height {
            let bounds = model.mesh.bounds();
            frame.test_frame_bound(&bounds, 2, 1) - frame.test_frame_bound(&bounds, 2, 0)
        } else {
            1.0
        };
        let v = [self.shear_vector[0] * scale, self.shear_vector[1] * scale];
        model
            .fix_nodes(FACE_Z0, "bottom_fixed")?
            .apply_boundary_condition(FACE_Z1, PerId::All(s2), PerId::All(0.0), "top_fixed")?
            .apply_boundary_condition(FACE_Z1, PerId::All(s0), PerId::All(v[0]), "top_displacement")?
            .apply_boundary_condition(FACE_Z1, PerId::All(s1), PerId::All(v[1]), "top_displacement")?;
        Ok(())
    }

    fn convergence_constraint(&self) -> &'static str {
        "top_displacement"
    }

    fn post_processing_sets(&self) -> &'static [&'static str] {
        &[FACE_Z1, FACE_Z0]
    }
}

impl fmt::Display for DirectionalShear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "shear_vector = ({:?}, {:?})",
            self.shear_vector[0], self.shear_vector[1]
        )?;
        writeln!(f, "scale_shear_to_height = {}", self.scale_shear_to_height)?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
