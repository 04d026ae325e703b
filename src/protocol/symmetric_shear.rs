use super::MechanicalTest;
use crate::base::{TestFrame, FACE_X0, FACE_X1, FACE_Y0, FACE_Y1, FACE_Z0, FACE_Z1};
use crate::constraint::{create_boundary_condition, PerId};
use crate::model::Model;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds the parameters of a symmetric shear test
///
/// The four lateral faces are displaced such that the specimen undergoes a pure shear
/// in the lateral plane of the test frame.
///
/// ```text
///          ↑ → → → →
///        y1 ┌──────┐ ↗
///         ↑ │      │ ↑
///         ↑ │      │ ↑
///        y0 └──────┘ ↑
///           x0 → → x1
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SymmetricShear {
    /// Engineering shear strain (each lateral direction takes half of it)
    pub shear_strain: f64,

    /// Prevents the lateral faces from moving along the test axis
    pub confine_sides_vertically: bool,

    /// Prevents the top and bottom faces from moving along the test axis
    pub confine_top_and_bottom_vertically: bool,
}

impl SymmetricShear {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        SymmetricShear {
            shear_strain: 0.01,
            confine_sides_vertically: true,
            confine_top_and_bottom_vertically: true,
        }
    }

    /// Sets the shear strain
    pub fn set_shear_strain(&mut self, value: f64) -> &mut Self {
        self.shear_strain = value;
        self
    }

    /// Sets the vertical confinement of the lateral faces and of the top and bottom faces
    pub fn set_confinement(&mut self, sides: bool, top_and_bottom: bool) -> &mut Self {
        self.confine_sides_vertically = sides;
        self.confine_top_and_bottom_vertically = top_and_bottom;
        self
    }
}

impl Default for SymmetricShear {
    fn default() -> Self {
        SymmetricShear::new()
    }
}

impl MechanicalTest for SymmetricShear {
    fn name(&self) -> &'static str {
        "SymmetricShear"
    }

    fn add_constraints(&self, model: &mut Model<'_>, frame: &TestFrame) -> Result<(), StrError> {
        let (s0, s1, s2) = (frame.data_frame_sense(0), frame.data_frame_sense(1), frame.data_frame_sense(2));
        let bounds = model.mesh.bounds();
        let (x0, x1) = (frame.test_frame_bound(&bounds, 0, 0), frame.test_frame_bound(&bounds, 0, 1));
        let (y0, y1) = (frame.test_frame_bound(&bounds, 1, 0), frame.test_frame_bound(&bounds, 1, 1));
        let f = self.shear_strain / 2.0;

        // lateral displacements of face i given the test frame coordinates (x, y) of a node
        let displacement = |i: usize, x: f64, y: f64| match i {
            0 => [f * (y - y0), 0.0],
            1 => [f * (y - y0), f * (x1 - x0)],
            2 => [0.0, f * (x - x0)],
            _ => [f * (y1 - y0), f * (x - x0)],
        };
        let faces = [
            (FACE_X0, "face_x0_lateral"),
            (FACE_X1, "face_x1_lateral"),
            (FACE_Y0, "face_y0_lateral"),
            (FACE_Y1, "face_y1_lateral"),
        ];
        for (i, (face, name)) in faces.iter().enumerate() {
            let face_nodes = model.node_set(face)?;
            let mut nodes = Vec::with_capacity(2 * face_nodes.len());
            let mut senses = Vec::with_capacity(2 * face_nodes.len());
            let mut values = Vec::with_capacity(2 * face_nodes.len());
            for p in face_nodes {
                let x = frame.to_test_frame(&model.mesh.points[*p].coords);
                nodes.extend_from_slice(&[*p, *p]);
                senses.extend_from_slice(&[s0, s1]);
                values.extend_from_slice(&displacement(i, x[0], x[1]));
            }
            let constraint = create_boundary_condition(&nodes, PerId::Each(senses), PerId::Each(values), name)?;
            model.constraints.add_or_merge(constraint)?;
        }

        if self.confine_sides_vertically {
            model
                .apply_boundary_condition(FACE_X0, PerId::All(s2), PerId::All(0.0), "face_x0_vertical")?
                .apply_boundary_condition(FACE_X1, PerId::All(s2), PerId::All(0.0), "face_x1_vertical")?
                .apply_boundary_condition(FACE_Y0, PerId::All(s2), PerId::All(0.0), "face_y0_vertical")?
                .apply_boundary_condition(FACE_Y1, PerId::All(s2), PerId::All(0.0), "face_y1_vertical")?;
        }
        if self.confine_top_and_bottom_vertically {
            model
                .apply_boundary_condition(FACE_Z0, PerId::All(s2), PerId::All(0.0), "face_z0_vertical")?
                .apply_boundary_condition(FACE_Z1, PerId::All(s2), PerId::All(0.0), "face_z1_vertical")?;
        }
        Ok(())
    }

    fn convergence_constraint(&self) -> &'static str {
        "face_y0_lateral"
    }

    fn post_processing_sets(&self) -> &'static [&'static str] {
        &[FACE_X0, FACE_X1, FACE_Y0, FACE_Y1]
    }
}

impl fmt::Display for SymmetricShear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "shear_strain = {:?}", self.shear_strain)?;
        writeln!(f, "confine_sides_vertically = {}", self.confine_sides_vertically)?;
        writeln!(
            f,
            "confine_top_and_bottom_vertically = {}",
            self.confine_top_and_bottom_vertically
        )?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::SymmetricShear;
    use crate::base::{compare_constraint, Samples};
    use crate::model::MaterialTable;
    use crate::protocol::{apply_test, TestSetup};

    #[test]
    fn unconfined_works() {
        let mesh = Samples::two_voxels();
        let materials = MaterialTable::homogeneous(&mesh);
        let mut test = SymmetricShear::new();
        test.set_confinement(false, false);
        let model = apply_test(&mesh, &materials, &TestSetup::new(), &test).unwrap();
        assert_eq!(
            model.constraints.names(),
            &["face_x0_lateral", "face_x1_lateral", "face_y0_lateral", "face_y1_lateral"]
        );
        let senses = [0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1];
        let h = 0.005;
        compare_constraint(
            model.constraints.get("face_x0_lateral").unwrap(),
            &[0, 0, 2, 2, 4, 4, 6, 6, 8, 8, 10, 10],
            &senses,
            &[0.0, 0.0, h, 0.0, 0.0, 0.0, h, 0.0, 0.0, 0.0, h, 0.0],
        );
        compare_constraint(
            model.constraints.get("face_x1_lateral").unwrap(),
            &[1, 1, 3, 3, 5, 5, 7, 7, 9, 9, 11, 11],
            &senses,
            &[0.0, h, h, h, 0.0, h, h, h, 0.0, h, h, h],
        );
        compare_constraint(
            model.constraints.get("face_y0_lateral").unwrap(),
            &[0, 0, 1, 1, 4, 4, 5, 5, 8, 8, 9, 9],
            &senses,
            &[0.0, 0.0, 0.0, h, 0.0, 0.0, 0.0, h, 0.0, 0.0, 0.0, h],
        );
        compare_constraint(
            model.constraints.get("face_y1_lateral").unwrap(),
            &[2, 2, 3, 3, 6, 6, 7, 7, 10, 10, 11, 11],
            &senses,
            &[h, 0.0, h, h, h, 0.0, h, h, h, 0.0, h, h],
        );
        let set = model.convergence_set.as_ref().unwrap();
        assert_eq!(set.len(), 12);
        assert_eq!(
            model.post_processing_node_sets,
            &["face_x0", "face_x1", "face_y0", "face_y1"]
        );
    }

    #[test]
    fn confined_works() {
        let mesh = Samples::two_voxels();
        let materials = MaterialTable::homogeneous(&mesh);
        let model = apply_test(&mesh, &materials, &TestSetup::new(), &SymmetricShear::new()).unwrap();
        assert_eq!(model.constraints.len(), 10);
        compare_constraint(
            model.constraints.get("face_y1_vertical").unwrap(),
            &[2, 3, 6, 7, 10, 11],
            &[2; 6],
            &[0.0; 6],
        );
        compare_constraint(model.constraints.get("face_z0_vertical").unwrap(), &[0, 1, 2, 3], &[2; 4], &[0.0; 4]);
        compare_constraint(model.constraints.get("face_z1_vertical").unwrap(), &[8, 9, 10, 11], &[2; 4], &[0.0; 4]);
    }

    #[test]
    fn display_works() {
        let test = SymmetricShear::new();
        assert_eq!(
            format!("{}", test),
            "shear_strain = 0.01\n\
             confine_sides_vertically = true\n\
             confine_top_and_bottom_vertically = true\n"
        );
    }
}
