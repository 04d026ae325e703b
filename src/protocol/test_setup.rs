use crate::base::{MaterialId, Mesh, TestFrame, FACE_X0, FACE_X1, FACE_Y0, FACE_Y1, FACE_Z0, FACE_Z1};
use crate::locate::{
    associated_elements, find_nodes_on_plane, find_nodes_on_visible_surface,
    find_nodes_on_visible_surface_within_depth,
};
use crate::model::Model;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Holds the options shared by all mechanical tests
///
/// The options select the test axis and how the axial (top and bottom) faces are found.
/// By default, the axial faces are the planes at the extremes of the mesh along the test
/// axis. With an uneven surface, the face is the surface visible from outside along the
/// test axis instead, optionally limited to a maximum depth.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TestSetup {
    /// Test axis (0 = x, 1 = y, 2 = z); taken modulo 3
    pub test_axis: i32,

    /// Finds the top face as the visible surface
    pub uneven_top_surface: bool,

    /// Limits the visible top surface search to a maximum depth
    pub use_top_surface_maximum_depth: bool,

    /// Maximum depth of the visible top surface search
    pub top_surface_maximum_depth: f64,

    /// Finds the bottom face as the visible surface
    pub uneven_bottom_surface: bool,

    /// Limits the visible bottom surface search to a maximum depth
    pub use_bottom_surface_maximum_depth: bool,

    /// Maximum depth of the visible bottom surface search
    pub bottom_surface_maximum_depth: f64,

    /// Restricts the top face to the cells of this material
    pub top_constraint_specific_material: Option<MaterialId>,

    /// Restricts the bottom face to the cells of this material
    pub bottom_constraint_specific_material: Option<MaterialId>,
}

impl TestSetup {
    /// Allocates a new instance with default values (test axis along z; even surfaces)
    pub fn new() -> Self {
        TestSetup {
            test_axis: 2,
            uneven_top_surface: false,
            use_top_surface_maximum_depth: false,
            top_surface_maximum_depth: 0.0,
            uneven_bottom_surface: false,
            use_bottom_surface_maximum_depth: false,
            bottom_surface_maximum_depth: 0.0,
            top_constraint_specific_material: None,
            bottom_constraint_specific_material: None,
        }
    }

    /// Sets the test axis (any integer is accepted and taken modulo 3)
    pub fn set_test_axis(&mut self, axis: i32) -> &mut Self {
        self.test_axis = axis.rem_euclid(3);
        self
    }

    /// Sets an uneven top surface
    pub fn set_uneven_top_surface(&mut self, flag: bool) -> &mut Self {
        self.uneven_top_surface = flag;
        self
    }

    /// Sets an uneven bottom surface
    pub fn set_uneven_bottom_surface(&mut self, flag: bool) -> &mut Self {
        self.uneven_bottom_surface = flag;
        self
    }

    /// Sets the maximum depth of the uneven top surface search (and enables it)
    pub fn set_top_surface_maximum_depth(&mut self, depth: f64) -> Result<&mut Self, StrError> {
        if depth < 0.0 {
            return Err("top surface maximum depth must be ≥ 0.0");
        }
        self.use_top_surface_maximum_depth = true;
        self.top_surface_maximum_depth = depth;
        Ok(self)
    }

    /// Sets the maximum depth of the uneven bottom surface search (and enables it)
    pub fn set_bottom_surface_maximum_depth(&mut self, depth: f64) -> Result<&mut Self, StrError> {
        if depth < 0.0 {
            return Err("bottom surface maximum depth must be ≥ 0.0");
        }
        self.use_bottom_surface_maximum_depth = true;
        self.bottom_surface_maximum_depth = depth;
        Ok(self)
    }

    /// Restricts the top face to a material (`None` = any material)
    pub fn set_top_constraint_specific_material(&mut self, material: Option<MaterialId>) -> &mut Self {
        self.top_constraint_specific_material = material;
        self
    }

    /// Restricts the bottom face to a material (`None` = any material)
    pub fn set_bottom_constraint_specific_material(&mut self, material: Option<MaterialId>) -> &mut Self {
        self.bottom_constraint_specific_material = material;
        self
    }

    /// Validates values that may have been read from a file
    pub fn validate(&self) -> Result<(), StrError> {
        if self.top_surface_maximum_depth < 0.0 {
            return Err("top surface maximum depth must be ≥ 0.0");
        }
        if self.bottom_surface_maximum_depth < 0.0 {
            return Err("bottom surface maximum depth must be ≥ 0.0");
        }
        Ok(())
    }

    /// Returns the frame corresponding to the test axis
    pub fn frame(&self) -> TestFrame {
        TestFrame::new(self.test_axis)
    }

    /// Finds the nodes of the bottom (polarity 0) or top (polarity 1) face
    fn axial_face_nodes(&self, mesh: &Mesh, frame: &TestFrame, polarity: usize) -> Vec<usize> {
        let (uneven, use_depth, depth, material) = if polarity == 0 {
            (
                self.uneven_bottom_surface,
                self.use_bottom_surface_maximum_depth,
                self.bottom_surface_maximum_depth,
                self.bottom_constraint_specific_material,
            )
        } else {
            (
                self.uneven_top_surface,
                self.use_top_surface_maximum_depth,
                self.top_surface_maximum_depth,
                self.top_constraint_specific_material,
            )
        };
        if uneven {
            let normal = frame.axial_normal(polarity);
            if use_depth {
                find_nodes_on_visible_surface_within_depth(mesh, &normal, depth, material)
            } else {
                find_nodes_on_visible_surface(mesh, &normal, material)
            }
        } else {
            let bounds = mesh.bounds();
            let value = frame.test_frame_bound(&bounds, 2, polarity);
            find_nodes_on_plane(mesh, frame.data_frame_sense(2), value, material)
        }
    }

    /// Adds the six face node sets and their associated element sets to the model
    ///
    /// The faces are named in the test frame: face_z0 and face_z1 are the bottom and top
    /// faces along the test axis; face_x0, face_x1, face_y0, and face_y1 are the lateral
    /// faces at the extremes along the test frame senses 0 and 1.
    pub fn add_face_sets(&self, model: &mut Model<'_>) {
        let mesh = model.mesh;
        let frame = self.frame();
        let bounds = mesh.bounds();
        let lateral = |sense: i32, polarity: usize| {
            find_nodes_on_plane(
                mesh,
                frame.data_frame_sense(sense),
                frame.test_frame_bound(&bounds, sense, polarity),
                None,
            )
        };
        let faces = [
            (FACE_Z0, self.axial_face_nodes(mesh, &frame, 0)),
            (FACE_Z1, self.axial_face_nodes(mesh, &frame, 1)),
            (FACE_X0, lateral(0, 0)),
            (FACE_X1, lateral(0, 1)),
            (FACE_Y0, lateral(1, 0)),
            (FACE_Y1, lateral(1, 1)),
        ];
        for (name, nodes) in faces {
            if nodes.is_empty() {
                warn!(face = name, "no nodes found on face");
            }
            debug!(face = name, count = nodes.len(), "face set");
            let elements = associated_elements(mesh, &nodes);
            model.set_node_set(name, nodes).set_element_set(name, elements);
        }
    }
}

impl Default for TestSetup {
    fn default() -> Self {
        TestSetup::new()
    }
}

/// Formats an optional material id
pub(crate) fn material_name(material: Option<MaterialId>) -> String {
    match material {
        Some(m) => format!("{}", m),
        None => "all".to_string(),
    }
}

impl fmt::Display for TestSetup {
    /// Prints the settings (one per line)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "test_axis = {}", self.frame())?;
        writeln!(
            f,
            "top_constraint_specific_material = {}",
            material_name(self.top_constraint_specific_material)
        )?;
        writeln!(
            f,
            "bottom_constraint_specific_material = {}",
            material_name(self.bottom_constraint_specific_material)
        )?;
        writeln!(f, "uneven_top_surface = {}", self.uneven_top_surface)?;
        if self.uneven_top_surface {
            writeln!(f, "use_top_surface_maximum_depth = {}", self.use_top_surface_maximum_depth)?;
            if self.use_top_surface_maximum_depth {
                writeln!(f, "top_surface_maximum_depth = {:?}", self.top_surface_maximum_depth)?;
            }
        }
        writeln!(f, "uneven_bottom_surface = {}", self.uneven_bottom_surface)?;
        if self.uneven_bottom_surface {
            writeln!(f, "use_bottom_surface_maximum_depth = {}", self.use_bottom_surface_maximum_depth)?;
            if self.use_bottom_surface_maximum_depth {
                writeln!(f, "bottom_surface_maximum_depth = {:?}", self.bottom_surface_maximum_depth)?;
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
