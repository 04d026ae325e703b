use super::MaterialTable;
use crate::base::{AppliedTo, CellId, Distribution, Mesh, PointId, CONVERGENCE_SET};
use crate::constraint::{
    create_applied_load, create_boundary_condition, create_fixed_nodes, distribute_constraint_to_nodes, Constraint,
    ConstraintCollection, PerId,
};
use crate::locate::associated_elements;
use crate::StrError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fmt;
use std::fs::{self, File};
use std::path::Path;

/// Holds a finite element model ready for a mechanical test
///
/// The geometry and material table are borrowed from the caller; the constraints and
/// the named node and element sets are generated by the test protocols.
#[derive(Clone, Debug, Serialize)]
pub struct Model<'a> {
    /// Name of the model
    pub name: String,

    /// Voxel mesh
    pub mesh: &'a Mesh,

    /// Material table
    pub materials: &'a MaterialTable,

    /// Constraints (fixed supports, prescribed displacements, and forces)
    pub constraints: ConstraintCollection,

    /// Named sets of point ids
    pub node_sets: BTreeMap<String, Vec<PointId>>,

    /// Named sets of cell ids
    pub element_sets: BTreeMap<String, Vec<CellId>>,

    /// Set used by the solver to monitor convergence (the reaction of a prescribed displacement)
    pub convergence_set: Option<Constraint>,

    /// Names of the node sets for post-processing
    pub post_processing_node_sets: Vec<String>,

    /// Names of the element sets for post-processing
    pub post_processing_element_sets: Vec<String>,

    /// Center of rotation for post-processing (bending and torsion)
    pub rotation_center: Option<[f64; 3]>,

    /// One line per operation that modified the model
    pub history: String,

    /// Free text describing the settings used to generate the model
    pub log: String,
}

impl<'a> Model<'a> {
    /// Allocates a new model without constraints
    pub fn new(mesh: &'a Mesh, materials: &'a MaterialTable) -> Self {
        Model {
            name: String::new(),
            mesh,
            materials,
            constraints: ConstraintCollection::new(),
            node_sets: BTreeMap::new(),
            element_sets: BTreeMap::new(),
            convergence_set: None,
            post_processing_node_sets: Vec::new(),
            post_processing_element_sets: Vec::new(),
            rotation_center: None,
            history: String::new(),
            log: String::new(),
        }
    }

    /// Adds (or replaces) a node set
    pub fn set_node_set(&mut self, name: &str, nodes: Vec<PointId>) -> &mut Self {
        self.node_sets.insert(name.to_string(), nodes);
        self
    }

    /// Adds (or replaces) an element set
    pub fn set_element_set(&mut self, name: &str, elements: Vec<CellId>) -> &mut Self {
        self.element_sets.insert(name.to_string(), elements);
        self
    }

    /// Returns the node set with the given name
    pub fn node_set(&self, name: &str) -> Result<&[PointId], StrError> {
        self.node_sets
            .get(name)
            .map(|s| s.as_slice())
            .ok_or("cannot find node set with the given name")
    }

    /// Returns the element set with the given name
    pub fn element_set(&self, name: &str) -> Result<&[CellId], StrError> {
        self.element_sets
            .get(name)
            .map(|s| s.as_slice())
            .ok_or("cannot find element set with the given name")
    }

    /// Returns the cells with at least one point in the named node set
    pub fn associated_elements_from_node_set(&self, name: &str) -> Result<Vec<CellId>, StrError> {
        Ok(associated_elements(self.mesh, self.node_set(name)?))
    }

    /// Prescribes displacements on the nodes of a node set
    ///
    /// If a constraint named `constraint_name` exists, the new entries are merged into it.
    pub fn apply_boundary_condition(
        &mut self,
        node_set_name: &str,
        sense: PerId<usize>,
        value: PerId<f64>,
        constraint_name: &str,
    ) -> Result<&mut Self, StrError> {
        let constraint = create_boundary_condition(self.node_set(node_set_name)?, sense, value, constraint_name)?;
        self.constraints.add_or_merge(constraint)?;
        Ok(self)
    }

    /// Fixes the nodes of a node set in all senses
    ///
    /// If a constraint named `constraint_name` exists, the new entries are merged into it.
    pub fn fix_nodes(&mut self, node_set_name: &str, constraint_name: &str) -> Result<&mut Self, StrError> {
        let constraint = create_fixed_nodes(self.node_set(node_set_name)?, constraint_name);
        self.constraints.add_or_merge(constraint)?;
        Ok(self)
    }

    /// Applies a total force evenly divided among the elements of an element set
    ///
    /// If a constraint named `constraint_name` exists, the new entries are merged into it.
    pub fn apply_load(
        &mut self,
        element_set_name: &str,
        distribution: Distribution,
        sense: usize,
        total_force: f64,
        constraint_name: &str,
    ) -> Result<&mut Self, StrError> {
        let elements = self.element_set(element_set_name)?;
        let force = if elements.is_empty() {
            0.0
        } else {
            total_force / (elements.len() as f64)
        };
        let constraint = create_applied_load(
            elements,
            PerId::All(distribution),
            PerId::All(sense),
            PerId::All(force),
            constraint_name,
        )?;
        self.constraints.add_or_merge(constraint)?;
        Ok(self)
    }

    /// Sets the convergence set from the named constraint
    ///
    /// Constraints applied to elements are first distributed to nodes. The convergence
    /// set is a copy of the constraint with the kind flipped (the solver monitors the
    /// reaction force of a prescribed displacement, and vice versa). Only values that
    /// are exactly zero count as zero.
    pub fn convergence_set_from_constraint(&mut self, constraint_name: &str) -> Result<&mut Self, StrError> {
        let constraint = self
            .constraints
            .get(constraint_name)
            .ok_or("cannot find constraint with the given name")?;
        let mut set = match constraint.applied_to {
            AppliedTo::Elements => distribute_constraint_to_nodes(self.mesh, constraint)?,
            AppliedTo::Nodes => constraint.clone(),
        };
        if set.all_values_zero() {
            return Err("convergence set requires a constraint with at least one nonzero value");
        }
        set.name = CONVERGENCE_SET.to_string();
        set.kind = set.kind.flipped();
        self.convergence_set = Some(set);
        Ok(self)
    }

    /// Appends one line to the history
    pub fn append_history(&mut self, line: &str) -> &mut Self {
        self.history.push_str(line);
        self.history.push('\n');
        self
    }

    /// Appends text to the log
    pub fn append_log(&mut self, text: &str) -> &mut Self {
        self.log.push_str(text);
        self
    }

    /// Writes a JSON file with the model
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create model file")?;
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write model file")?;
        Ok(())
    }
}

impl<'a> fmt::Display for Model<'a> {
    /// Prints a summary of the model
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model {}", self.name)?;
        writeln!(f, "{}", "=".repeat(6 + self.name.chars().count()))?;
        writeln!(f, "number of points = {}", self.mesh.points.len())?;
        writeln!(f, "number of cells = {}", self.mesh.cells.len())?;
        writeln!(f, "number of materials = {}", self.materials.len())?;
        writeln!(f, "node sets:")?;
        for (name, set) in &self.node_sets {
            writeln!(f, "    {} ({} nodes)", name, set.len())?;
        }
        writeln!(f, "element sets:")?;
        for (name, set) in &self.element_sets {
            writeln!(f, "    {} ({} elements)", name, set.len())?;
        }
        writeln!(f, "constraints:")?;
        for c in &self.constraints {
            writeln!(f, "    {} ({} {} entries)", c.name, c.len(), c.kind)?;
        }
        match &self.convergence_set {
            Some(c) => writeln!(f, "convergence set = {} entries", c.len())?,
            None => writeln!(f, "convergence set = none")?,
        }
        if let Some(x) = &self.rotation_center {
            writeln!(f, "rotation center = {:?}", x)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
