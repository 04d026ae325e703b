use crate::base::{MaterialId, Mesh};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Holds a material definition passed through to the solver
///
/// The parameters are not interpreted here.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Material {
    /// Unique name
    pub name: String,

    /// Solver-specific parameters
    #[serde(default)]
    pub parameters: serde_json::Value,
}

/// Maps material ids (cell labels) to material definitions
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MaterialTable {
    materials: BTreeMap<MaterialId, Material>,
}

impl MaterialTable {
    /// Allocates a new empty table
    pub fn new() -> Self {
        MaterialTable {
            materials: BTreeMap::new(),
        }
    }

    /// Generates a table with one material per distinct material id of the mesh
    ///
    /// The materials are named "material_<id>" and have no parameters.
    pub fn homogeneous(mesh: &Mesh) -> Self {
        let mut table = MaterialTable::new();
        for id in mesh.material_ids() {
            table.materials.insert(
                id,
                Material {
                    name: format!("material_{}", id),
                    parameters: serde_json::Value::Null,
                },
            );
        }
        table
    }

    /// Adds (or replaces) the material with the given id
    ///
    /// Returns an error if another id already uses the same name.
    pub fn add(&mut self, id: MaterialId, material: Material) -> Result<&mut Self, StrError> {
        if self.materials.iter().any(|(i, m)| *i != id && m.name == material.name) {
            return Err("material names must be unique");
        }
        self.materials.insert(id, material);
        Ok(self)
    }

    /// Returns the material with the given id
    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(&id)
    }

    /// Returns the number of materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Returns true if the table is empty
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Returns the material ids of the mesh that have no entry in the table
    pub fn missing_ids(&self, mesh: &Mesh) -> Vec<MaterialId> {
        mesh.material_ids()
            .into_iter()
            .filter(|id| !self.materials.contains_key(id))
            .collect()
    }

    /// Reads a JSON file containing the material table
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open material table file")?;
        let buffered = BufReader::new(input);
        let table: MaterialTable = serde_json::from_reader(buffered).map_err(|_| "cannot parse material table file")?;
        let mut names: Vec<_> = table.materials.values().map(|m| m.name.as_str()).collect();
        names.sort();
        let n = names.len();
        names.dedup();
        if names.len() != n {
            return Err("material names must be unique");
        }
        Ok(table)
    }
}

impl fmt::Display for MaterialTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, material) in &self.materials {
            writeln!(f, "{}: {}", id, material.name)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Material, MaterialTable};
    use crate::base::Samples;
    use serde_json::json;

    #[test]
    fn homogeneous_works() {
        let mesh = Samples::step_two_materials();
        let table = MaterialTable::homogeneous(&mesh);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(200).unwrap().name, "material_200");
        assert_eq!(format!("{}", table), "100: material_100\n200: material_200\n");
        assert_eq!(table.missing_ids(&mesh).len(), 0);
    }

    #[test]
    fn add_works() {
        let mesh = Samples::step_two_materials();
        let mut table = MaterialTable::new();
        assert!(table.is_empty());
        let bone = Material {
            name: "bone".to_string(),
            parameters: json!({"young": 6829.0, "poisson": 0.3}),
        };
        table.add(100, bone.clone()).unwrap();
        assert_eq!(table.missing_ids(&mesh), &[200]);
        assert_eq!(table.add(200, bone.clone()).err(), Some("material names must be unique"));
        // replacing the same id is fine
        table.add(100, bone).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn serialize_works() {
        let json = r#"{"1":{"name":"bone","parameters":{"young":10.0}},"2":{"name":"marrow"}}"#;
        let table: MaterialTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(2).unwrap().parameters, serde_json::Value::Null);
        assert_eq!(table.get(1).unwrap().parameters["young"], 10.0);
    }
}
