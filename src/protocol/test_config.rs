use super::{apply_test, Bending, Compression, DirectionalShear, MechanicalTest, SymmetricShear, Torsion, TestSetup};
use crate::base::Mesh;
use crate::model::{MaterialTable, Model};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Selects the loading mode of a mechanical test
///
/// In JSON, the variant is given by the "type" key, e.g.,
/// `{"type": "Compression", "applied_strain": -0.02}`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum TestKind {
    Compression(Compression),
    Bending(Bending),
    Torsion(Torsion),
    DirectionalShear(DirectionalShear),
    SymmetricShear(SymmetricShear),
}

impl TestKind {
    /// Returns the loading mode as a trait object
    pub fn as_test(&self) -> &dyn MechanicalTest {
        match self {
            TestKind::Compression(t) => t,
            TestKind::Bending(t) => t,
            TestKind::Torsion(t) => t,
            TestKind::DirectionalShear(t) => t,
            TestKind::SymmetricShear(t) => t,
        }
    }
}

/// Holds the configuration of a mechanical test as read from a file
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TestConfig {
    /// Options shared by all tests
    #[serde(default)]
    pub setup: TestSetup,

    /// Loading mode
    pub test: TestKind,
}

impl TestConfig {
    /// Allocates a new instance
    pub fn new(setup: TestSetup, test: TestKind) -> Self {
        TestConfig { setup, test }
    }

    /// Generates the model by applying the test to a mesh
    pub fn apply<'a>(&self, mesh: &'a Mesh, materials: &'a MaterialTable) -> Result<Model<'a>, StrError> {
        apply_test(mesh, materials, &self.setup, self.test.as_test())
    }

    /// Reads a JSON file containing the test configuration
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open test configuration file")?;
        let buffered = BufReader::new(input);
        let config: TestConfig =
            serde_json::from_reader(buffered).map_err(|_| "cannot parse test configuration file")?;
        config.setup.validate()?;
        Ok(config)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{TestConfig, TestKind};
    use crate::base::Samples;
    use crate::model::MaterialTable;
    use crate::protocol::{Compression, Torsion, TestSetup};

    #[test]
    fn deserialize_works() {
        let json = r#"{
            "setup": {"test_axis": 0, "uneven_top_surface": true},
            "test": {"type": "Compression", "applied_strain": -0.05, "pin": true}
        }"#;
        let config: TestConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.setup.test_axis, 0);
        assert!(config.setup.uneven_top_surface);
        assert!(!config.setup.uneven_bottom_surface);
        let mut expected = Compression::new();
        expected.set_applied_strain(-0.05).set_pin(true);
        assert_eq!(config.test, TestKind::Compression(expected));
        assert_eq!(config.test.as_test().name(), "Compression");

        let json = r#"{"test": {"type": "Torsion"}}"#;
        let config: TestConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.setup, TestSetup::new());
        assert_eq!(config.test, TestKind::Torsion(Torsion::new()));

        let json = r#"{"test": {"type": "Stretching"}}"#;
        assert!(serde_json::from_str::<TestConfig>(json).is_err());
    }

    #[test]
    fn read_json_captures_errors() {
        assert_eq!(
            TestConfig::read_json("/tmp/bonebc/__does_not_exist__.json").err(),
            Some("cannot open test configuration file")
        );
    }

    #[test]
    fn apply_works() {
        let mesh = Samples::two_voxels();
        let materials = MaterialTable::homogeneous(&mesh);
        let config = TestConfig::new(TestSetup::new(), TestKind::Compression(Compression::new()));
        let model = config.apply(&mesh, &materials).unwrap();
        assert_eq!(model.name, "Compression");
        assert_eq!(model.constraints.len(), 2);
    }
}
