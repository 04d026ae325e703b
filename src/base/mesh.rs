use super::NNODE_VOXEL;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fmt;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Defines the index of a point in the mesh
pub type PointId = usize;

/// Defines the index of a cell in the mesh
pub type CellId = usize;

/// Defines the material identifier attached to cells (image label)
pub type MaterialId = usize;

/// Holds the bounding box as (xmin, xmax, ymin, ymax, zmin, zmax)
pub type Bounds = [f64; 6];

/// Bounds of an empty selection (every min is +∞ and every max is -∞)
pub const EMPTY_BOUNDS: Bounds = [
    f64::INFINITY,
    f64::NEG_INFINITY,
    f64::INFINITY,
    f64::NEG_INFINITY,
    f64::INFINITY,
    f64::NEG_INFINITY,
];

/// Holds the id and coordinates of a point
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Point {
    /// Identification number which equals the index of the point in the mesh
    pub id: PointId,

    /// Point coordinates (x, y, z)
    pub coords: [f64; 3],
}

/// Holds a voxel cell
///
/// The local numbering of the corners follows the voxel convention:
///
/// ```text
/// corner = i + 2 j + 4 k
///
///       6--------7
///      /|       /|
///     4--------5 |          z  y
///     | 2------|-3          | /
///     |/       |/           |/
///     0--------1            .--x
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Cell {
    /// Identification number which equals the index of the cell in the mesh
    pub id: CellId,

    /// Material identifier
    pub material_id: MaterialId,

    /// List of points defining this cell (in the voxel corner order)
    pub points: [PointId; NNODE_VOXEL],
}

/// Holds a hexahedral (voxel) mesh
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Mesh {
    /// All points
    pub points: Vec<Point>,

    /// All cells
    pub cells: Vec<Cell>,
}

/// Returns true if the bounds correspond to an empty selection
pub fn bounds_are_empty(bounds: &Bounds) -> bool {
    bounds[0] > bounds[1] || bounds[2] > bounds[3] || bounds[4] > bounds[5]
}

/// Extends the bounds to include a point
#[inline]
pub(crate) fn extend_bounds(bounds: &mut Bounds, x: &[f64; 3]) {
    for i in 0..3 {
        if x[i] < bounds[2 * i] {
            bounds[2 * i] = x[i];
        }
        if x[i] > bounds[2 * i + 1] {
            bounds[2 * i + 1] = x[i];
        }
    }
}

impl Mesh {
    /// Checks that ids match indices and that cells reference existing points
    pub fn check(&self) -> Result<(), StrError> {
        for (index, point) in self.points.iter().enumerate() {
            if point.id != index {
                return Err("point id must equal its index in the points array");
            }
        }
        let npoint = self.points.len();
        for (index, cell) in self.cells.iter().enumerate() {
            if cell.id != index {
                return Err("cell id must equal its index in the cells array");
            }
            if cell.points.iter().any(|p| *p >= npoint) {
                return Err("cell references a point that does not exist");
            }
        }
        Ok(())
    }

    /// Returns the bounding box of all points
    pub fn bounds(&self) -> Bounds {
        let mut bounds = EMPTY_BOUNDS;
        for point in &self.points {
            extend_bounds(&mut bounds, &point.coords);
        }
        bounds
    }

    /// Returns the bounding box of a cell
    pub fn cell_bounds(&self, cell: &Cell) -> Bounds {
        let mut bounds = EMPTY_BOUNDS;
        for p in &cell.points {
            extend_bounds(&mut bounds, &self.points[*p].coords);
        }
        bounds
    }

    /// Returns the center of the bounding box of a cell
    pub fn cell_center(&self, cell: &Cell) -> [f64; 3] {
        let b = self.cell_bounds(cell);
        [(b[0] + b[1]) / 2.0, (b[2] + b[3]) / 2.0, (b[4] + b[5]) / 2.0]
    }

    /// Flags the points that are corners of at least one cell of the given material
    ///
    /// `None` means any material.
    pub fn point_mask(&self, material: Option<MaterialId>) -> Vec<bool> {
        let mut mask = vec![false; self.points.len()];
        for cell in &self.cells {
            if let Some(m) = material {
                if cell.material_id != m {
                    continue;
                }
            }
            for p in &cell.points {
                mask[*p] = true;
            }
        }
        mask
    }

    /// Returns the sorted list of distinct material ids
    pub fn material_ids(&self) -> Vec<MaterialId> {
        let mut ids: Vec<_> = self.cells.iter().map(|c| c.material_id).collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Reads a JSON file containing the mesh
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open mesh file")?;
        let buffered = BufReader::new(input);
        let mesh: Mesh = serde_json::from_reader(buffered).map_err(|_| "cannot parse mesh file")?;
        mesh.check()?;
        Ok(mesh)
    }

    /// Writes a JSON file with the mesh
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
        let mut file = File::create(&path).map_err(|_| "cannot create mesh file")?;
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write mesh file")?;
        Ok(())
    }
}

impl fmt::Display for Mesh {
    /// Prints a short summary of the mesh
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.bounds();
        writeln!(f, "Voxel mesh")?;
        writeln!(f, "==========")?;
        writeln!(f, "number of points = {}", self.points.len())?;
        writeln!(f, "number of cells = {}", self.cells.len())?;
        writeln!(f, "materials = {:?}", self.material_ids())?;
        if !bounds_are_empty(&b) {
            writeln!(f, "bounds = {:?}", b)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
