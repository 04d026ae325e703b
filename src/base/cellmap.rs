use super::MaterialId;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::ops::Range;
use std::path::Path;

/// Holds a labelled 3D image of cells indexed by (k, j, i)
///
/// A zero value means that there is no cell at that location; any other value is
/// the material id of the cell. The index i runs along x (fastest), j along y,
/// and k along z.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "Vec<Vec<Vec<MaterialId>>>", into = "Vec<Vec<Vec<MaterialId>>>")]
pub struct Cellmap {
    /// Dimensions (nk, nj, ni)
    shape: [usize; 3],

    /// Values stored with i being the fastest changing index
    values: Vec<MaterialId>,
}

impl Cellmap {
    /// Allocates a new instance with all cells set to the same value
    pub fn new(nk: usize, nj: usize, ni: usize, value: MaterialId) -> Self {
        Cellmap {
            shape: [nk, nj, ni],
            values: vec![value; nk * nj * ni],
        }
    }

    /// Returns the dimensions (nk, nj, ni)
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Returns the value at (k, j, i)
    pub fn get(&self, k: usize, j: usize, i: usize) -> MaterialId {
        self.values[self.index(k, j, i)]
    }

    /// Sets the value at (k, j, i)
    pub fn set(&mut self, k: usize, j: usize, i: usize, value: MaterialId) -> &mut Self {
        let index = self.index(k, j, i);
        self.values[index] = value;
        self
    }

    /// Sets the value of all cells within a box of ranges (k, j, i)
    ///
    /// Ranges are clipped to the dimensions of the map.
    pub fn set_box(&mut self, k: Range<usize>, j: Range<usize>, i: Range<usize>, value: MaterialId) -> &mut Self {
        let [nk, nj, ni] = self.shape;
        for kk in k.start..usize::min(k.end, nk) {
            for jj in j.start..usize::min(j.end, nj) {
                for ii in i.start..usize::min(i.end, ni) {
                    self.set(kk, jj, ii, value);
                }
            }
        }
        self
    }

    /// Returns the number of nonzero cells
    pub fn ncell(&self) -> usize {
        self.values.iter().filter(|v| **v != 0).count()
    }

    /// Reads a JSON file containing a nested `[k][j][i]` array of material ids
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open cellmap file")?;
        let buffered = BufReader::new(input);
        let cellmap = serde_json::from_reader(buffered).map_err(|_| "cannot parse cellmap file")?;
        Ok(cellmap)
    }

    #[inline]
    fn index(&self, k: usize, j: usize, i: usize) -> usize {
        (k * self.shape[1] + j) * self.shape[2] + i
    }
}

impl TryFrom<Vec<Vec<Vec<MaterialId>>>> for Cellmap {
    type Error = StrError;

    fn try_from(nested: Vec<Vec<Vec<MaterialId>>>) -> Result<Self, Self::Error> {
        let nk = nested.len();
        let nj = nested.first().map_or(0, |layer| layer.len());
        let ni = nested.first().and_then(|layer| layer.first()).map_or(0, |row| row.len());
        let mut values = Vec::with_capacity(nk * nj * ni);
        for layer in nested {
            if layer.len() != nj {
                return Err("all layers of the cellmap must have the same number of rows");
            }
            for row in layer {
                if row.len() != ni {
                    return Err("all rows of the cellmap must have the same number of values");
                }
                values.extend(row);
            }
        }
        Ok(Cellmap {
            shape: [nk, nj, ni],
            values,
        })
    }
}

impl From<Cellmap> for Vec<Vec<Vec<MaterialId>>> {
    fn from(cellmap: Cellmap) -> Self {
        let [nk, nj, ni] = cellmap.shape;
        (0..nk)
            .map(|k| {
                (0..nj)
                    .map(|j| (0..ni).map(|i| cellmap.get(k, j, i)).collect())
                    .collect()
            })
            .collect()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
