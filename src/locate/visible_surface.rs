use crate::base::{Cell, Distribution, MaterialId, Mesh, PointId, VISIBILITY_TOLERANCE};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Holds a cell face that is not shared with another cell
struct BoundaryFace {
    /// Data frame axis normal to the face
    axis: usize,

    /// 0 = face at the low side of the cell; 1 = face at the high side
    side: usize,

    /// Coordinate of the face along the axis
    coord: f64,

    /// Minimum coordinates of the face corners
    min: [f64; 3],

    /// Maximum coordinates of the face corners
    max: [f64; 3],

    /// Material of the cell owning the face
    material_id: MaterialId,

    /// Corners of the face
    points: [PointId; 4],
}

impl BoundaryFace {
    /// Returns the sign of the outward normal along the axis
    fn sign(&self) -> f64 {
        if self.side == 1 {
            1.0
        } else {
            -1.0
        }
    }

    /// Returns true if the ray x0 + t n (t ≥ 0) hits the face
    fn is_hit_by(&self, x0: &[f64; 3], n: &[f64; 3]) -> bool {
        if n[self.axis] == 0.0 {
            return false;
        }
        let t = (self.coord - x0[self.axis]) / n[self.axis];
        if t < -VISIBILITY_TOLERANCE {
            return false;
        }
        (0..3).filter(|b| *b != self.axis).all(|b| {
            let q = x0[b] + t * n[b];
            q >= self.min[b] - VISIBILITY_TOLERANCE && q <= self.max[b] + VISIBILITY_TOLERANCE
        })
    }
}

/// Extracts the faces of the selected cells that are not shared by two of them
fn boundary_faces(mesh: &Mesh, cells: &[&Cell]) -> Vec<BoundaryFace> {
    let mut faces: HashMap<[PointId; 4], (usize, BoundaryFace)> = HashMap::new();
    for cell in cells {
        for axis in 0..3 {
            for side in 0..2 {
                let corners = Distribution::face(axis, side).corners();
                let mut points = [0; 4];
                for (i, m) in corners.iter().enumerate() {
                    points[i] = cell.points[*m];
                }
                let mut key = points;
                key.sort();
                let entry = faces.entry(key).or_insert_with(|| {
                    let mut min = [f64::INFINITY; 3];
                    let mut max = [f64::NEG_INFINITY; 3];
                    for p in &points {
                        let x = &mesh.points[*p].coords;
                        for d in 0..3 {
                            min[d] = f64::min(min[d], x[d]);
                            max[d] = f64::max(max[d], x[d]);
                        }
                    }
                    let face = BoundaryFace {
                        axis,
                        side,
                        coord: mesh.points[points[0]].coords[axis],
                        min,
                        max,
                        material_id: cell.material_id,
                        points,
                    };
                    (0, face)
                });
                entry.0 += 1;
            }
        }
    }
    faces
        .into_iter()
        .filter_map(|(_, (count, face))| if count == 1 { Some(face) } else { None })
        .collect()
}

/// Runs the visibility search over a subset of cells
fn visible_points(mesh: &Mesh, cells: &[&Cell], normal: &[f64; 3], material: Option<MaterialId>) -> Vec<PointId> {
    let norm = f64::sqrt(normal.iter().map(|v| v * v).sum());
    if norm == 0.0 {
        warn!("the direction of the visible surface search must not be zero");
        return Vec::new();
    }
    let n = [normal[0] / norm, normal[1] / norm, normal[2] / norm];

    // faces whose outward normal points toward the direction
    let oriented: Vec<_> = boundary_faces(mesh, cells)
        .into_iter()
        .filter(|face| face.sign() * n[face.axis] > 0.0)
        .collect();

    // candidates
    let mut candidates: Vec<PointId> = oriented
        .iter()
        .filter(|face| material.map_or(true, |m| face.material_id == m))
        .flat_map(|face| face.points.iter().copied())
        .collect();
    candidates.sort();
    candidates.dedup();

    // cast a ray from each candidate; faces of any material may hide it
    let offset = 1.01 * VISIBILITY_TOLERANCE;
    candidates
        .into_iter()
        .filter(|p| {
            let x = &mesh.points[*p].coords;
            let x0 = [x[0] + offset * n[0], x[1] + offset * n[1], x[2] + offset * n[2]];
            !oriented.iter().any(|face| face.is_hit_by(&x0, &n))
        })
        .collect()
}

/// Finds the nodes on the outer envelope of the mesh visible from a direction
///
/// This search handles stepped or uneven top and bottom surfaces: the nodes of the
/// lower steps are found as long as no other part of the mesh covers them.
///
/// # Input
///
/// * `mesh` -- the voxel mesh
/// * `normal` -- the outward direction from which the surface is seen (need not be unit)
/// * `material` -- only faces of cells with this material provide candidates (`None` = any);
///   faces of every material may hide a candidate
///
/// # Output
///
/// Returns the ids of the visible points in ascending order.
#[instrument(level = "debug", skip(mesh))]
pub fn find_nodes_on_visible_surface(mesh: &Mesh, normal: &[f64; 3], material: Option<MaterialId>) -> Vec<PointId> {
    let cells: Vec<_> = mesh.cells.iter().collect();
    let ids = visible_points(mesh, &cells, normal, material);
    debug!(count = ids.len(), "nodes on visible surface");
    ids
}

/// Finds the nodes visible from a direction considering only the cells near the surface
///
/// The cells are first restricted to those with at least one point inside the slab of
/// thickness `depth` measured from the extreme of the mesh along the dominant axis of
/// `normal` (the top when the normal is positive, the bottom otherwise). The slab
/// boundaries are inclusive. The visible surface search then runs on these cells only.
///
/// A depth larger than the mesh thickness includes all cells.
#[instrument(level = "debug", skip(mesh))]
pub fn find_nodes_on_visible_surface_within_depth(
    mesh: &Mesh,
    normal: &[f64; 3],
    depth: f64,
    material: Option<MaterialId>,
) -> Vec<PointId> {
    let mut axis = 0;
    for d in 1..3 {
        if normal[d].abs() > normal[axis].abs() {
            axis = d;
        }
    }
    if normal[axis] == 0.0 {
        warn!("the direction of the visible surface search must not be zero");
        return Vec::new();
    }
    let bounds = mesh.bounds();
    let (lo, hi) = if normal[axis] > 0.0 {
        (bounds[2 * axis + 1] - depth, bounds[2 * axis + 1])
    } else {
        (bounds[2 * axis], bounds[2 * axis] + depth)
    };
    let inside = |x: f64| x >= lo - VISIBILITY_TOLERANCE && x <= hi + VISIBILITY_TOLERANCE;
    let cells: Vec<_> = mesh
        .cells
        .iter()
        .filter(|cell| cell.points.iter().any(|p| inside(mesh.points[*p].coords[axis])))
        .collect();
    if cells.is_empty() {
        warn!(depth, "no cells found within the maximum depth");
        return Vec::new();
    }
    let ids = visible_points(mesh, &cells, normal, material);
    debug!(ncell = cells.len(), count = ids.len(), "nodes on visible surface within depth");
    ids
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
