use crate::base::{approximately_equal, extend_bounds, Bounds, CellId, MaterialId, Mesh, PointId, EMPTY_BOUNDS};
use tracing::{debug, instrument};

/// Finds the nodes lying on all planes given as (axis, coordinate) pairs
///
/// Only the corners of cells with the given material are considered (`None` means any material).
/// The resulting ids are sorted in ascending order.
fn find_nodes_on_planes(mesh: &Mesh, planes: &[(usize, f64)], material: Option<MaterialId>) -> Vec<PointId> {
    let mask = mesh.point_mask(material);
    mesh.points
        .iter()
        .filter(|point| mask[point.id])
        .filter(|point| {
            planes
                .iter()
                .all(|(axis, value)| approximately_equal(point.coords[*axis % 3], *value))
        })
        .map(|point| point.id)
        .collect()
}

/// Finds the nodes whose coordinate along `axis` equals `value`
///
/// # Input
///
/// * `mesh` -- the voxel mesh
/// * `axis` -- the data frame axis (0, 1, 2)
/// * `value` -- the coordinate of the plane
/// * `material` -- restricts the search to the corners of cells with this material (`None` = any)
///
/// # Output
///
/// Returns the ids of the points on the plane in ascending order; the list is empty if
/// no cell of the selected material touches the plane.
#[instrument(level = "debug", skip(mesh))]
pub fn find_nodes_on_plane(mesh: &Mesh, axis: usize, value: f64, material: Option<MaterialId>) -> Vec<PointId> {
    let ids = find_nodes_on_planes(mesh, &[(axis, value)], material);
    debug!(count = ids.len(), "nodes on plane");
    ids
}

/// Finds the nodes on the intersection of two planes (an edge of the specimen)
#[instrument(level = "debug", skip(mesh))]
pub fn find_nodes_intersecting_two_planes(
    mesh: &Mesh,
    axis1: usize,
    value1: f64,
    axis2: usize,
    value2: f64,
    material: Option<MaterialId>,
) -> Vec<PointId> {
    find_nodes_on_planes(mesh, &[(axis1, value1), (axis2, value2)], material)
}

/// Finds the nodes on the intersection of three planes (a corner of the specimen)
///
/// The order of the (axis, value) pairs does not affect the result.
#[instrument(level = "debug", skip(mesh))]
pub fn find_nodes_intersecting_three_planes(
    mesh: &Mesh,
    axis1: usize,
    value1: f64,
    axis2: usize,
    value2: f64,
    axis3: usize,
    value3: f64,
    material: Option<MaterialId>,
) -> Vec<PointId> {
    find_nodes_on_planes(mesh, &[(axis1, value1), (axis2, value2), (axis3, value3)], material)
}

/// Returns the bounds of the cells with the given material
///
/// With `None`, the bounds of all points of the mesh are returned. If no cell has the
/// material, the result is [`EMPTY_BOUNDS`].
pub fn material_bounds(mesh: &Mesh, material: Option<MaterialId>) -> Bounds {
    match material {
        None => mesh.bounds(),
        Some(_) => {
            let mask = mesh.point_mask(material);
            let mut bounds = EMPTY_BOUNDS;
            for point in mesh.points.iter().filter(|p| mask[p.id]) {
                extend_bounds(&mut bounds, &point.coords);
            }
            bounds
        }
    }
}

/// Returns the cells with at least one corner in the node set (ascending order)
pub fn associated_elements(mesh: &Mesh, nodes: &[PointId]) -> Vec<CellId> {
    let mut in_set = vec![false; mesh.points.len()];
    for p in nodes {
        if *p < in_set.len() {
            in_set[*p] = true;
        }
    }
    mesh.cells
        .iter()
        .filter(|cell| cell.points.iter().any(|p| in_set[*p]))
        .map(|cell| cell.id)
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{
        associated_elements, find_nodes_intersecting_three_planes, find_nodes_intersecting_two_planes,
        find_nodes_on_plane, material_bounds,
    };
    use crate::base::{Samples, EMPTY_BOUNDS};

    #[test]
    fn material_bounds_works() {
        let mesh = Samples::quasi_donut_two_materials();
        assert_eq!(material_bounds(&mesh, None), [0.0, 5.0, 0.0, 5.0, 0.0, 3.0]);
        assert_eq!(material_bounds(&mesh, Some(1)), [0.0, 2.0, 0.0, 5.0, 0.0, 3.0]);
        assert_eq!(material_bounds(&mesh, Some(2)), [2.0, 5.0, 0.0, 5.0, 0.0, 3.0]);
        assert_eq!(material_bounds(&mesh, Some(3)), EMPTY_BOUNDS);
        let offset = Samples::quasi_donut_two_materials_offset();
        assert_eq!(material_bounds(&offset, None), [0.5, 3.0, 1.0, 6.0, -0.5, 5.5]);
    }

    #[test]
    fn find_nodes_on_plane_works() {
        let mesh = Samples::quasi_donut_two_materials_offset();

        // x min surface
        let x_min = &[0, 6, 12, 16, 20, 26, 32, 38, 44, 50, 56, 62, 68, 74, 80, 86, 92, 98, 104, 110, 116, 120, 124, 130];
        assert_eq!(find_nodes_on_plane(&mesh, 0, 0.5, None), x_min);
        assert_eq!(find_nodes_on_plane(&mesh, 0, 0.5, Some(1)), x_min);
        assert_eq!(find_nodes_on_plane(&mesh, 0, 0.5, Some(2)).len(), 0);

        // x max surface
        let x_max = &[5, 11, 15, 19, 25, 31, 37, 43, 49, 55, 61, 67, 73, 79, 85, 91, 97, 103, 109, 115, 119, 123, 129, 135];
        assert_eq!(find_nodes_on_plane(&mesh, 0, 3.0, None), x_max);
        assert_eq!(find_nodes_on_plane(&mesh, 0, 3.0, Some(1)).len(), 0);

        // y min surface
        assert_eq!(
            find_nodes_on_plane(&mesh, 1, 1.0, None),
            &[0, 1, 2, 3, 4, 5, 32, 33, 34, 35, 36, 37, 68, 69, 70, 71, 72, 73, 104, 105, 106, 107, 108, 109]
        );
        assert_eq!(
            find_nodes_on_plane(&mesh, 1, 1.0, Some(1)),
            &[0, 1, 2, 32, 33, 34, 68, 69, 70, 104, 105, 106]
        );
        assert_eq!(
            find_nodes_on_plane(&mesh, 1, 1.0, Some(2)),
            &[2, 3, 4, 5, 34, 35, 36, 37, 70, 71, 72, 73, 106, 107, 108, 109]
        );

        // plane outside the mesh
        assert_eq!(find_nodes_on_plane(&mesh, 2, 100.0, None).len(), 0);
    }

    #[test]
    fn find_nodes_on_plane_ignores_holes() {
        // the bottom of the quasi-donut has a hole; its rim is still on the plane
        let mesh = Samples::quasi_donut();
        let ids = find_nodes_on_plane(&mesh, 2, 0.0, None);
        assert_eq!(ids, (0..32).collect::<Vec<_>>());
    }

    #[test]
    fn find_nodes_intersecting_two_planes_works() {
        let mesh = Samples::quasi_donut_two_materials_offset();
        assert_eq!(find_nodes_intersecting_two_planes(&mesh, 0, 0.5, 1, 1.0, None), &[0, 32, 68, 104]);
        assert_eq!(find_nodes_intersecting_two_planes(&mesh, 0, 0.5, 1, 1.0, Some(1)), &[0, 32, 68, 104]);
        assert_eq!(find_nodes_intersecting_two_planes(&mesh, 0, 0.5, 1, 1.0, Some(2)).len(), 0);
        assert_eq!(find_nodes_intersecting_two_planes(&mesh, 0, 3.0, 1, 1.0, None), &[5, 37, 73, 109]);
        assert_eq!(find_nodes_intersecting_two_planes(&mesh, 0, 3.0, 1, 1.0, Some(1)).len(), 0);
        assert_eq!(find_nodes_intersecting_two_planes(&mesh, 0, 3.0, 1, 1.0, Some(2)), &[5, 37, 73, 109]);
        assert_eq!(find_nodes_intersecting_two_planes(&mesh, 0, 0.5, 1, 6.0, None), &[26, 62, 98, 130]);
        // the order of the planes is irrelevant
        assert_eq!(find_nodes_intersecting_two_planes(&mesh, 1, 6.0, 0, 0.5, None), &[26, 62, 98, 130]);
    }

    #[test]
    fn find_nodes_intersecting_three_planes_works() {
        let mesh = Samples::quasi_donut_two_materials_offset();
        assert_eq!(find_nodes_intersecting_three_planes(&mesh, 0, 0.5, 1, 1.0, 2, -0.5, None), &[0]);
        assert_eq!(find_nodes_intersecting_three_planes(&mesh, 0, 0.5, 1, 1.0, 2, -0.5, Some(1)), &[0]);
        assert_eq!(find_nodes_intersecting_three_planes(&mesh, 0, 0.5, 1, 1.0, 2, -0.5, Some(2)).len(), 0);
        assert_eq!(find_nodes_intersecting_three_planes(&mesh, 0, 3.0, 1, 1.0, 2, -0.5, None), &[5]);
        assert_eq!(find_nodes_intersecting_three_planes(&mesh, 0, 3.0, 1, 1.0, 2, -0.5, Some(2)), &[5]);
        assert_eq!(find_nodes_intersecting_three_planes(&mesh, 0, 0.5, 1, 6.0, 2, -0.5, None), &[26]);
        assert_eq!(find_nodes_intersecting_three_planes(&mesh, 0, 3.0, 1, 6.0, 2, 5.5, None), &[135]);
        // the order of the planes is irrelevant
        assert_eq!(find_nodes_intersecting_three_planes(&mesh, 2, 5.5, 0, 3.0, 1, 6.0, None), &[135]);
    }

    #[test]
    fn associated_elements_works() {
        let mesh = Samples::two_voxels();
        assert_eq!(associated_elements(&mesh, &[0, 1]), &[0]);
        assert_eq!(associated_elements(&mesh, &[4]), &[0, 1]);
        assert_eq!(associated_elements(&mesh, &[8, 9, 10, 11]), &[1]);
        assert_eq!(associated_elements(&mesh, &[]).len(), 0);
        assert_eq!(associated_elements(&mesh, &[100]).len(), 0);
    }
}
