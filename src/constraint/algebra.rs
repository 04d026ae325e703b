use super::{Constraint, ConstraintCollection};
use crate::base::{
    AppliedTo, CellId, ConstraintKind, Distribution, Mesh, PointId, CONSTRAINT_DISTRIBUTED_TO_NODES,
    FORCE_CONSTRAINTS_DISTRIBUTED_TO_NODES, GATHERED_DISPLACED_NODES,
};
use crate::StrError;
use std::collections::BTreeMap;
use tracing::debug;

/// Holds a quantity given either once for all ids or once per id
#[derive(Clone, Debug, PartialEq)]
pub enum PerId<T> {
    /// The same value for all ids (broadcast)
    All(T),

    /// One value per id
    Each(Vec<T>),
}

impl<T: Copy> PerId<T> {
    /// Expands the quantity into one value per id
    fn expand(&self, n: usize) -> Result<Vec<T>, StrError> {
        match self {
            PerId::All(v) => Ok(vec![*v; n]),
            PerId::Each(values) => {
                if values.len() != n {
                    return Err("the number of per-id values must equal the number of ids");
                }
                Ok(values.clone())
            }
        }
    }
}

/// Creates a displacement boundary condition on nodes
///
/// # Input
///
/// * `nodes` -- the point ids
/// * `sense` -- the data frame sense (one for all nodes or one per node)
/// * `value` -- the prescribed displacement (one for all nodes or one per node)
/// * `name` -- the name of the constraint
pub fn create_boundary_condition(
    nodes: &[PointId],
    sense: PerId<usize>,
    value: PerId<f64>,
    name: &str,
) -> Result<Constraint, StrError> {
    let senses = sense.expand(nodes.len())?;
    let values = value.expand(nodes.len())?;
    Constraint::from_arrays(
        name,
        ConstraintKind::Displacement,
        AppliedTo::Nodes,
        nodes.to_vec(),
        senses,
        values,
        None,
    )
}

/// Creates a constraint fixing the nodes in all three senses
///
/// The entries are ordered by node, then by sense (0, 1, 2).
pub fn create_fixed_nodes(nodes: &[PointId], name: &str) -> Constraint {
    let mut constraint = Constraint::new(name, ConstraintKind::Displacement, AppliedTo::Nodes);
    for p in nodes {
        for sense in 0..3 {
            constraint.push(*p, sense, 0.0);
        }
    }
    constraint
}

/// Creates a force applied to elements
///
/// # Input
///
/// * `elements` -- the cell ids
/// * `distribution` -- how each force is spread over the points of the cell
/// * `sense` -- the data frame sense
/// * `value` -- the force value
/// * `name` -- the name of the constraint
pub fn create_applied_load(
    elements: &[CellId],
    distribution: PerId<Distribution>,
    sense: PerId<usize>,
    value: PerId<f64>,
    name: &str,
) -> Result<Constraint, StrError> {
    let distributions = distribution.expand(elements.len())?;
    let senses = sense.expand(elements.len())?;
    let values = value.expand(elements.len())?;
    Constraint::from_arrays(
        name,
        ConstraintKind::Force,
        AppliedTo::Elements,
        elements.to_vec(),
        senses,
        values,
        Some(distributions),
    )
}

/// Inserts the entries of a displacement constraint; later entries replace earlier ones
fn insert_displacements(map: &mut BTreeMap<(usize, usize), f64>, constraint: &Constraint) {
    if constraint.kind != ConstraintKind::Displacement {
        return;
    }
    for e in constraint.entries() {
        map.insert((e.index, e.sense), e.value);
    }
}

/// Converts a (node, sense) map into a constraint sorted by (node, sense)
fn constraint_from_map(name: &str, kind: ConstraintKind, map: BTreeMap<(usize, usize), f64>) -> Constraint {
    let mut constraint = Constraint::new(name, kind, AppliedTo::Nodes);
    for ((index, sense), value) in map {
        constraint.push(index, sense, value);
    }
    constraint
}

/// Gathers a displacement constraint into a single entry per (node, sense)
///
/// Duplicate (node, sense) pairs keep the last value. The result is sorted by
/// (node, sense). A non-displacement input yields an empty constraint.
pub fn gather_displacement_constraint(constraint: &Constraint) -> Constraint {
    let mut map = BTreeMap::new();
    insert_displacements(&mut map, constraint);
    constraint_from_map(GATHERED_DISPLACED_NODES, ConstraintKind::Displacement, map)
}

/// Gathers all displacement constraints of a collection into a single constraint
///
/// Duplicate (node, sense) pairs keep the value of the last constraint in the
/// collection (and, within a constraint, the last entry). The result is sorted by
/// (node, sense).
pub fn gather_displacement_constraints(collection: &ConstraintCollection) -> Constraint {
    let mut map = BTreeMap::new();
    for constraint in collection {
        insert_displacements(&mut map, constraint);
    }
    debug!(count = map.len(), "gathered displaced nodes");
    constraint_from_map(GATHERED_DISPLACED_NODES, ConstraintKind::Displacement, map)
}

/// Gathers the displacement entries with |value| < tolerance
pub fn gather_zero_valued_displacement_constraints(constraint: &Constraint, tolerance: f64) -> Constraint {
    let mut map = BTreeMap::new();
    insert_displacements(&mut map, constraint);
    map.retain(|_, v| v.abs() < tolerance);
    constraint_from_map(GATHERED_DISPLACED_NODES, ConstraintKind::Displacement, map)
}

/// Gathers the displacement entries with |value| ≥ tolerance
pub fn gather_nonzero_displacement_constraints(constraint: &Constraint, tolerance: f64) -> Constraint {
    let mut map = BTreeMap::new();
    insert_displacements(&mut map, constraint);
    map.retain(|_, v| v.abs() >= tolerance);
    constraint_from_map(GATHERED_DISPLACED_NODES, ConstraintKind::Displacement, map)
}

/// Adds the node entries of a constraint to a (node, sense) map, summing repeated pairs
fn accumulate_on_nodes(
    map: &mut BTreeMap<(usize, usize), f64>,
    mesh: &Mesh,
    constraint: &Constraint,
) -> Result<(), StrError> {
    match constraint.applied_to {
        AppliedTo::Nodes => {
            for e in constraint.entries() {
                if e.index >= mesh.points.len() {
                    return Err("point id of constraint is out of range");
                }
                *map.entry((e.index, e.sense)).or_insert(0.0) += e.value;
            }
        }
        AppliedTo::Elements => {
            if constraint.distributions().is_none() {
                return Err("constraint applied to elements must have distributions");
            }
            for e in constraint.entries() {
                let cell = mesh.cells.get(e.index).ok_or("cell id of constraint is out of range")?;
                let corners = e.distribution.unwrap_or(Distribution::Body).corners();
                let share = e.value / (corners.len() as f64);
                for m in corners {
                    *map.entry((cell.points[*m], e.sense)).or_insert(0.0) += share;
                }
            }
        }
    }
    Ok(())
}

/// Distributes a constraint to the nodes of the mesh
///
/// Each element entry is divided evenly among the voxel corners selected by its
/// distribution code (4 corners for a face, 8 for the body). Node entries pass through.
/// Values of the same (node, sense) are summed and the result is sorted by (node, sense).
/// The result keeps the kind of the input.
pub fn distribute_constraint_to_nodes(mesh: &Mesh, constraint: &Constraint) -> Result<Constraint, StrError> {
    let mut map = BTreeMap::new();
    accumulate_on_nodes(&mut map, mesh, constraint)?;
    Ok(constraint_from_map(CONSTRAINT_DISTRIBUTED_TO_NODES, constraint.kind, map))
}

/// Distributes all force constraints of a collection to nodes and sums them
pub fn distribute_force_constraints_to_nodes(
    mesh: &Mesh,
    collection: &ConstraintCollection,
) -> Result<Constraint, StrError> {
    let mut map = BTreeMap::new();
    for constraint in collection.iter().filter(|c| c.kind == ConstraintKind::Force) {
        accumulate_on_nodes(&mut map, mesh, constraint)?;
    }
    Ok(constraint_from_map(
        FORCE_CONSTRAINTS_DISTRIBUTED_TO_NODES,
        ConstraintKind::Force,
        map,
    ))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
