use crate::constraint::Constraint;

/// Compares a constraint against expected (index, sense, value) entries
///
/// Both sides are sorted by (index, sense, value) before the comparison; values are
/// compared with a tolerance of 1e-7.
///
/// # Panics
///
/// Panics if the constraints differ.
#[allow(dead_code)]
pub(crate) fn compare_constraint(constraint: &Constraint, indices: &[usize], senses: &[usize], values: &[f64]) {
    assert_eq!(indices.len(), senses.len(), "expected arrays must have the same length");
    assert_eq!(indices.len(), values.len(), "expected arrays must have the same length");
    let actual = constraint.sorted_entries();
    let mut expected: Vec<_> = (0..indices.len()).map(|i| (indices[i], senses[i], values[i])).collect();
    expected.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then(a.1.cmp(&b.1))
            .then(a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal))
    });
    assert_eq!(
        actual.len(),
        expected.len(),
        "constraint {} has a wrong number of entries",
        constraint.name
    );
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert_eq!((a.index, a.sense), (e.0, e.1), "constraint {}: wrong entry", constraint.name);
        assert!(
            (a.value - e.2).abs() < 1e-7,
            "constraint {}: value of ({}, {}) is {:?} but {:?} was expected",
            constraint.name,
            a.index,
            a.sense,
            a.value,
            e.2
        );
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
