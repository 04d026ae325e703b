use crate::base::{AppliedTo, ConstraintKind, Distribution};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;

/// Holds one entry of a constraint
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct ConstraintEntry {
    /// Point id (NODES) or cell id (ELEMENTS)
    pub index: usize,

    /// Data frame sense (0 = x, 1 = y, 2 = z)
    pub sense: usize,

    /// Prescribed displacement or force
    pub value: f64,

    /// How the value is spread over the points of the cell (ELEMENTS only)
    pub distribution: Option<Distribution>,
}

impl ConstraintEntry {
    /// Compares two entries by (index, sense, value)
    pub fn cmp_by_index_sense_value(&self, other: &Self) -> Ordering {
        self.index
            .cmp(&other.index)
            .then(self.sense.cmp(&other.sense))
            .then(self.value.partial_cmp(&other.value).unwrap_or(Ordering::Equal))
    }
}

/// Holds a named boundary condition
///
/// The entries are stored as parallel arrays (indices, senses, values and, optionally,
/// distributions) that always have the same length. The same index may appear more than
/// once, e.g., once per constrained sense.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "ConstraintArrays")]
pub struct Constraint {
    /// Name of the constraint
    pub name: String,

    /// Displacement or force
    pub kind: ConstraintKind,

    /// Entity referenced by the indices
    pub applied_to: AppliedTo,

    /// Point or cell ids
    indices: Vec<usize>,

    /// Data frame senses
    senses: Vec<usize>,

    /// Values
    values: Vec<f64>,

    /// Distribution codes (one per entry) used by forces applied to elements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    distributions: Option<Vec<Distribution>>,
}

/// Holds the serialized form of a constraint before validation
#[derive(Deserialize)]
struct ConstraintArrays {
    name: String,
    kind: ConstraintKind,
    applied_to: AppliedTo,
    indices: Vec<usize>,
    senses: Vec<usize>,
    values: Vec<f64>,
    #[serde(default)]
    distributions: Option<Vec<Distribution>>,
}

impl TryFrom<ConstraintArrays> for Constraint {
    type Error = StrError;

    fn try_from(data: ConstraintArrays) -> Result<Self, Self::Error> {
        Constraint::from_arrays(
            &data.name,
            data.kind,
            data.applied_to,
            data.indices,
            data.senses,
            data.values,
            data.distributions,
        )
    }
}

impl Constraint {
    /// Allocates an empty constraint
    ///
    /// Force constraints applied to elements carry distribution codes.
    pub fn new(name: &str, kind: ConstraintKind, applied_to: AppliedTo) -> Self {
        let distributions = if kind == ConstraintKind::Force && applied_to == AppliedTo::Elements {
            Some(Vec::new())
        } else {
            None
        };
        Constraint {
            name: name.to_string(),
            kind,
            applied_to,
            indices: Vec::new(),
            senses: Vec::new(),
            values: Vec::new(),
            distributions,
        }
    }

    /// Allocates a constraint from parallel arrays
    ///
    /// # Input
    ///
    /// * `indices`, `senses`, `values` -- must have the same length
    /// * `distributions` -- if given, must have the same length as the indices
    pub fn from_arrays(
        name: &str,
        kind: ConstraintKind,
        applied_to: AppliedTo,
        indices: Vec<usize>,
        senses: Vec<usize>,
        values: Vec<f64>,
        distributions: Option<Vec<Distribution>>,
    ) -> Result<Self, StrError> {
        if senses.len() != indices.len() || values.len() != indices.len() {
            return Err("indices, senses, and values must have the same length");
        }
        if let Some(d) = &distributions {
            if d.len() != indices.len() {
                return Err("distributions must have the same length as indices");
            }
        }
        if senses.iter().any(|s| *s > 2) {
            return Err("sense must be 0, 1, or 2");
        }
        Ok(Constraint {
            name: name.to_string(),
            kind,
            applied_to,
            indices,
            senses,
            values,
            distributions,
        })
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if there are no entries
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns the point or cell ids
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the data frame senses
    pub fn senses(&self) -> &[usize] {
        &self.senses
    }

    /// Returns the values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the distribution codes, if any
    pub fn distributions(&self) -> Option<&[Distribution]> {
        self.distributions.as_deref()
    }

    /// Returns the i-th entry
    pub fn entry(&self, i: usize) -> Option<ConstraintEntry> {
        if i >= self.indices.len() {
            return None;
        }
        Some(ConstraintEntry {
            index: self.indices[i],
            sense: self.senses[i],
            value: self.values[i],
            distribution: self.distributions.as_ref().and_then(|d| d.get(i).copied()),
        })
    }

    /// Returns an iterator over the entries
    pub fn entries(&self) -> impl Iterator<Item = ConstraintEntry> + '_ {
        (0..self.len()).filter_map(move |i| self.entry(i))
    }

    /// Returns the entries sorted by (index, sense, value)
    pub fn sorted_entries(&self) -> Vec<ConstraintEntry> {
        let mut entries: Vec<_> = self.entries().collect();
        entries.sort_by(|a, b| a.cmp_by_index_sense_value(b));
        entries
    }

    /// Returns true if all values are exactly zero
    pub fn all_values_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    /// Appends an entry (without distribution)
    pub(crate) fn push(&mut self, index: usize, sense: usize, value: f64) {
        self.indices.push(index);
        self.senses.push(sense);
        self.values.push(value);
    }

    /// Appends an entry with distribution
    pub(crate) fn push_distributed(&mut self, index: usize, sense: usize, value: f64, distribution: Distribution) {
        self.push(index, sense, value);
        self.distributions.get_or_insert_with(Vec::new).push(distribution);
    }

    /// Appends the entries of another constraint, preserving their order
    ///
    /// The other constraint must have the same kind and be applied to the same entities.
    /// Either both or neither constraint must carry distributions. This constraint is
    /// left unchanged if an error occurs.
    pub fn merge(&mut self, other: &Constraint) -> Result<&mut Self, StrError> {
        if self.kind != other.kind {
            return Err("cannot merge constraints of different kinds");
        }
        if self.applied_to != other.applied_to {
            return Err("cannot merge constraints applied to different entities");
        }
        match (&self.distributions, &other.distributions) {
            (Some(a), Some(b)) => {
                if a.len() != self.len() || b.len() != other.len() {
                    return Err("distributions must have the same length as indices");
                }
            }
            (None, None) => (),
            _ => return Err("cannot merge constraints with and without distributions"),
        }
        self.indices.extend_from_slice(&other.indices);
        self.senses.extend_from_slice(&other.senses);
        self.values.extend_from_slice(&other.values);
        if let (Some(a), Some(b)) = (&mut self.distributions, &other.distributions) {
            a.extend_from_slice(b);
        }
        Ok(self)
    }
}

impl fmt::Display for Constraint {
    /// Prints the name, kind, and entries
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("{} ({} on {})", self.name, self.kind, self.applied_to);
        writeln!(f, "{}\n{}", title, "=".repeat(title.chars().count()))?;
        for e in self.entries() {
            match e.distribution {
                Some(d) => writeln!(f, "{:>8} {:>2} {:>14} {:?}", e.index, e.sense, format!("{:?}", e.value), d)?,
                None => writeln!(f, "{:>8} {:>2} {:>14}", e.index, e.sense, format!("{:?}", e.value))?,
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Constraint;
    use crate::base::{AppliedTo, ConstraintKind, Distribution};

    fn sample(name: &str, indices: Vec<usize>) -> Constraint {
        let n = indices.len();
        Constraint::from_arrays(
            name,
            ConstraintKind::Displacement,
            AppliedTo::Nodes,
            indices,
            vec![2; n],
            (0..n).map(|i| i as f64).collect(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn from_arrays_captures_errors() {
        let (d, n) = (ConstraintKind::Displacement, AppliedTo::Nodes);
        assert_eq!(
            Constraint::from_arrays("a", d, n, vec![0, 1], vec![0], vec![0.0, 0.0], None).err(),
            Some("indices, senses, and values must have the same length")
        );
        assert_eq!(
            Constraint::from_arrays("a", d, n, vec![0], vec![0], vec![0.0, 0.0], None).err(),
            Some("indices, senses, and values must have the same length")
        );
        assert_eq!(
            Constraint::from_arrays("a", d, n, vec![0], vec![0], vec![0.0], Some(Vec::new())).err(),
            Some("distributions must have the same length as indices")
        );
        assert_eq!(
            Constraint::from_arrays("a", d, n, vec![0], vec![3], vec![0.0], None).err(),
            Some("sense must be 0, 1, or 2")
        );
    }

    #[test]
    fn new_and_entry_work() {
        let c = Constraint::new("load", ConstraintKind::Force, AppliedTo::Elements);
        assert!(c.is_empty());
        assert_eq!(c.distributions(), Some(&[][..]));
        let c = sample("bc", vec![5, 3]);
        assert_eq!(c.len(), 2);
        let e = c.entry(1).unwrap();
        assert_eq!((e.index, e.sense, e.value, e.distribution), (3, 2, 1.0, None));
        assert_eq!(c.entry(2), None);
        let sorted: Vec<_> = c.sorted_entries().iter().map(|e| e.index).collect();
        assert_eq!(sorted, &[3, 5]);
    }

    #[test]
    fn merge_preserves_length_and_order() {
        let mut a = sample("a", vec![4, 1, 2]);
        let b = sample("b", vec![0, 9]);
        a.merge(&b).unwrap();
        assert_eq!(a.name, "a");
        assert_eq!(a.indices(), &[4, 1, 2, 0, 9]);
        assert_eq!(a.values(), &[0.0, 1.0, 2.0, 0.0, 1.0]);
        assert_eq!(a.senses().len(), 5);
    }

    #[test]
    fn merge_captures_errors() {
        let mut a = sample("a", vec![0]);
        let mut force = sample("f", vec![1]);
        force.kind = ConstraintKind::Force;
        assert_eq!(a.merge(&force).err(), Some("cannot merge constraints of different kinds"));
        let mut on_elements = sample("e", vec![1]);
        on_elements.applied_to = AppliedTo::Elements;
        assert_eq!(
            a.merge(&on_elements).err(),
            Some("cannot merge constraints applied to different entities")
        );
        let mut with_distributions = sample("d", vec![1]);
        with_distributions.push_distributed(2, 0, 1.0, Distribution::Body);
        assert_eq!(
            a.merge(&with_distributions).err(),
            Some("cannot merge constraints with and without distributions")
        );
        // unchanged
        assert_eq!(a, sample("a", vec![0]));
    }

    #[test]
    fn merge_works_with_distributions() {
        let mut a = Constraint::new("a", ConstraintKind::Force, AppliedTo::Elements);
        a.push_distributed(0, 2, 1.0, Distribution::FaceZ1);
        let mut b = Constraint::new("b", ConstraintKind::Force, AppliedTo::Elements);
        b.push_distributed(3, 2, 2.0, Distribution::Body);
        a.merge(&b).unwrap();
        assert_eq!(a.distributions(), Some(&[Distribution::FaceZ1, Distribution::Body][..]));
        assert_eq!(a.entry(1).unwrap().distribution, Some(Distribution::Body));
    }

    #[test]
    fn display_works() {
        let c = sample("top", vec![8]);
        assert_eq!(
            format!("{}", c),
            "top (DISPLACEMENT on NODES)\n\
             ===========================\n       \
                    8  2            0.0\n"
        );
    }

    #[test]
    fn serialize_works() {
        let mut c = Constraint::new("load", ConstraintKind::Force, AppliedTo::Elements);
        c.push_distributed(1, 0, -2.5, Distribution::FaceX1);
        let json = serde_json::to_string(&c).unwrap();
        let read: Constraint = serde_json::from_str(&json).unwrap();
        assert_eq!(read, c);
        let bc = sample("bc", vec![0]);
        let json = serde_json::to_string(&bc).unwrap();
        assert!(!json.contains("distributions"));
    }

    #[test]
    fn deserialize_captures_errors() {
        let bc = sample("bc", vec![0, 1]);
        let mut value = serde_json::to_value(&bc).unwrap();
        value["senses"] = serde_json::json!([2]);
        let err = serde_json::from_value::<Constraint>(value).unwrap_err();
        assert!(err.to_string().contains("indices, senses, and values must have the same length"));

        let mut value = serde_json::to_value(&bc).unwrap();
        value["senses"] = serde_json::json!([2, 3]);
        let err = serde_json::from_value::<Constraint>(value).unwrap_err();
        assert!(err.to_string().contains("sense must be 0, 1, or 2"));

        let mut value = serde_json::to_value(&bc).unwrap();
        value["distributions"] = serde_json::json!(["Body"]);
        assert!(serde_json::from_value::<Constraint>(value).is_err());
    }
}
