use super::Constraint;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds an ordered collection of constraints with unique names
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ConstraintCollection {
    /// All constraints in insertion order
    all: Vec<Constraint>,
}

impl ConstraintCollection {
    /// Allocates a new empty collection
    pub fn new() -> Self {
        ConstraintCollection { all: Vec::new() }
    }

    /// Adds a new constraint
    ///
    /// Returns an error if a constraint with the same name already exists.
    pub fn add(&mut self, constraint: Constraint) -> Result<&mut Self, StrError> {
        if self.get(&constraint.name).is_some() {
            return Err("a constraint with the same name already exists");
        }
        self.all.push(constraint);
        Ok(self)
    }

    /// Adds a new constraint or merges it into the existing constraint with the same name
    ///
    /// The existing constraint keeps its position in the collection.
    pub fn add_or_merge(&mut self, constraint: Constraint) -> Result<&mut Self, StrError> {
        match self.all.iter_mut().find(|c| c.name == constraint.name) {
            Some(existing) => {
                existing.merge(&constraint)?;
            }
            None => self.all.push(constraint),
        }
        Ok(self)
    }

    /// Returns the constraint with the given name
    pub fn get(&self, name: &str) -> Option<&Constraint> {
        self.all.iter().find(|c| c.name == name)
    }

    /// Returns the number of constraints
    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// Returns true if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Returns an iterator over the constraints in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.all.iter()
    }

    /// Returns the names of the constraints in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.all.iter().map(|c| c.name.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a ConstraintCollection {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;
    fn into_iter(self) -> Self::IntoIter {
        self.all.iter()
    }
}

impl fmt::Display for ConstraintCollection {
    /// Prints a table with the name, kind, and number of entries of each constraint
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Constraints")?;
        writeln!(f, "===========")?;
        for c in &self.all {
            writeln!(f, "{:<24} {:<12} {:<8} {:>6}", c.name, c.kind, c.applied_to, c.len())?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
