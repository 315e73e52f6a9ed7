//! Constraint identity and impact direction.

use std::fmt;
use std::ops::Neg;

/// Identifies a constraint inside a constraint graph.
///
/// Ids are unique per graph. Weight overrides and match reports address a
/// constraint by its [`full_name`](Self::full_name).
///
/// ```
/// use streamforge_core::ConstraintRef;
///
/// let overlap = ConstraintRef::new("timetable", "Room conflict");
/// assert_eq!(overlap.full_name(), "timetable/Room conflict");
/// assert_eq!(ConstraintRef::named("Room conflict").to_string(), "Room conflict");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstraintRef {
    /// Grouping prefix, empty for constraints declared without one.
    pub package: String,
    pub name: String,
}

impl ConstraintRef {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// A constraint without package.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(String::new(), name)
    }

    /// Returns `package/name`, or the bare name without package.
    pub fn full_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ConstraintRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}/{}", self.package, self.name)
        }
    }
}

/// Direction in which a constraint moves the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImpactType {
    Penalty,
    Reward,
}

impl ImpactType {
    /// Turns a configured weight into the signed impact of one match.
    ///
    /// ```
    /// use streamforge_core::{ImpactType, SimpleScore};
    ///
    /// assert_eq!(ImpactType::Penalty.apply(SimpleScore::of(2)), SimpleScore::of(-2));
    /// assert_eq!(ImpactType::Reward.apply(SimpleScore::of(2)), SimpleScore::of(2));
    /// ```
    pub fn apply<W: Neg<Output = W>>(self, weight: W) -> W {
        match self {
            ImpactType::Penalty => -weight,
            ImpactType::Reward => weight,
        }
    }
}
