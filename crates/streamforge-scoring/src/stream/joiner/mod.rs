// Joiner functions for constraint stream joins.
//
// Joiners define matching conditions between the tuples of a stream (the
// left side) and the facts of another stream (the right side). A join
// accepts one [`Joiner`], which may combine several conditions with
// [`Joiner::and`]:
//
// - equal conditions select a hash bucket of the opposite side's index
// - the first comparison condition orders the bucket for a range scan
// - further comparisons and filtering conditions are checked per match
//
// # Cross-joins
//
// ```
// use streamforge_scoring::stream::joiner::{equal_bi, less_than, JoinerType};
//
// struct Shift { employee_id: Option<usize>, start: i64 }
// struct Employee { id: usize, hired: i64 }
//
// let joiner = equal_bi(|s: &Shift| s.employee_id, |e: &Employee| Some(e.id))
//     .and(less_than(|s: &Shift| s.start, |e: &Employee| e.hired));
//
// assert_eq!(joiner.joiner_types(), vec![JoinerType::Equal, JoinerType::LessThan]);
// ```
//
// Joiners for longer left tuples live in [`tri`], [`quad`] and [`penta`].

#[macro_use]
mod macros;

mod compiled;

pub mod penta;
pub mod quad;
pub mod tri;

#[cfg(test)]
mod tests;

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::graph::Param;
use crate::index::{HashKey, OrdKey};
use crate::stream::function::{JoinPredicate, TupleFn};

pub(crate) use compiled::CompiledJoiner;

/// The comparison a joiner condition applies to its two keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinerType {
    Equal,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    /// Arbitrary predicate, never indexed.
    Filtering,
}

impl JoinerType {
    /// Applies the comparison to two ordered keys, read as `left OP right`.
    pub fn matches<T: Ord + ?Sized>(self, left: &T, right: &T) -> bool {
        match self {
            JoinerType::Equal => left == right,
            JoinerType::LessThan => left < right,
            JoinerType::LessThanOrEqual => left <= right,
            JoinerType::GreaterThan => left > right,
            JoinerType::GreaterThanOrEqual => left >= right,
            JoinerType::Filtering => true,
        }
    }
}

impl fmt::Display for JoinerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JoinerType::Equal => "EQUAL",
            JoinerType::LessThan => "LESS_THAN",
            JoinerType::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            JoinerType::GreaterThan => "GREATER_THAN",
            JoinerType::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            JoinerType::Filtering => "FILTERING",
        };
        f.write_str(name)
    }
}

#[derive(Clone)]
pub(crate) enum JoinerPart {
    Equal {
        left: TupleFn<HashKey>,
        right: TupleFn<HashKey>,
        params: [Param; 2],
    },
    Compare {
        kind: JoinerType,
        left: TupleFn<OrdKey>,
        right: TupleFn<OrdKey>,
        params: [Param; 2],
    },
    Filtering {
        predicate: JoinPredicate,
        param: Param,
    },
}

impl JoinerPart {
    pub(crate) fn joiner_type(&self) -> JoinerType {
        match self {
            JoinerPart::Equal { .. } => JoinerType::Equal,
            JoinerPart::Compare { kind, .. } => *kind,
            JoinerPart::Filtering { .. } => JoinerType::Filtering,
        }
    }

    fn push_params(&self, out: &mut Vec<Param>) {
        out.push(Param::Joiner(self.joiner_type()));
        match self {
            JoinerPart::Equal { params, .. } | JoinerPart::Compare { params, .. } => {
                out.extend(params.iter().cloned())
            }
            JoinerPart::Filtering { param, .. } => out.push(param.clone()),
        }
    }
}

/// A composite join condition between left tuples of type `L` (a tuple of
/// fact types such as `(A, B)`) and right facts of type `R`.
pub struct Joiner<L, R> {
    parts: Vec<JoinerPart>,
    _phantom: PhantomData<fn(&L, &R)>,
}

impl<L, R> Joiner<L, R> {
    pub(crate) fn from_part(part: JoinerPart) -> Self {
        Self {
            parts: vec![part],
            _phantom: PhantomData,
        }
    }

    /// Combines this joiner with another using AND semantics.
    pub fn and(mut self, other: Joiner<L, R>) -> Self {
        self.parts.extend(other.parts);
        self
    }

    /// Combines any number of joiners using AND semantics.
    ///
    /// Joining with an empty combination is a configuration error reported
    /// when the constraint graph is built.
    pub fn all<I>(joiners: I) -> Self
    where
        I: IntoIterator<Item = Joiner<L, R>>,
    {
        Self {
            parts: joiners.into_iter().flat_map(|joiner| joiner.parts).collect(),
            _phantom: PhantomData,
        }
    }

    /// Returns the type of each condition, in declaration order.
    pub fn joiner_types(&self) -> Vec<JoinerType> {
        self.parts.iter().map(JoinerPart::joiner_type).collect()
    }

    /// Returns the number of conditions.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns true if no condition was supplied.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub(crate) fn sharing_params(&self) -> Vec<Param> {
        let mut params = Vec::with_capacity(self.parts.len() * 3);
        for part in &self.parts {
            part.push_params(&mut params);
        }
        params
    }

    pub(crate) fn into_parts(self) -> Vec<JoinerPart> {
        self.parts
    }
}

impl<L, R> fmt::Debug for Joiner<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Joiner")
            .field("types", &self.joiner_types())
            .finish()
    }
}

/// Creates a joiner matching when both sides map to the same key.
///
/// # Example
///
/// ```
/// use streamforge_scoring::stream::joiner::{equal, JoinerType};
///
/// struct Shift { employee_id: usize }
///
/// let same_employee = equal(|s: &Shift| s.employee_id);
/// assert_eq!(same_employee.joiner_types(), vec![JoinerType::Equal]);
/// ```
pub fn equal<A, K, F>(mapping: F) -> Joiner<(A,), A>
where
    A: 'static,
    K: Eq + Hash + Send + Sync + 'static,
    F: Fn(&A) -> K + Send + Sync + 'static,
{
    let param = Param::of_closure(&mapping);
    let mapping = std::sync::Arc::new(mapping);
    let left = std::sync::Arc::clone(&mapping);
    let right = mapping;
    Joiner::from_part(JoinerPart::Equal {
        left: crate::stream::function::tuple_fn(move |facts| {
            Ok(HashKey::new(left(crate::fact::fact_at::<A>(facts, 0)?)))
        }),
        right: crate::stream::function::tuple_fn(move |facts| {
            Ok(HashKey::new(right(crate::fact::fact_at::<A>(facts, 0)?)))
        }),
        params: [param.clone(), param],
    })
}

/// Creates a joiner matching when `left(a) == right(b)`.
pub fn equal_bi<A, B, K, Fa, Fb>(left: Fa, right: Fb) -> Joiner<(A,), B>
where
    A: 'static,
    B: 'static,
    K: Eq + Hash + Send + Sync + 'static,
    Fa: Fn(&A) -> K + Send + Sync + 'static,
    Fb: Fn(&B) -> K + Send + Sync + 'static,
{
    joiner_equal!(left, [A: 0], right, B)
}

joiner_comparisons!([A: 0], B);

/// Creates a joiner that matches based on a custom predicate.
///
/// # Example
///
/// ```
/// use streamforge_scoring::stream::joiner::{filtering, JoinerType};
///
/// struct Task { priority: i32 }
///
/// // Match tasks where a has higher priority than b
/// let higher_priority = filtering(|a: &Task, b: &Task| a.priority > b.priority);
/// assert_eq!(higher_priority.joiner_types(), vec![JoinerType::Filtering]);
/// ```
pub fn filtering<A, B, F>(predicate: F) -> Joiner<(A,), B>
where
    A: 'static,
    B: 'static,
    F: Fn(&A, &B) -> bool + Send + Sync + 'static,
{
    joiner_filtering!(predicate, [A: 0], B)
}
