//! Type-erased fact references carried by tuples.
//!
//! A [`FactRef`] is a cheap, shared handle on a fact or on a value derived by
//! `map` and `group_by`. Planning entities and problem facts compare by
//! identity (concrete type plus planning id), derived values compare by value.

use std::any::{Any, TypeId};
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use streamforge_core::{PlanningId, Result, StreamForgeError};

use crate::index::HashKey;

/// A planning entity or problem fact that can be inserted into a session.
pub trait Fact: PlanningId + Debug + Send + Sync + 'static {}

impl<T> Fact for T where T: PlanningId + Debug + Send + Sync + 'static {}

/// A value derived inside the network: map outputs, group keys and
/// collector results.
pub trait Value: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> Value for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

trait ErasedFact: Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn concrete_type(&self) -> TypeId;

    fn type_name(&self) -> &'static str;

    fn identity(&self) -> HashKey;

    fn dyn_eq(&self, other: &dyn ErasedFact) -> bool;

    fn dyn_hash(&self, state: &mut dyn Hasher);

    fn dyn_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

struct EntityCell<T>(T);

impl<T: Fact> ErasedFact for EntityCell<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn concrete_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn identity(&self) -> HashKey {
        HashKey::new(self.0.planning_id())
    }

    fn dyn_eq(&self, other: &dyn ErasedFact) -> bool {
        other
            .as_any()
            .downcast_ref::<EntityCell<T>>()
            .is_some_and(|other| self.0.planning_id() == other.0.planning_id())
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.0.planning_id().hash(&mut state);
    }

    fn dyn_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

struct ValueCell<T>(T);

impl<T: Value> ErasedFact for ValueCell<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn concrete_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn identity(&self) -> HashKey {
        HashKey::new(self.0.clone())
    }

    fn dyn_eq(&self, other: &dyn ErasedFact) -> bool {
        other
            .as_any()
            .downcast_ref::<ValueCell<T>>()
            .is_some_and(|other| self.0 == other.0)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.0.hash(&mut state);
    }

    fn dyn_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

/// Shared reference to a fact flowing through the network.
///
/// # Example
///
/// ```
/// use streamforge_core::PlanningId;
/// use streamforge_scoring::FactRef;
///
/// #[derive(Debug)]
/// struct Queen { id: usize, row: Option<usize> }
///
/// impl PlanningId for Queen {
///     type Id = usize;
///     fn planning_id(&self) -> usize { self.id }
/// }
///
/// let before = FactRef::new(Queen { id: 3, row: None });
/// let after = FactRef::new(Queen { id: 3, row: Some(1) });
///
/// // Entities keep their identity across changes
/// assert_eq!(before, after);
/// assert_eq!(after.downcast_ref::<Queen>().and_then(|q| q.row), Some(1));
/// ```
#[derive(Clone)]
pub struct FactRef(Arc<dyn ErasedFact>);

impl FactRef {
    /// Wraps a planning entity or problem fact.
    pub fn new<T: Fact>(fact: T) -> Self {
        Self(Arc::new(EntityCell(fact)))
    }

    /// Wraps a derived value, compared by value instead of planning id.
    pub fn value<T: Value>(value: T) -> Self {
        Self(Arc::new(ValueCell(value)))
    }

    /// Returns the wrapped fact if it is a `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        let any = self.0.as_any();
        if let Some(cell) = any.downcast_ref::<EntityCell<T>>() {
            return Some(&cell.0);
        }
        any.downcast_ref::<ValueCell<T>>().map(|cell| &cell.0)
    }

    /// Returns the `TypeId` of the wrapped fact.
    pub fn fact_type(&self) -> TypeId {
        self.0.concrete_type()
    }

    /// Returns the type name of the wrapped fact.
    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    /// Returns the type name without its module path.
    pub fn short_type_name(&self) -> &'static str {
        let name = self.type_name();
        let base = name.split('<').next().unwrap_or(name);
        let start = base.rfind("::").map_or(0, |i| i + 2);
        &name[start..]
    }

    pub(crate) fn identity(&self) -> HashKey {
        self.0.identity()
    }

    /// Returns true if both references point to the same allocation.
    pub fn ptr_eq(&self, other: &FactRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for FactRef {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(&*other.0)
    }
}

impl Eq for FactRef {}

impl Hash for FactRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.dyn_hash(state);
    }
}

impl Debug for FactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.dyn_fmt(f)
    }
}

/// Reads the fact at `index` of a tuple as a `T`.
pub(crate) fn fact_at<T: 'static>(facts: &[FactRef], index: usize) -> Result<&T> {
    let fact = facts.get(index).ok_or_else(|| {
        StreamForgeError::internal(format!(
            "tuple of arity {} has no fact at index {}",
            facts.len(),
            index
        ))
    })?;
    fact.downcast_ref::<T>().ok_or_else(|| {
        StreamForgeError::internal(format!(
            "fact {:?} at index {} is a {}, expected {}",
            fact,
            index,
            fact.type_name(),
            std::any::type_name::<T>()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Debug)]
    struct Lesson {
        id: u32,
        room: &'static str,
    }

    impl PlanningId for Lesson {
        type Id = u32;
        fn planning_id(&self) -> u32 {
            self.id
        }
    }

    #[derive(Debug)]
    struct Room {
        id: u32,
    }

    impl PlanningId for Room {
        type Id = u32;
        fn planning_id(&self) -> u32 {
            self.id
        }
    }

    #[test]
    fn test_entities_compare_by_type_and_id() {
        let a = FactRef::new(Lesson { id: 1, room: "A" });
        let b = FactRef::new(Lesson { id: 1, room: "B" });
        let other_type = FactRef::new(Room { id: 1 });

        assert_eq!(a, b);
        assert_ne!(a, other_type);

        let set: HashSet<FactRef> = [a, b, other_type].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_values_compare_by_value() {
        assert_eq!(FactRef::value("x".to_string()), FactRef::value("x".to_string()));
        assert_ne!(FactRef::value(1u32), FactRef::value(2u32));
        assert_ne!(FactRef::value(1u32), FactRef::value(1u64));
    }

    #[test]
    fn test_downcast() {
        let fact = FactRef::new(Lesson { id: 7, room: "C" });
        assert_eq!(fact.downcast_ref::<Lesson>().map(|l| l.room), Some("C"));
        assert!(fact.downcast_ref::<Room>().is_none());
        assert_eq!(fact.short_type_name(), "Lesson");
        assert_eq!(format!("{:?}", FactRef::value(5i64)), "5");
    }

    #[test]
    fn test_fact_at_reports_type_mismatch() {
        let facts = vec![FactRef::new(Room { id: 1 })];
        assert!(fact_at::<Room>(&facts, 0).is_ok());
        assert!(matches!(fact_at::<Lesson>(&facts, 0), Err(StreamForgeError::Internal(_))));
        assert!(matches!(fact_at::<Room>(&facts, 1), Err(StreamForgeError::Internal(_))));
    }
}
