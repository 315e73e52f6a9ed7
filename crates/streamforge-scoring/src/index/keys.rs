// Type-erased join keys.

use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

trait ErasedHashKey: Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn dyn_eq(&self, other: &dyn ErasedHashKey) -> bool;

    fn dyn_hash(&self, state: &mut dyn Hasher);

    fn type_name(&self) -> &'static str;
}

impl<K> ErasedHashKey for K
where
    K: Eq + Hash + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn ErasedHashKey) -> bool {
        other.as_any().downcast_ref::<K>() == Some(self)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<K>().hash(&mut state);
        self.hash(&mut state);
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<K>()
    }
}

/// A key extracted by an equal joiner, compared by `Eq` and `Hash`.
#[derive(Clone)]
pub struct HashKey(Arc<dyn ErasedHashKey>);

impl HashKey {
    pub fn new<K>(key: K) -> Self
    where
        K: Eq + Hash + Send + Sync + 'static,
    {
        Self(Arc::new(key))
    }
}

impl PartialEq for HashKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(&*other.0)
    }
}

impl Eq for HashKey {}

impl Hash for HashKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.dyn_hash(state);
    }
}

impl fmt::Debug for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashKey<{}>", self.0.type_name())
    }
}

trait ErasedOrdKey: Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn concrete_type(&self) -> TypeId;

    fn dyn_cmp(&self, other: &dyn ErasedOrdKey) -> Ordering;

    fn type_name(&self) -> &'static str;
}

impl<K> ErasedOrdKey for K
where
    K: Ord + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn concrete_type(&self) -> TypeId {
        TypeId::of::<K>()
    }

    fn dyn_cmp(&self, other: &dyn ErasedOrdKey) -> Ordering {
        match other.as_any().downcast_ref::<K>() {
            Some(other) => self.cmp(other),
            // keys of one index share a type; this only orders mixed keys consistently
            None => TypeId::of::<K>().cmp(&other.concrete_type()),
        }
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<K>()
    }
}

/// A key extracted by a comparison joiner, totally ordered.
#[derive(Clone)]
pub struct OrdKey(Arc<dyn ErasedOrdKey>);

impl OrdKey {
    pub fn new<K>(key: K) -> Self
    where
        K: Ord + Send + Sync + 'static,
    {
        Self(Arc::new(key))
    }
}

impl PartialEq for OrdKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrdKey {}

impl PartialOrd for OrdKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrdKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.dyn_cmp(&*other.0)
    }
}

impl fmt::Debug for OrdKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrdKey<{}>", self.0.type_name())
    }
}
