// Type-erased tuple functions stored in the constraint graph.
//
// Typed closures from the stream API are wrapped once at definition time;
// the wrappers read the tuple's facts back as their concrete types.

use std::sync::Arc;

use streamforge_core::Result;

use crate::fact::FactRef;

pub(crate) type TupleFn<T> = Arc<dyn Fn(&[FactRef]) -> Result<T> + Send + Sync>;

pub(crate) type JoinPredicate = Arc<dyn Fn(&[FactRef], &[FactRef]) -> Result<bool> + Send + Sync>;

#[inline]
pub(crate) fn tuple_fn<T, F>(f: F) -> TupleFn<T>
where
    F: Fn(&[FactRef]) -> Result<T> + Send + Sync + 'static,
{
    Arc::new(f)
}

#[inline]
pub(crate) fn join_predicate<F>(f: F) -> JoinPredicate
where
    F: Fn(&[FactRef], &[FactRef]) -> Result<bool> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wraps a typed closure over the facts of a tuple.
///
/// `erase!(f, [A: 0, B: 1])` reads fact 0 as `A` and fact 1 as `B`;
/// a trailing path maps the result, e.g. `erase!(f, [A: 0], HashKey::new)`.
macro_rules! erase {
    ($f:ident, [$($t:ident : $i:tt),+]) => {
        $crate::stream::function::tuple_fn(move |facts| {
            Ok($f($($crate::fact::fact_at::<$t>(facts, $i)?),+))
        })
    };
    ($f:ident, [$($t:ident : $i:tt),+], $wrap:path) => {
        $crate::stream::function::tuple_fn(move |facts| {
            Ok($wrap($f($($crate::fact::fact_at::<$t>(facts, $i)?),+)))
        })
    };
}
