// Collectors for grouping and aggregating tuples.
//
// A collector folds the tuples of one group into a result. Every
// accumulator supports retraction, so a group is updated in place when one
// of its tuples leaves instead of being recomputed.
//
// Collectors over uni streams are at the top of this module, collectors
// over bi streams in [`bi`]. [`count`] works for any arity.

#[macro_use]
mod macros;

mod accumulators;

#[cfg(test)]
mod tests;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use streamforge_core::Result;

use crate::fact::FactRef;
use crate::graph::Param;

pub(crate) use accumulators::CountAccumulator;

/// Mutable per-group state of a collector.
pub(crate) trait Accumulator: Send {
    fn insert(&mut self, facts: &[FactRef]) -> Result<()>;

    fn retract(&mut self, facts: &[FactRef]) -> Result<()>;

    fn result(&self) -> FactRef;
}

pub(crate) type AccumulatorSupplier = Arc<dyn Fn() -> Box<dyn Accumulator> + Send + Sync>;

/// Aggregates tuples of type `In` (a tuple of fact types such as `(A,)`)
/// into a result of type `R`.
pub struct Collector<In, R> {
    supplier: AccumulatorSupplier,
    params: Vec<Param>,
    _phantom: PhantomData<fn(&In) -> R>,
}

impl<In, R> Collector<In, R> {
    pub(crate) fn new(tag: &'static str, mapping: Option<Param>, supplier: AccumulatorSupplier) -> Self {
        let mut params = vec![Param::Tag(tag)];
        params.extend(mapping);
        Self {
            supplier,
            params,
            _phantom: PhantomData,
        }
    }

    // Sharing params, then the accumulator factory.
    pub(crate) fn into_parts(self) -> (Vec<Param>, AccumulatorSupplier) {
        (self.params, self.supplier)
    }
}

impl<In, R> fmt::Debug for Collector<In, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collector")
            .field("params", &self.params)
            .finish()
    }
}

/// Counts the tuples of a group.
///
/// # Example
///
/// ```
/// use streamforge_scoring::stream::collector::{count, Collector};
///
/// struct Shift;
///
/// let per_employee: Collector<(Shift,), usize> = count();
/// ```
pub fn count<In>() -> Collector<In, usize> {
    Collector::new(
        "count",
        None,
        Arc::new(|| Box::new(CountAccumulator::default()) as Box<dyn Accumulator>),
    )
}

collectors!([A: 0]);

/// Collectors over bi streams `(A, B)`.
pub mod bi {
    collectors!([A: 0, B: 1]);
}
