// Accumulator implementations behind the collector constructors.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::ops::{AddAssign, SubAssign};

use streamforge_core::{Result, StreamForgeError};

use super::Accumulator;
use crate::fact::{FactRef, Value};
use crate::stream::function::TupleFn;

fn missing<V: std::fmt::Debug>(collector: &str, value: &V) -> StreamForgeError {
    StreamForgeError::internal(format!(
        "{} collector retracted {:?}, which it never accumulated",
        collector, value
    ))
}

#[derive(Default)]
pub(crate) struct CountAccumulator {
    count: usize,
}

impl Accumulator for CountAccumulator {
    fn insert(&mut self, _facts: &[FactRef]) -> Result<()> {
        self.count += 1;
        Ok(())
    }

    fn retract(&mut self, _facts: &[FactRef]) -> Result<()> {
        self.count = self
            .count
            .checked_sub(1)
            .ok_or_else(|| StreamForgeError::internal("count collector retracted below zero"))?;
        Ok(())
    }

    fn result(&self) -> FactRef {
        FactRef::value(self.count)
    }
}

pub(crate) struct CountDistinctAccumulator<V> {
    mapping: TupleFn<V>,
    counts: HashMap<V, usize>,
}

impl<V> CountDistinctAccumulator<V> {
    pub(crate) fn new(mapping: TupleFn<V>) -> Self {
        Self {
            mapping,
            counts: HashMap::new(),
        }
    }
}

impl<V> Accumulator for CountDistinctAccumulator<V>
where
    V: Eq + Hash + Send + Sync + 'static,
{
    fn insert(&mut self, facts: &[FactRef]) -> Result<()> {
        *self.counts.entry((self.mapping)(facts)?).or_insert(0) += 1;
        Ok(())
    }

    fn retract(&mut self, facts: &[FactRef]) -> Result<()> {
        let value = (self.mapping)(facts)?;
        match self.counts.get_mut(&value) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.counts.remove(&value);
            }
            None => {
                return Err(StreamForgeError::internal(
                    "count_distinct collector retracted a value it never accumulated",
                ))
            }
        }
        Ok(())
    }

    fn result(&self) -> FactRef {
        FactRef::value(self.counts.len())
    }
}

pub(crate) struct SumAccumulator<V> {
    mapping: TupleFn<V>,
    total: V,
}

impl<V: Default> SumAccumulator<V> {
    pub(crate) fn new(mapping: TupleFn<V>) -> Self {
        Self {
            mapping,
            total: V::default(),
        }
    }
}

impl<V> Accumulator for SumAccumulator<V>
where
    V: Value + Default + Copy + AddAssign + SubAssign,
{
    fn insert(&mut self, facts: &[FactRef]) -> Result<()> {
        self.total += (self.mapping)(facts)?;
        Ok(())
    }

    fn retract(&mut self, facts: &[FactRef]) -> Result<()> {
        self.total -= (self.mapping)(facts)?;
        Ok(())
    }

    fn result(&self) -> FactRef {
        FactRef::value(self.total)
    }
}

pub(crate) struct ExtremumAccumulator<V> {
    mapping: TupleFn<V>,
    values: BTreeMap<V, usize>,
    largest: bool,
}

impl<V> ExtremumAccumulator<V> {
    pub(crate) fn min(mapping: TupleFn<V>) -> Self {
        Self {
            mapping,
            values: BTreeMap::new(),
            largest: false,
        }
    }

    pub(crate) fn max(mapping: TupleFn<V>) -> Self {
        Self {
            mapping,
            values: BTreeMap::new(),
            largest: true,
        }
    }
}

impl<V> Accumulator for ExtremumAccumulator<V>
where
    V: Value + Ord,
{
    fn insert(&mut self, facts: &[FactRef]) -> Result<()> {
        *self.values.entry((self.mapping)(facts)?).or_insert(0) += 1;
        Ok(())
    }

    fn retract(&mut self, facts: &[FactRef]) -> Result<()> {
        let value = (self.mapping)(facts)?;
        match self.values.get_mut(&value) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.values.remove(&value);
            }
            None => return Err(missing(if self.largest { "max" } else { "min" }, &value)),
        }
        Ok(())
    }

    fn result(&self) -> FactRef {
        let extremum = if self.largest {
            self.values.keys().next_back()
        } else {
            self.values.keys().next()
        };
        FactRef::value(extremum.cloned())
    }
}

pub(crate) struct ToListAccumulator<V> {
    mapping: TupleFn<V>,
    values: Vec<V>,
}

impl<V> ToListAccumulator<V> {
    pub(crate) fn new(mapping: TupleFn<V>) -> Self {
        Self {
            mapping,
            values: Vec::new(),
        }
    }
}

impl<V: Value> Accumulator for ToListAccumulator<V> {
    fn insert(&mut self, facts: &[FactRef]) -> Result<()> {
        self.values.push((self.mapping)(facts)?);
        Ok(())
    }

    fn retract(&mut self, facts: &[FactRef]) -> Result<()> {
        let value = (self.mapping)(facts)?;
        let position = self
            .values
            .iter()
            .position(|candidate| *candidate == value)
            .ok_or_else(|| missing("to_list", &value))?;
        self.values.remove(position);
        Ok(())
    }

    fn result(&self) -> FactRef {
        FactRef::value(self.values.clone())
    }
}
