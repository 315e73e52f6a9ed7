// Joiner conditions split into index keys and a residual check.

use smallvec::SmallVec;

use streamforge_core::Result;

use super::{JoinerPart, JoinerType};
use crate::fact::FactRef;
use crate::index::{HashKey, IndexEntry, OrdKey, Side};
use crate::stream::function::TupleFn;

pub(crate) struct CompiledJoiner {
    equal: Vec<(TupleFn<HashKey>, TupleFn<HashKey>)>,
    indexed: Option<(JoinerType, TupleFn<OrdKey>, TupleFn<OrdKey>)>,
    residual: Vec<JoinerPart>,
}

impl CompiledJoiner {
    /// Every equal condition feeds the hash key, the first comparison
    /// orders the buckets and everything else is checked per candidate.
    pub(crate) fn compile(parts: Vec<JoinerPart>) -> Self {
        let mut equal = Vec::new();
        let mut indexed = None;
        let mut residual = Vec::new();
        for part in parts {
            match part {
                JoinerPart::Equal { left, right, .. } => equal.push((left, right)),
                JoinerPart::Compare { kind, left, right, .. } if indexed.is_none() => {
                    indexed = Some((kind, left, right));
                }
                other => residual.push(other),
            }
        }
        Self {
            equal,
            indexed,
            residual,
        }
    }

    pub(crate) fn comparison(&self) -> Option<JoinerType> {
        self.indexed.as_ref().map(|(kind, _, _)| *kind)
    }

    /// Extracts the index keys of a tuple arriving on `side`.
    pub(crate) fn entry(&self, side: Side, facts: &[FactRef]) -> Result<IndexEntry> {
        let mut keys = SmallVec::with_capacity(self.equal.len());
        for (left, right) in &self.equal {
            let extract = match side {
                Side::Left => left,
                Side::Right => right,
            };
            keys.push(extract(facts)?);
        }
        let ordered = match &self.indexed {
            Some((_, left, right)) => Some(match side {
                Side::Left => left(facts)?,
                Side::Right => right(facts)?,
            }),
            None => None,
        };
        Ok(IndexEntry {
            equal: keys,
            ordered,
        })
    }

    /// Checks the conditions the index cannot answer.
    pub(crate) fn residual_matches(&self, left: &[FactRef], right: &[FactRef]) -> Result<bool> {
        for part in &self.residual {
            let matched = match part {
                JoinerPart::Compare {
                    kind,
                    left: left_key,
                    right: right_key,
                    ..
                } => kind.matches(&left_key(left)?, &right_key(right)?),
                JoinerPart::Filtering { predicate, .. } => predicate(left, right)?,
                // equal conditions are always indexed
                JoinerPart::Equal { .. } => true,
            };
            if !matched {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
