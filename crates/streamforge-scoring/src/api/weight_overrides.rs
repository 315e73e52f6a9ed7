// Runtime constraint weight configuration.
//
// Overrides are read once per session: a session built after a change
// sees the new weights, a live session keeps the weights it started with.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use streamforge_core::{ParseableScore, Result, Score, StreamForgeError};

// Holds runtime overrides for constraint weights, keyed by constraint id
// (`package/name`, or `name` without package).
//
// An override replaces the weight given in the stream definition and is
// the only source of weight for configurable constraints.
#[derive(Clone)]
pub struct ConstraintWeightOverrides<Sc: Score> {
    weights: HashMap<String, Sc>,
}

impl<Sc: Score> Debug for ConstraintWeightOverrides<Sc> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintWeightOverrides")
            .field("count", &self.weights.len())
            .finish()
    }
}

impl<Sc: Score> Default for ConstraintWeightOverrides<Sc> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Sc: Score> ConstraintWeightOverrides<Sc> {
    // Creates an empty overrides container.
    pub fn new() -> Self {
        Self {
            weights: HashMap::new(),
        }
    }

    // Creates overrides from an iterator of (constraint id, weight) pairs.
    pub fn from_pairs<I, N>(iter: I) -> Self
    where
        I: IntoIterator<Item = (N, Sc)>,
        N: Into<String>,
    {
        let weights = iter.into_iter().map(|(n, w)| (n.into(), w)).collect();
        Self { weights }
    }

    // Sets the weight for a constraint.
    pub fn put<N: Into<String>>(&mut self, name: N, weight: Sc) {
        self.weights.insert(name.into(), weight);
    }

    // Removes the override for a constraint.
    pub fn remove(&mut self, name: &str) -> Option<Sc> {
        self.weights.remove(name)
    }

    // Gets the overridden weight, or returns the default if not overridden.
    pub fn get_or_default(&self, name: &str, default: Sc) -> Sc {
        self.weights.get(name).copied().unwrap_or(default)
    }

    pub fn get(&self, name: &str) -> Option<&Sc> {
        self.weights.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.weights.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn clear(&mut self) {
        self.weights.clear();
    }

    // Creates an Arc-wrapped version for sharing across threads.
    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl<Sc: ParseableScore> ConstraintWeightOverrides<Sc> {
    // Parses weights written as score strings, e.g. `"0hard/-5soft"`.
    //
    // Fails with a configuration error naming the first constraint whose
    // weight does not parse as `Sc`.
    pub fn parse<'a, I>(weights: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut overrides = Self::new();
        for (name, weight) in weights {
            let parsed = Sc::parse(weight).map_err(|e| {
                StreamForgeError::config(format!(
                    "the weight ({}) of constraint ({}) is not a valid {}: {}",
                    weight,
                    name,
                    std::any::type_name::<Sc>(),
                    e
                ))
            })?;
            overrides.put(name.clone(), parsed);
        }
        Ok(overrides)
    }
}

// Source of constraint weights for a new session.
pub trait WeightProvider<Sc: Score>: Send + Sync {
    // Gets the weight for a constraint by id.
    fn weight(&self, name: &str) -> Option<Sc>;

    // Gets the weight or returns the default.
    fn weight_or_default(&self, name: &str, default: Sc) -> Sc {
        self.weight(name).unwrap_or(default)
    }
}

impl<Sc: Score> WeightProvider<Sc> for ConstraintWeightOverrides<Sc> {
    fn weight(&self, name: &str) -> Option<Sc> {
        self.get(name).copied()
    }
}

impl<Sc: Score> WeightProvider<Sc> for Arc<ConstraintWeightOverrides<Sc>> {
    fn weight(&self, name: &str) -> Option<Sc> {
        self.get(name).copied()
    }
}
