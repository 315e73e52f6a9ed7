//! Generic entity test fixtures.
//!
//! # Example
//!
//! ```
//! use streamforge_test::entity::{TestEntity, TestSolution};
//!
//! let solution = TestSolution::with_entities(vec![
//!     TestEntity::assigned(1, 10),
//!     TestEntity::unassigned(2),
//! ]);
//! assert_eq!(solution.unassigned_count(), 1);
//! ```

use streamforge_core::score::SimpleScore;
use streamforge_core::{PlanningId, PlanningSolution};

/// A test entity with an id and an optional value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestEntity {
    pub id: usize,
    pub value: Option<i32>,
}

impl TestEntity {
    pub fn new(id: usize, value: Option<i32>) -> Self {
        Self { id, value }
    }

    /// Creates a test entity with an assigned value.
    pub fn assigned(id: usize, value: i32) -> Self {
        Self {
            id,
            value: Some(value),
        }
    }

    /// Creates a test entity with no value assigned.
    pub fn unassigned(id: usize) -> Self {
        Self { id, value: None }
    }
}

impl PlanningId for TestEntity {
    type Id = usize;

    fn planning_id(&self) -> usize {
        self.id
    }
}

/// A test solution containing test entities and an optional score.
#[derive(Clone, Debug)]
pub struct TestSolution {
    pub entities: Vec<TestEntity>,
    pub score: Option<SimpleScore>,
}

impl TestSolution {
    pub fn empty() -> Self {
        Self::with_entities(Vec::new())
    }

    pub fn with_entities(entities: Vec<TestEntity>) -> Self {
        Self {
            entities,
            score: None,
        }
    }

    /// Creates a solution from optional values; entity ids follow the order.
    pub fn with_values(values: &[Option<i32>]) -> Self {
        Self::with_entities(
            values
                .iter()
                .enumerate()
                .map(|(id, value)| TestEntity::new(id, *value))
                .collect(),
        )
    }

    /// Returns the number of entities without a value.
    pub fn unassigned_count(&self) -> usize {
        self.entities.iter().filter(|e| e.value.is_none()).count()
    }

    /// Counts unordered pairs of entities sharing a value.
    pub fn equal_value_pairs(&self) -> usize {
        let mut pairs = 0;
        for (i, a) in self.entities.iter().enumerate() {
            for b in &self.entities[i + 1..] {
                if a.value.is_some() && a.value == b.value {
                    pairs += 1;
                }
            }
        }
        pairs
    }
}

impl PlanningSolution for TestSolution {
    type Score = SimpleScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_creation() {
        let e1 = TestEntity::new(1, Some(10));
        assert_eq!(e1.id, 1);
        assert_eq!(e1.value, Some(10));
        assert_eq!(TestEntity::assigned(2, 20).value, Some(20));
        assert_eq!(TestEntity::unassigned(3).value, None);
        assert_eq!(e1.planning_id(), 1);
    }

    #[test]
    fn test_equal_value_pairs() {
        let solution = TestSolution::with_values(&[Some(1), Some(1), Some(2), None, None]);
        assert_eq!(solution.equal_value_pairs(), 1);
        assert_eq!(solution.unassigned_count(), 2);
    }

    #[test]
    fn test_score_accessors() {
        let mut solution = TestSolution::empty();
        assert_eq!(solution.score(), None);
        solution.set_score(Some(SimpleScore::of(-4)));
        assert_eq!(solution.score(), Some(SimpleScore::of(-4)));
    }
}
