use streamforge_config::{EnvironmentMode, ScoringConfig};
use streamforge_core::{HardSoftScore, Result, Score, SimpleScore, StreamForgeError};
use streamforge_test::{Employee, Shift, ShiftSolution, TestEntity, TestSolution};

use super::{ScoreDirector, ScoreDirectorFactory, SessionScoreDirector, SessionSolution};
use crate::api::ConstraintWeightOverrides;
use crate::fact::FactRef;
use crate::session::ConstraintSession;
use crate::stream::joiner::equal;
use crate::stream::{Constraint, ConstraintFactory};

impl SessionSolution for TestSolution {
    fn insert_into(&self, session: &mut ConstraintSession<SimpleScore>) -> Result<()> {
        for entity in &self.entities {
            session.insert(entity.clone())?;
        }
        Ok(())
    }

    fn entity_count(&self, descriptor_index: usize) -> Option<usize> {
        (descriptor_index == 0).then_some(self.entities.len())
    }

    fn entity_fact(&self, descriptor_index: usize, entity_index: usize) -> Option<FactRef> {
        if descriptor_index != 0 {
            return None;
        }
        self.entities.get(entity_index).cloned().map(FactRef::new)
    }

    fn entity_uninitialized_count(&self, descriptor_index: usize, entity_index: usize) -> usize {
        match self.entities.get(entity_index) {
            Some(entity) if descriptor_index == 0 && entity.value.is_none() => 1,
            _ => 0,
        }
    }
}

impl SessionSolution for ShiftSolution {
    fn insert_into(&self, session: &mut ConstraintSession<HardSoftScore>) -> Result<()> {
        for employee in &self.employees {
            session.insert(employee.clone())?;
        }
        for shift in &self.shifts {
            session.insert(shift.clone())?;
        }
        Ok(())
    }

    fn entity_count(&self, descriptor_index: usize) -> Option<usize> {
        (descriptor_index == 0).then_some(self.shifts.len())
    }

    fn entity_fact(&self, descriptor_index: usize, entity_index: usize) -> Option<FactRef> {
        if descriptor_index != 0 {
            return None;
        }
        self.shifts.get(entity_index).cloned().map(FactRef::new)
    }
}

fn constraints(factory: &ConstraintFactory<SimpleScore>) -> Vec<Constraint> {
    vec![
        factory
            .for_each::<TestEntity>()
            .filter(|e: &TestEntity| e.value.is_none())
            .penalize(SimpleScore::ONE)
            .as_constraint("Unassigned"),
        factory
            .for_each_unique_pair_with(equal(|e: &TestEntity| e.value))
            .filter(|a: &TestEntity, _: &TestEntity| a.value.is_some())
            .penalize_configurable()
            .as_constraint("Same value"),
    ]
}

fn director(solution: TestSolution) -> SessionScoreDirector<TestSolution> {
    ScoreDirectorFactory::new(&constraints)
        .unwrap()
        .build_score_director(solution)
        .unwrap()
}

fn assign(director: &mut SessionScoreDirector<TestSolution>, index: usize, value: Option<i32>) {
    director.before_variable_changed(0, index, "value").unwrap();
    director.working_solution_mut().unwrap().entities[index].value = value;
    director.after_variable_changed(0, index, "value").unwrap();
}

#[test]
fn test_variable_change_updates_score_and_init_score() {
    let mut director = director(TestSolution::with_values(&[None, None, None]));
    let score = director.calculate_score().unwrap();
    assert_eq!(score, SimpleScore::of(-3).with_init_score(-3));
    assert!(!score.is_solution_initialized());

    assign(&mut director, 1, Some(7));
    let score = director.calculate_score().unwrap();
    assert_eq!(score, SimpleScore::of(-2).with_init_score(-2));
    assert_eq!(director.working_solution().unwrap().score, Some(score));
}

#[test]
fn test_configurable_weight_from_config() {
    let config = ScoringConfig::new().with_constraint_weight("Same value", "-2");
    let factory = ScoreDirectorFactory::from_config(&constraints, &config).unwrap();
    let mut director = factory
        .build_score_director(TestSolution::with_values(&[Some(1), Some(1), Some(2)]))
        .unwrap();
    // a negative weight turns the penalty into a reward
    assert_eq!(director.calculate_score().unwrap(), SimpleScore::of(2));

    director
        .after_constraint_configuration_changed(ConstraintWeightOverrides::from_pairs([(
            "Same value",
            SimpleScore::of(3),
        )]))
        .unwrap();
    assert_eq!(director.calculate_score().unwrap(), SimpleScore::of(-3));
}

#[test]
fn test_invalid_weight_in_config_is_a_config_error() {
    let config = ScoringConfig::new().with_constraint_weight("Same value", "0hard/-1soft");
    let err = ScoreDirectorFactory::<TestSolution>::from_config(&constraints, &config).unwrap_err();
    assert!(matches!(err, StreamForgeError::Config(_)));
}

#[test]
fn test_entities_added_and_removed() {
    let config = ScoringConfig::new().with_constraint_weight("Same value", "1");
    let factory = ScoreDirectorFactory::from_config(&constraints, &config).unwrap();
    let mut director = factory
        .build_score_director(TestSolution::with_values(&[Some(1), Some(2)]))
        .unwrap();
    assert_eq!(director.calculate_score().unwrap(), SimpleScore::ZERO);

    director
        .working_solution_mut()
        .unwrap()
        .entities
        .push(TestEntity::assigned(2, 1));
    director.after_entity_added(0, 2).unwrap();
    assert_eq!(director.calculate_score().unwrap(), SimpleScore::of(-1));
    assert_eq!(director.entity_count(0), Some(3));

    director.before_entity_removed(0, 0).unwrap();
    director.working_solution_mut().unwrap().entities.remove(0);
    assert_eq!(director.calculate_score().unwrap(), SimpleScore::ZERO);
}

#[test]
fn test_asserted_mode_accepts_announced_changes() {
    let config = ScoringConfig::new()
        .with_environment_mode(EnvironmentMode::FullAssert)
        .with_constraint_weight("Same value", "1");
    let factory = ScoreDirectorFactory::from_config(&constraints, &config).unwrap();
    let mut director = factory
        .build_score_director(TestSolution::with_values(&[None, Some(1), Some(2)]))
        .unwrap();
    assert!(director.is_asserted());

    for (index, value) in [(0, Some(1)), (2, Some(1)), (1, None), (0, None)] {
        assign(&mut director, index, value);
        director.calculate_score().unwrap();
    }
    let totals = director.constraint_match_totals().unwrap();
    assert_eq!(totals.len(), 2);
}

#[test]
fn test_asserted_mode_detects_unannounced_changes() {
    let config = ScoringConfig::new()
        .with_environment_mode(EnvironmentMode::FullAssert)
        .with_constraint_weight("Same value", "1");
    let factory = ScoreDirectorFactory::from_config(&constraints, &config).unwrap();
    let mut director = factory
        .build_score_director(TestSolution::with_values(&[Some(1), Some(2)]))
        .unwrap();
    assert_eq!(director.calculate_score().unwrap(), SimpleScore::ZERO);

    director.working_solution_mut().unwrap().entities[1].value = Some(1);
    let err = director.calculate_score().unwrap_err();
    match err {
        StreamForgeError::ScoreCorruption(report) => {
            assert!(report.contains("Same value"), "{}", report);
            assert!(report.contains("missing"), "{}", report);
        }
        other => panic!("expected a corruption error, got {:?}", other),
    }
}

#[test]
fn test_fast_assert_checks_every_nth_calculation() {
    let config = ScoringConfig::new()
        .with_environment_mode(EnvironmentMode::FastAssert)
        .with_assertion_interval(2)
        .with_constraint_weight("Same value", "1");
    let factory = ScoreDirectorFactory::from_config(&constraints, &config).unwrap();
    let mut director = factory
        .build_score_director(TestSolution::with_values(&[Some(1), Some(2)]))
        .unwrap();
    director.working_solution_mut().unwrap().entities[1].value = Some(1);

    assert!(director.calculate_score().is_ok());
    assert!(matches!(
        director.calculate_score(),
        Err(StreamForgeError::ScoreCorruption(_))
    ));
}

#[test]
fn test_protocol_violations() {
    let factory = ScoreDirectorFactory::<TestSolution>::new(&constraints).unwrap();
    let mut director = factory
        .build_score_director(TestSolution::with_values(&[Some(1)]))
        .unwrap();

    assert!(matches!(
        director.after_variable_changed(0, 5, "value"),
        Err(StreamForgeError::InvalidState(_))
    ));
    assert!(matches!(
        director.constraint_match_totals(),
        Err(StreamForgeError::Unsupported(_))
    ));
    assert!(matches!(
        director.explain_score(),
        Err(StreamForgeError::Unsupported(_))
    ));

    let mut empty = SessionScoreDirector::<TestSolution>::new(
        std::sync::Arc::clone(factory.graph()),
        std::sync::Arc::new(ConstraintWeightOverrides::new()),
        false,
        None,
    );
    assert!(matches!(
        empty.calculate_score(),
        Err(StreamForgeError::InvalidState(_))
    ));
    assert!(empty.working_solution().is_err());
    assert_eq!(empty.entity_count(0), None);
}

#[test]
fn test_explain_score_with_tracking() {
    let config = ScoringConfig::new()
        .with_constraint_match_enabled(true)
        .with_constraint_weight("Same value", "1");
    let factory = ScoreDirectorFactory::from_config(&constraints, &config).unwrap();
    let mut director = factory
        .build_score_director(TestSolution::with_values(&[Some(4), Some(4), None]))
        .unwrap();

    let explanation = director.explain_score().unwrap();
    assert_eq!(explanation.total_match_count(), 2);
    let indictments = director.indictment_map().unwrap();
    assert_eq!(indictments.len(), 3);
}

#[test]
fn test_hard_soft_weights_are_parsed_with_the_score_type() {
    fn overlap(factory: &ConstraintFactory<HardSoftScore>) -> Vec<Constraint> {
        vec![factory
            .for_each_unique_pair_with(equal(|s: &Shift| s.employee))
            .filter(|a: &Shift, b: &Shift| a.employee.is_some() && a.overlaps(b))
            .penalize_configurable()
            .as_constraint("Overlapping shifts")]
    }

    let config = ScoringConfig::new().with_constraint_weight("Overlapping shifts", "1hard/0soft");
    let factory = ScoreDirectorFactory::from_config(&overlap, &config).unwrap();
    let solution = ShiftSolution::new(
        vec![Employee::new(0, "Ann")],
        vec![
            Shift::new(0, Some(0), 0, 8),
            Shift::new(1, Some(0), 4, 12),
            Shift::new(2, None, 4, 12),
        ],
    );
    let mut director = factory.build_score_director(solution).unwrap();
    assert_eq!(director.calculate_score().unwrap(), HardSoftScore::of(-1, 0));

    director.before_variable_changed(0, 1, "employee").unwrap();
    director.working_solution_mut().unwrap().shifts[1].employee = None;
    director.after_variable_changed(0, 1, "employee").unwrap();
    assert_eq!(director.calculate_score().unwrap(), HardSoftScore::ZERO);
}
