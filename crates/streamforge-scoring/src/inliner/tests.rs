use streamforge_core::score::{HardSoftDecimalScore, HardSoftScore};
use streamforge_core::PlanningId;

use rust_decimal::Decimal;

use super::*;
use crate::api::weight_overrides::ConstraintWeightOverrides;
use crate::stream::ConstraintFactory;

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

fn graph() -> ConstraintGraph<HardSoftScore> {
    ConstraintGraph::build(&|factory: &ConstraintFactory<HardSoftScore>| {
        vec![
            factory
                .for_each::<Room>()
                .penalize(HardSoftScore::of_hard(2))
                .as_constraint("Penalty"),
            factory
                .for_each::<Room>()
                .reward(HardSoftScore::of_soft(3))
                .as_constraint("Reward"),
            factory
                .for_each::<Room>()
                .penalize_configurable()
                .as_constraint("Configurable"),
        ]
    })
    .unwrap()
}

fn room(id: u32) -> Vec<FactRef> {
    vec![FactRef::new(Room { id })]
}

#[test]
fn test_penalty_negates_and_reward_keeps_sign() {
    let graph = graph();
    let mut inliner = ScoreInliner::new(&graph, &ConstraintWeightOverrides::new(), false);

    let penalty = inliner.impact(0, 1, &room(1));
    let reward = inliner.impact(1, 4, &room(1));
    assert_eq!(inliner.score(), HardSoftScore::of(-2, 12));

    inliner.undo(penalty);
    assert_eq!(inliner.score(), HardSoftScore::of(0, 12));
    inliner.undo(reward);
    assert_eq!(inliner.score(), HardSoftScore::zero());
}

#[test]
fn test_zero_weight_is_noop() {
    let graph = graph();
    let mut inliner = ScoreInliner::new(&graph, &ConstraintWeightOverrides::new(), true);

    assert!(!inliner.is_enabled(2));
    let record = inliner.impact(2, 5, &room(1));
    assert_eq!(inliner.score(), HardSoftScore::zero());
    inliner.undo(record);

    let tracker = inliner.tracker().unwrap();
    assert_eq!(tracker.totals().count(), 2);
    assert!(tracker.indictments().is_empty());
}

#[test]
fn test_override_enables_configurable_constraint() {
    let graph = graph();
    let overrides = ConstraintWeightOverrides::from_pairs([
        ("Configurable", HardSoftScore::of_soft(1)),
        ("Reward", HardSoftScore::zero()),
    ]);
    let inliner = ScoreInliner::new(&graph, &overrides, false);

    assert!(inliner.is_enabled(0));
    assert!(!inliner.is_enabled(1));
    assert!(inliner.is_enabled(2));
}

#[test]
fn test_tracker_follows_impacts() {
    let graph = graph();
    let mut inliner = ScoreInliner::new(&graph, &ConstraintWeightOverrides::new(), true);

    let first = inliner.impact(0, 1, &room(1));
    inliner.impact(0, 1, &room(2));
    {
        let tracker = inliner.tracker().unwrap();
        let total = tracker.totals().next().unwrap();
        assert_eq!(total.match_count(), 2);
        assert_eq!(total.score(), HardSoftScore::of_hard(-4));
        assert_eq!(total.constraint_weight(), HardSoftScore::of_hard(-2));
        assert_eq!(tracker.indictments().len(), 2);
    }

    inliner.undo(first);
    let tracker = inliner.tracker().unwrap();
    assert_eq!(tracker.totals().next().unwrap().match_count(), 1);
    assert!(tracker.indictments().get(&room(1)[0]).is_none());
    assert!(tracker.indictments().get(&room(2)[0]).is_some());
}

#[test]
fn test_decimal_weights_keep_scale() {
    let graph = ConstraintGraph::build(&|factory: &ConstraintFactory<HardSoftDecimalScore>| {
        vec![factory
            .for_each::<Room>()
            .penalize(HardSoftDecimalScore::of_soft(Decimal::new(150, 2)))
            .as_constraint("Cost")]
    })
    .unwrap();
    let mut inliner = ScoreInliner::new(&graph, &ConstraintWeightOverrides::new(), false);

    inliner.impact(0, Decimal::new(2, 0), &room(1));
    assert_eq!(inliner.score().soft().to_string(), "-3.00");
    assert_eq!(inliner.score().to_string(), "0hard/-3.00soft");
}
