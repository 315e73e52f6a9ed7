//! Tests for score types.

use rust_decimal::Decimal;

use super::*;

fn assert_round_trip<S: ParseableScore>(score: S) {
    assert_eq!(S::parse(&score.to_string()).unwrap(), score, "full form of {:?}", score);
    assert_eq!(
        S::parse(&score.to_short_string()).unwrap(),
        score,
        "short form of {:?}",
        score
    );
}

// ============================================================================
// SimpleScore Tests
// ============================================================================

mod simple_score {
    use super::*;

    #[test]
    fn test_creation() {
        let score = SimpleScore::of(-5);
        assert_eq!(score.score(), -5);
        assert_eq!(score.init_score(), 0);
    }

    #[test]
    fn test_feasibility() {
        assert!(SimpleScore::of(0).is_feasible());
        assert!(SimpleScore::of(-10).is_feasible());
        assert!(!SimpleScore::of_uninitialized(-1, 10).is_feasible());
    }

    #[test]
    fn test_comparison() {
        let s1 = SimpleScore::of(-10);
        let s2 = SimpleScore::of(-5);
        let s3 = SimpleScore::of(0);

        assert!(s3 > s2);
        assert!(s2 > s1);
        assert!(s1 < s2);

        // Uninitialized solutions lose regardless of their levels
        assert!(SimpleScore::of_uninitialized(-1, 100) < s1);
    }

    #[test]
    fn test_arithmetic() {
        let s1 = SimpleScore::of(10);
        let s2 = SimpleScore::of(3);

        assert_eq!(s1 + s2, SimpleScore::of(13));
        assert_eq!(s1 - s2, SimpleScore::of(7));
        assert_eq!(-s1, SimpleScore::of(-10));
        assert_eq!(s1.multiply(-2), SimpleScore::of(-20));
    }

    #[test]
    fn test_parse() {
        assert_eq!(SimpleScore::parse("42").unwrap(), SimpleScore::of(42));
        assert_eq!(SimpleScore::parse("-10").unwrap(), SimpleScore::of(-10));
        assert_eq!(SimpleScore::parse("0init/0").unwrap(), SimpleScore::of(0));
        assert_eq!(
            SimpleScore::parse("-3init").unwrap(),
            SimpleScore::of_uninitialized(-3, 0)
        );
        assert_eq!(SimpleScore::parse("*").unwrap(), SimpleScore::of(i32::MIN));
        assert!(SimpleScore::parse("ten").is_err());
    }

    #[test]
    fn test_short_string() {
        assert_eq!(SimpleScore::of(0).to_short_string(), "0");
        assert_eq!(SimpleScore::of(-5).to_short_string(), "-5");
        assert_eq!(SimpleScore::of_uninitialized(-2, 0).to_short_string(), "-2init");
        assert_eq!(SimpleScore::of_uninitialized(-2, -5).to_string(), "-2init/-5");
    }

    #[test]
    fn test_round_trip() {
        assert_round_trip(SimpleScore::of(0));
        assert_round_trip(SimpleScore::of(-123));
        assert_round_trip(SimpleScore::of_uninitialized(-4, 17));
        assert_round_trip(SimpleLongScore::of(i64::MIN + 1));
        assert_round_trip(SimpleDecimalScore::of(Decimal::new(-1050, 3)));
    }

    #[test]
    fn test_level_numbers() {
        let score = SimpleScore::of(-5);
        assert_eq!(score.to_level_numbers(), vec![-5]);
        assert_eq!(SimpleScore::from_level_numbers(0, &[-5]), score);
        assert_eq!(SimpleScore::levels_count(), 1);
        assert_eq!(SimpleScore::level_label(0), ScoreLevel::Soft);
    }
}

// ============================================================================
// HardSoftScore Tests
// ============================================================================

mod hard_soft_score {
    use super::*;

    #[test]
    fn test_creation() {
        let score = HardSoftScore::of(-2, -100);
        assert_eq!(score.hard(), -2);
        assert_eq!(score.soft(), -100);
        assert_eq!(HardSoftScore::ONE_HARD, HardSoftScore::of_hard(1));
        assert_eq!(HardSoftScore::ONE_SOFT, HardSoftScore::of_soft(1));
    }

    #[test]
    fn test_feasibility() {
        assert!(HardSoftScore::of(0, -1000).is_feasible());
        assert!(HardSoftScore::of(10, -50).is_feasible());
        assert!(!HardSoftScore::of(-1, 0).is_feasible());
        assert!(!HardSoftScore::of_uninitialized(-1, 0, 0).is_feasible());
    }

    #[test]
    fn test_comparison() {
        // Infeasible vs feasible
        let infeasible = HardSoftScore::of(-1, 0);
        let feasible = HardSoftScore::of(0, -1000);
        assert!(feasible > infeasible);

        // Same hard, different soft
        let s1 = HardSoftScore::of(0, -100);
        let s2 = HardSoftScore::of(0, -50);
        assert!(s2 > s1);
        assert!(s2.is_better_than(&s1));
        assert!(s1.is_worse_than(&s2));
    }

    #[test]
    fn test_arithmetic() {
        let s1 = HardSoftScore::of(-1, -100);
        let s2 = HardSoftScore::of(-1, -50);

        assert_eq!(s1 + s2, HardSoftScore::of(-2, -150));
        assert_eq!(s1 - s2, HardSoftScore::of(0, -50));
        assert_eq!(-s1, HardSoftScore::of(1, 100));
        assert_eq!(s1.abs(), HardSoftScore::of(1, 100));
    }

    #[test]
    fn test_overflow_wraps() {
        let max = HardSoftScore::of_soft(i32::MAX);
        assert_eq!((max + HardSoftScore::ONE_SOFT).soft(), i32::MIN);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            HardSoftScore::parse("0hard/-100soft").unwrap(),
            HardSoftScore::of(0, -100)
        );
        assert_eq!(
            HardSoftScore::parse("-1hard/0soft").unwrap(),
            HardSoftScore::of(-1, 0)
        );
        assert_eq!(HardSoftScore::parse("-100soft").unwrap(), HardSoftScore::of(0, -100));
        assert_eq!(HardSoftScore::parse("0").unwrap(), HardSoftScore::ZERO);
        assert!(HardSoftScore::parse("-1hard/-2medium").is_err());
    }

    #[test]
    fn test_display() {
        let score = HardSoftScore::of(-1, -100);
        assert_eq!(format!("{}", score), "-1hard/-100soft");
        assert_eq!(format!("{:?}", score), "HardSoftScore(-1hard/-100soft)");
        assert_eq!(HardSoftScore::of(0, -100).to_short_string(), "-100soft");
    }

    #[test]
    fn test_round_trip() {
        assert_round_trip(HardSoftScore::ZERO);
        assert_round_trip(HardSoftScore::of(-3, 0));
        assert_round_trip(HardSoftScore::of_uninitialized(-8, 0, -12));
        assert_round_trip(HardSoftLongScore::of(-5_000_000_000, 7));
    }

    #[test]
    fn test_level_numbers() {
        let score = HardSoftScore::of(-2, -50);
        assert_eq!(score.to_level_numbers(), vec![-2, -50]);
        assert_eq!(HardSoftScore::from_level_numbers(0, &[-2, -50]), score);
        assert_eq!(HardSoftScore::level_label(0), ScoreLevel::Hard);
        assert_eq!(HardSoftScore::level_label(1), ScoreLevel::Soft);
    }
}

// ============================================================================
// HardMediumSoftScore Tests
// ============================================================================

mod hard_medium_soft_score {
    use super::*;

    #[test]
    fn test_comparison() {
        // Hard dominates
        let s1 = HardMediumSoftScore::of(-1, 0, 0);
        let s2 = HardMediumSoftScore::of(0, -1000, -1000);
        assert!(s2 > s1);

        // Medium dominates soft
        let s3 = HardMediumSoftScore::of(0, -10, 0);
        let s4 = HardMediumSoftScore::of(0, -5, -1000);
        assert!(s4 > s3);
    }

    #[test]
    fn test_parse_uninitialized_long() {
        let parsed = HardMediumSoftLongScore::parse("-7init/-147hard/-258medium/-369soft").unwrap();
        assert_eq!(
            parsed,
            HardMediumSoftLongScore::of_uninitialized(-7, -147, -258, -369)
        );
        assert_eq!(parsed.to_short_string(), "-7init/-147hard/-258medium/-369soft");
        assert!(!parsed.is_solution_initialized());
    }

    #[test]
    fn test_short_string_omits_zero_levels() {
        let score = HardMediumSoftLongScore::of_uninitialized(-7, 0, -258, 0);
        assert_eq!(score.to_short_string(), "-7init/-258medium");
        assert_eq!(score.to_string(), "-7init/0hard/-258medium/0soft");
    }

    #[test]
    fn test_wildcard() {
        assert_eq!(
            HardMediumSoftScore::parse("*hard/0medium/0soft").unwrap(),
            HardMediumSoftScore::of_hard(i32::MIN)
        );
        assert!(HardMediumSoftDecimalScore::parse("*hard/0medium/0soft").is_err());
    }

    #[test]
    fn test_round_trip() {
        assert_round_trip(HardMediumSoftScore::of(0, -10, -100));
        assert_round_trip(HardMediumSoftScore::of_uninitialized(-1, 0, 0, 0));
        assert_round_trip(HardMediumSoftLongScore::of_medium(-99));
        assert_round_trip(HardMediumSoftDecimalScore::of(
            Decimal::new(-15, 1),
            Decimal::ZERO,
            Decimal::new(2025, 2),
        ));
    }
}

// ============================================================================
// Decimal Score Tests
// ============================================================================

mod decimal_score {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        let score = HardSoftDecimalScore::parse("-30.5hard/-208.25soft").unwrap();
        assert_eq!(score.hard(), Decimal::new(-305, 1));
        assert_eq!(score.soft(), Decimal::new(-20825, 2));
    }

    #[test]
    fn test_scale_is_preserved() {
        let a = HardSoftDecimalScore::of_soft(Decimal::new(150, 2));
        let sum = a + a;
        assert_eq!(sum.to_string(), "0hard/3.00soft");
        assert_eq!(a.multiply(Decimal::new(3, 0)).soft(), Decimal::new(450, 2));
    }

    #[test]
    fn test_display_zero() {
        assert_eq!(HardSoftDecimalScore::ZERO.to_string(), "0hard/0soft");
        assert_eq!(HardSoftDecimalScore::ZERO.to_short_string(), "0");
    }
}

// ============================================================================
// BendableScore Tests
// ============================================================================

mod bendable_score {
    use super::*;

    #[test]
    fn test_creation() {
        let score: BendableScore<2, 3> = BendableScore::of([-1, -2], [-10, -20, -30]);
        assert_eq!(score.hard_levels_count(), 2);
        assert_eq!(score.soft_levels_count(), 3);
        assert_eq!(score.hard_score(0), -1);
        assert_eq!(score.hard_score(1), -2);
        assert_eq!(score.soft_score(2), -30);
        assert_eq!(BendableScore::<2, 3>::levels_count(), 5);
        assert_eq!(BendableScore::<2, 3>::level_label(2), ScoreLevel::Soft);
    }

    #[test]
    fn test_feasibility() {
        let feasible: BendableScore<2, 2> = BendableScore::of([0, 0], [-10, -20]);
        let infeasible: BendableScore<2, 2> = BendableScore::of([0, -1], [0, 0]);

        assert!(feasible.is_feasible());
        assert!(!infeasible.is_feasible());
    }

    #[test]
    fn test_comparison() {
        // First hard level dominates
        let s1: BendableScore<2, 1> = BendableScore::of([-1, 0], [0]);
        let s2: BendableScore<2, 1> = BendableScore::of([0, -100], [-1000]);
        assert!(s2 > s1);

        // Second hard level matters when first is equal
        let s3: BendableScore<2, 1> = BendableScore::of([0, -10], [0]);
        let s4: BendableScore<2, 1> = BendableScore::of([0, -5], [-100]);
        assert!(s4 > s3);
    }

    #[test]
    fn test_arithmetic() {
        let s1: BendableScore<1, 2> = BendableScore::of([-1], [-10, -20]);
        let s2: BendableScore<1, 2> = BendableScore::of([-2], [-5, -10]);

        let sum = s1 + s2;
        assert_eq!(sum.hard_scores(), &[-3]);
        assert_eq!(sum.soft_scores(), &[-15, -30]);

        let neg = -s1;
        assert_eq!(neg.hard_scores(), &[1]);
        assert_eq!(neg.soft_scores(), &[10, 20]);
    }

    #[test]
    fn test_strings() {
        let score: BendableLongScore<2, 3> =
            BendableLongScore::of_uninitialized(-3, [0, 0], [-1, 0, -2]);
        assert_eq!(score.to_string(), "-3init/[0/0]hard/[-1/0/-2]soft");
        assert_eq!(score.to_short_string(), "-3init/[-1/0/-2]soft");
        assert_eq!(BendableLongScore::<2, 3>::zero().to_short_string(), "0");
    }

    #[test]
    fn test_round_trip() {
        assert_round_trip(BendableScore::<2, 3>::of([-1, 0], [0, -20, 30]));
        assert_round_trip(BendableScore::<1, 1>::of_uninitialized(-2, [0], [0]));
        assert_round_trip(BendableLongScore::<1, 2>::of_soft(1, -4));
        assert_round_trip(BendableDecimalScore::<1, 1>::of([Decimal::new(-5, 1)], [Decimal::ONE]));
    }

    #[test]
    fn test_parse_rejects_shape_mismatch() {
        assert!(BendableScore::<2, 3>::parse("[0]hard/[0/0/0]soft").is_err());
        assert!(BendableScore::<1, 1>::parse("[0]hard/[0]soft/[0]soft").is_err());
    }
}

// ============================================================================
// Properties
// ============================================================================

mod properties {
    use proptest::prelude::*;

    use super::*;

    fn hard_medium_soft() -> impl Strategy<Value = HardMediumSoftLongScore> {
        (-3i32..=0, -1000i64..1000, -1000i64..1000, -1000i64..1000)
            .prop_map(|(init, h, m, s)| HardMediumSoftLongScore::of_uninitialized(init, h, m, s))
    }

    proptest! {
        #[test]
        fn ordering_compares_init_score_then_levels(a in hard_medium_soft(), b in hard_medium_soft()) {
            let key = |s: &HardMediumSoftLongScore| (s.init_score(), s.hard(), s.medium(), s.soft());
            prop_assert_eq!(a.cmp(&b), key(&a).cmp(&key(&b)));
        }

        #[test]
        fn subtraction_undoes_addition(a in hard_medium_soft(), b in hard_medium_soft()) {
            prop_assert_eq!(a + b - b, a);
        }

        #[test]
        fn both_string_forms_parse_back(score in hard_medium_soft()) {
            prop_assert_eq!(HardMediumSoftLongScore::parse(&score.to_string()), Ok(score));
            prop_assert_eq!(HardMediumSoftLongScore::parse(&score.to_short_string()), Ok(score));
        }
    }
}
