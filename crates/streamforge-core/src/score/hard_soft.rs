//! Two-level scores with hard and soft constraints

use rust_decimal::Decimal;

use super::level::ScoreNumber;

define_score!(
    /// A score with separate hard and soft constraint levels.
    ///
    /// Hard constraints must be satisfied for a solution to be feasible.
    /// Soft constraints are optimization objectives.
    ///
    /// When comparing scores:
    /// 1. Init scores are compared first
    /// 2. Hard scores are compared next
    /// 3. Soft scores are only compared when hard scores are equal
    ///
    /// # Examples
    ///
    /// ```
    /// use streamforge_core::HardSoftScore;
    ///
    /// let score1 = HardSoftScore::of(-1, -100);  // 1 hard constraint broken
    /// let score2 = HardSoftScore::of(0, -200);   // Feasible but poor soft score
    ///
    /// // Feasible solutions are always better than infeasible ones
    /// assert!(score2 > score1);
    ///
    /// let score3 = HardSoftScore::of(0, -50);    // Better soft score
    /// assert!(score3 > score2);
    /// ```
    HardSoftScore(i32) {
        hard => "hard" as Hard,
        soft => "soft" as Soft,
    }
    hard_levels = 1
);

define_score!(
    /// A hard/soft score with `i64` levels.
    HardSoftLongScore(i64) {
        hard => "hard" as Hard,
        soft => "soft" as Soft,
    }
    hard_levels = 1
);

define_score!(
    /// A hard/soft score with exact decimal levels.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use streamforge_core::score::{HardSoftDecimalScore, ParseableScore};
    ///
    /// let score = HardSoftDecimalScore::parse("-30.5hard/-208.25soft").unwrap();
    /// assert_eq!(score.hard(), Decimal::new(-305, 1));
    /// assert_eq!(score.to_string(), "-30.5hard/-208.25soft");
    /// ```
    HardSoftDecimalScore(Decimal) {
        hard => "hard" as Hard,
        soft => "soft" as Soft,
    }
    hard_levels = 1
);

macro_rules! impl_hard_soft_helpers {
    ($type:ident($num:ty)) => {
        impl $type {
            /// One hard constraint penalty.
            pub const ONE_HARD: $type = $type::of(<$num as ScoreNumber>::ONE, <$num as ScoreNumber>::ZERO);

            /// One soft constraint penalty.
            pub const ONE_SOFT: $type = $type::of(<$num as ScoreNumber>::ZERO, <$num as ScoreNumber>::ONE);

            /// Creates a score with only a hard component.
            #[inline]
            pub const fn of_hard(hard: $num) -> Self {
                $type::of(hard, <$num as ScoreNumber>::ZERO)
            }

            /// Creates a score with only a soft component.
            #[inline]
            pub const fn of_soft(soft: $num) -> Self {
                $type::of(<$num as ScoreNumber>::ZERO, soft)
            }

            /// Returns the hard score as a new score.
            pub const fn hard_score(&self) -> $type {
                $type::of_hard(self.hard())
            }

            /// Returns the soft score as a new score.
            pub const fn soft_score(&self) -> $type {
                $type::of_soft(self.soft())
            }
        }
    };
}

impl_hard_soft_helpers!(HardSoftScore(i32));
impl_hard_soft_helpers!(HardSoftLongScore(i64));
impl_hard_soft_helpers!(HardSoftDecimalScore(Decimal));
