//! Three-level scores with hard, medium and soft constraints

use rust_decimal::Decimal;

use super::level::ScoreNumber;

define_score!(
    /// A score with hard, medium, and soft constraint levels.
    ///
    /// The medium level sits between hard and soft: it is compared only when
    /// the hard levels are equal, and always outweighs the soft level.
    ///
    /// # Examples
    ///
    /// ```
    /// use streamforge_core::HardMediumSoftScore;
    ///
    /// let a = HardMediumSoftScore::of(0, -10, 0);
    /// let b = HardMediumSoftScore::of(0, -5, -1000);
    /// assert!(b > a);
    /// ```
    HardMediumSoftScore(i32) {
        hard => "hard" as Hard,
        medium => "medium" as Medium,
        soft => "soft" as Soft,
    }
    hard_levels = 1
);

define_score!(
    /// A hard/medium/soft score with `i64` levels.
    ///
    /// # Examples
    ///
    /// ```
    /// use streamforge_core::score::{HardMediumSoftLongScore, ParseableScore, Score};
    ///
    /// let score = HardMediumSoftLongScore::parse("-7init/-147hard/-258medium/-369soft").unwrap();
    /// assert_eq!(score, HardMediumSoftLongScore::of_uninitialized(-7, -147, -258, -369));
    /// assert_eq!(score.to_short_string(), "-7init/-147hard/-258medium/-369soft");
    /// ```
    HardMediumSoftLongScore(i64) {
        hard => "hard" as Hard,
        medium => "medium" as Medium,
        soft => "soft" as Soft,
    }
    hard_levels = 1
);

define_score!(
    /// A hard/medium/soft score with exact decimal levels.
    HardMediumSoftDecimalScore(Decimal) {
        hard => "hard" as Hard,
        medium => "medium" as Medium,
        soft => "soft" as Soft,
    }
    hard_levels = 1
);

macro_rules! impl_hard_medium_soft_helpers {
    ($type:ident($num:ty)) => {
        impl $type {
            /// Creates a score with only a hard component.
            #[inline]
            pub const fn of_hard(hard: $num) -> Self {
                $type::of(hard, <$num as ScoreNumber>::ZERO, <$num as ScoreNumber>::ZERO)
            }

            /// Creates a score with only a medium component.
            #[inline]
            pub const fn of_medium(medium: $num) -> Self {
                $type::of(<$num as ScoreNumber>::ZERO, medium, <$num as ScoreNumber>::ZERO)
            }

            /// Creates a score with only a soft component.
            #[inline]
            pub const fn of_soft(soft: $num) -> Self {
                $type::of(<$num as ScoreNumber>::ZERO, <$num as ScoreNumber>::ZERO, soft)
            }
        }
    };
}

impl_hard_medium_soft_helpers!(HardMediumSoftScore(i32));
impl_hard_medium_soft_helpers!(HardMediumSoftLongScore(i64));
impl_hard_medium_soft_helpers!(HardMediumSoftDecimalScore(Decimal));
