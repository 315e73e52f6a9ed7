//! Bendable scores with a configurable number of hard and soft levels

use rust_decimal::Decimal;

define_bendable_score!(
    /// A score with `H` hard levels and `S` soft levels of type `i32`.
    ///
    /// Useful when the constraint structure needs more than the fixed
    /// hard/medium/soft layout. The level counts are part of the type.
    ///
    /// # Examples
    ///
    /// ```
    /// use streamforge_core::score::{BendableScore, ParseableScore, Score};
    ///
    /// // Create a score with 2 hard levels and 3 soft levels
    /// let score: BendableScore<2, 3> = BendableScore::of([-1, -2], [-10, -20, -30]);
    ///
    /// assert_eq!(score.hard_levels_count(), 2);
    /// assert_eq!(score.soft_levels_count(), 3);
    /// assert!(!score.is_feasible());  // Negative hard scores
    /// assert_eq!(score.to_string(), "[-1/-2]hard/[-10/-20/-30]soft");
    /// assert_eq!(BendableScore::<2, 3>::parse("[-1/-2]hard/[-10/-20/-30]soft").unwrap(), score);
    /// ```
    BendableScore(i32)
);

define_bendable_score!(
    /// A bendable score with `i64` levels.
    BendableLongScore(i64)
);

define_bendable_score!(
    /// A bendable score with exact decimal levels.
    BendableDecimalScore(Decimal)
);
