//! Single-level scores

use rust_decimal::Decimal;

define_score!(
    /// A simple score with a single `i32` level.
    ///
    /// This is the simplest score type, useful when there's only one
    /// type of constraint to optimize.
    ///
    /// # Examples
    ///
    /// ```
    /// use streamforge_core::score::{ParseableScore, Score, SimpleScore};
    ///
    /// let score1 = SimpleScore::of(-5);
    /// let score2 = SimpleScore::of(-3);
    ///
    /// assert!(score2 > score1);  // -3 is better than -5
    /// assert!(score1.is_feasible());  // No hard levels: any initialized score is feasible
    /// assert!(!SimpleScore::of_uninitialized(-1, 0).is_feasible());
    /// assert_eq!(SimpleScore::parse("-7init/-5").unwrap(), SimpleScore::of_uninitialized(-7, -5));
    /// ```
    SimpleScore(i32) {
        score => "" as Soft,
    }
    hard_levels = 0
);

define_score!(
    /// A single-level score with an `i64` level.
    SimpleLongScore(i64) {
        score => "" as Soft,
    }
    hard_levels = 0
);

define_score!(
    /// A single-level score with an exact decimal level.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use streamforge_core::score::{ParseableScore, SimpleDecimalScore};
    ///
    /// let score = SimpleDecimalScore::parse("-1.25").unwrap();
    /// assert_eq!(score.score(), Decimal::new(-125, 2));
    /// assert_eq!(score.to_string(), "-1.25");
    /// ```
    SimpleDecimalScore(Decimal) {
        score => "" as Soft,
    }
    hard_levels = 0
);

impl SimpleScore {
    /// A score of 1 (useful for incrementing).
    pub const ONE: SimpleScore = SimpleScore::of(1);
}

impl SimpleLongScore {
    /// A score of 1 (useful for incrementing).
    pub const ONE: SimpleLongScore = SimpleLongScore::of(1);
}

impl SimpleDecimalScore {
    /// A score of 1 (useful for incrementing).
    pub const ONE: SimpleDecimalScore = SimpleDecimalScore::of(Decimal::ONE);
}
