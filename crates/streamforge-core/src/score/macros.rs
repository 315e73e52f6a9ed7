//! Declarative macros for reducing score type boilerplate.
//!
//! Every score family exists for `i32`, `i64` and `Decimal` levels, so the
//! struct, its arithmetic, ordering, formatting and parsing are generated
//! here once per layout.

/// Generates `PartialOrd`, `Add`, `Sub`, and `Neg` for a field-based score type.
///
/// The init score is combined like any other level.
///
/// # Usage
/// ```ignore
/// impl_score_ops!(HardSoftScore { hard, soft });
/// ```
macro_rules! impl_score_ops {
    ($type:ident { $($field:ident),+ }) => {
        impl PartialOrd for $type {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl std::ops::Add for $type {
            type Output = Self;

            fn add(self, other: Self) -> Self {
                $type {
                    init_score: self.init_score.wrapping_add(other.init_score),
                    $( $field: $crate::score::ScoreNumber::plus(self.$field, other.$field), )+
                }
            }
        }

        impl std::ops::Sub for $type {
            type Output = Self;

            fn sub(self, other: Self) -> Self {
                $type {
                    init_score: self.init_score.wrapping_sub(other.init_score),
                    $( $field: $crate::score::ScoreNumber::minus(self.$field, other.$field), )+
                }
            }
        }

        impl std::ops::Neg for $type {
            type Output = Self;

            fn neg(self) -> Self {
                $type {
                    init_score: self.init_score.wrapping_neg(),
                    $( $field: $crate::score::ScoreNumber::negate(self.$field), )+
                }
            }
        }
    };
}

/// Generates a complete score type with a fixed set of labeled levels.
///
/// Produces the struct, constructors and accessors, `Score`, `Ord`,
/// arithmetic, `Debug`, `Display` and `ParseableScore`.
///
/// # Usage
/// ```ignore
/// define_score!(
///     /// Docs.
///     HardSoftLongScore(i64) {
///         hard => "hard" as Hard,
///         soft => "soft" as Soft,
///     }
///     hard_levels = 1
/// );
/// ```
macro_rules! define_score {
    (
        $(#[$meta:meta])*
        $type:ident($num:ty) { $($field:ident => $label:literal as $level:ident),+ $(,)? }
        hard_levels = $hard:expr
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $type {
            init_score: i32,
            $( $field: $num, )+
        }

        impl $type {
            /// The zero score.
            pub const ZERO: $type = $type {
                init_score: 0,
                $( $field: <$num as $crate::score::ScoreNumber>::ZERO, )+
            };

            const LABELS: &'static [&'static str] = &[$($label),+];

            const LEVELS: &'static [$crate::score::ScoreLevel] =
                &[$($crate::score::ScoreLevel::$level),+];

            /// Creates an initialized score.
            #[inline]
            pub const fn of($($field: $num),+) -> Self {
                $type { init_score: 0, $($field),+ }
            }

            /// Creates a score for a solution with `-init_score` uninitialized variables.
            #[inline]
            pub const fn of_uninitialized(init_score: i32, $($field: $num),+) -> Self {
                $type { init_score, $($field),+ }
            }

            $(
                #[inline]
                pub const fn $field(&self) -> $num {
                    self.$field
                }
            )+

            fn levels(&self) -> [$num; [$(stringify!($field)),+].len()] {
                [$(self.$field),+]
            }
        }

        impl $crate::score::Score for $type {
            type Level = $num;

            fn is_feasible(&self) -> bool {
                self.init_score >= 0
                    && self.levels()[..$hard]
                        .iter()
                        .all(|level| *level >= <$num as $crate::score::ScoreNumber>::ZERO)
            }

            #[inline]
            fn zero() -> Self {
                $type::ZERO
            }

            #[inline]
            fn levels_count() -> usize {
                Self::LABELS.len()
            }

            #[inline]
            fn hard_levels_count() -> usize {
                $hard
            }

            #[inline]
            fn init_score(&self) -> i32 {
                self.init_score
            }

            #[inline]
            fn with_init_score(&self, init_score: i32) -> Self {
                $type { init_score, ..*self }
            }

            fn to_level_numbers(&self) -> Vec<$num> {
                self.levels().to_vec()
            }

            fn from_level_numbers(init_score: i32, levels: &[$num]) -> Self {
                assert_eq!(
                    levels.len(),
                    Self::LABELS.len(),
                    "{} requires exactly {} levels",
                    stringify!($type),
                    Self::LABELS.len()
                );
                let mut values = levels.iter().copied();
                $type {
                    init_score,
                    $( $field: values.next().unwrap_or_default(), )+
                }
            }

            fn multiply(&self, factor: $num) -> Self {
                $type {
                    init_score: self.init_score,
                    $( $field: $crate::score::ScoreNumber::times(self.$field, factor), )+
                }
            }

            fn abs(&self) -> Self {
                $type {
                    init_score: self.init_score.wrapping_abs(),
                    $( $field: $crate::score::ScoreNumber::magnitude(self.$field), )+
                }
            }

            fn level_label(index: usize) -> $crate::score::ScoreLevel {
                match Self::LEVELS.get(index) {
                    Some(level) => *level,
                    None => panic!(
                        "{} has {} levels, got index {}",
                        stringify!($type),
                        Self::LEVELS.len(),
                        index
                    ),
                }
            }

            fn to_short_string(&self) -> String {
                $crate::score::format::short_string(self.init_score, &self.levels(), Self::LABELS)
            }
        }

        impl Ord for $type {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.init_score
                    .cmp(&other.init_score)
                    $( .then_with(|| self.$field.cmp(&other.$field)) )+
            }
        }

        impl_score_ops!($type { $($field),+ });

        impl std::fmt::Debug for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($type), self)
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::score::format::full_string(
                    self.init_score,
                    &self.levels(),
                    Self::LABELS,
                ))
            }
        }

        impl $crate::score::ParseableScore for $type {
            fn parse(s: &str) -> Result<Self, $crate::score::ScoreParseError> {
                let (init_score, levels) = $crate::score::format::parse_labeled::<$num>(
                    stringify!($type),
                    s,
                    Self::LABELS,
                )?;
                Ok(<Self as $crate::score::Score>::from_level_numbers(init_score, &levels))
            }

            fn to_string_repr(&self) -> String {
                self.to_string()
            }
        }
    };
}

/// Generates a bendable score type over a level number type.
///
/// The hard and soft level counts are const generic parameters, which keeps
/// the score `Copy` and rejects weights of another shape at compile time.
macro_rules! define_bendable_score {
    (
        $(#[$meta:meta])*
        $type:ident($num:ty)
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $type<const H: usize, const S: usize> {
            init_score: i32,
            hard_scores: [$num; H],
            soft_scores: [$num; S],
        }

        impl<const H: usize, const S: usize> $type<H, S> {
            /// Creates an initialized score with the given hard and soft levels.
            pub const fn of(hard_scores: [$num; H], soft_scores: [$num; S]) -> Self {
                $type { init_score: 0, hard_scores, soft_scores }
            }

            /// Creates a score for a solution with `-init_score` uninitialized variables.
            pub const fn of_uninitialized(
                init_score: i32,
                hard_scores: [$num; H],
                soft_scores: [$num; S],
            ) -> Self {
                $type { init_score, hard_scores, soft_scores }
            }

            /// Creates a score with a single non-zero hard level.
            ///
            /// # Panics
            /// Panics if `level >= H`.
            pub fn of_hard(level: usize, value: $num) -> Self {
                let mut score = <Self as $crate::score::Score>::zero();
                score.hard_scores[level] = value;
                score
            }

            /// Creates a score with a single non-zero soft level.
            ///
            /// # Panics
            /// Panics if `level >= S`.
            pub fn of_soft(level: usize, value: $num) -> Self {
                let mut score = <Self as $crate::score::Score>::zero();
                score.soft_scores[level] = value;
                score
            }

            /// Returns the number of hard score levels.
            pub const fn hard_levels_count(&self) -> usize {
                H
            }

            /// Returns the number of soft score levels.
            pub const fn soft_levels_count(&self) -> usize {
                S
            }

            /// Returns the hard score at the given level.
            ///
            /// # Panics
            /// Panics if the level is out of bounds.
            pub fn hard_score(&self, level: usize) -> $num {
                self.hard_scores[level]
            }

            /// Returns the soft score at the given level.
            ///
            /// # Panics
            /// Panics if the level is out of bounds.
            pub fn soft_score(&self, level: usize) -> $num {
                self.soft_scores[level]
            }

            /// Returns all hard scores as a slice.
            pub fn hard_scores(&self) -> &[$num] {
                &self.hard_scores
            }

            /// Returns all soft scores as a slice.
            pub fn soft_scores(&self) -> &[$num] {
                &self.soft_scores
            }

            fn zip_with(self, other: Self, op: impl Fn($num, $num) -> $num) -> Self {
                $type {
                    init_score: self.init_score,
                    hard_scores: std::array::from_fn(|i| op(self.hard_scores[i], other.hard_scores[i])),
                    soft_scores: std::array::from_fn(|i| op(self.soft_scores[i], other.soft_scores[i])),
                }
            }

            fn map_levels(self, op: impl Fn($num) -> $num) -> Self {
                $type {
                    init_score: self.init_score,
                    hard_scores: self.hard_scores.map(&op),
                    soft_scores: self.soft_scores.map(&op),
                }
            }
        }

        impl<const H: usize, const S: usize> Default for $type<H, S> {
            fn default() -> Self {
                <Self as $crate::score::Score>::zero()
            }
        }

        impl<const H: usize, const S: usize> $crate::score::Score for $type<H, S> {
            type Level = $num;

            fn is_feasible(&self) -> bool {
                self.init_score >= 0
                    && self
                        .hard_scores
                        .iter()
                        .all(|level| *level >= <$num as $crate::score::ScoreNumber>::ZERO)
            }

            fn zero() -> Self {
                $type {
                    init_score: 0,
                    hard_scores: [<$num as $crate::score::ScoreNumber>::ZERO; H],
                    soft_scores: [<$num as $crate::score::ScoreNumber>::ZERO; S],
                }
            }

            fn levels_count() -> usize {
                H + S
            }

            fn hard_levels_count() -> usize {
                H
            }

            fn init_score(&self) -> i32 {
                self.init_score
            }

            fn with_init_score(&self, init_score: i32) -> Self {
                $type { init_score, ..*self }
            }

            fn to_level_numbers(&self) -> Vec<$num> {
                let mut levels = Vec::with_capacity(H + S);
                levels.extend_from_slice(&self.hard_scores);
                levels.extend_from_slice(&self.soft_scores);
                levels
            }

            fn from_level_numbers(init_score: i32, levels: &[$num]) -> Self {
                assert_eq!(
                    levels.len(),
                    H + S,
                    "{} requires exactly {} levels",
                    stringify!($type),
                    H + S
                );
                $type {
                    init_score,
                    hard_scores: std::array::from_fn(|i| levels[i]),
                    soft_scores: std::array::from_fn(|i| levels[H + i]),
                }
            }

            fn multiply(&self, factor: $num) -> Self {
                self.map_levels(|level| $crate::score::ScoreNumber::times(level, factor))
            }

            fn abs(&self) -> Self {
                let mut score = self.map_levels($crate::score::ScoreNumber::magnitude);
                score.init_score = self.init_score.wrapping_abs();
                score
            }

            fn level_label(index: usize) -> $crate::score::ScoreLevel {
                if index < H {
                    $crate::score::ScoreLevel::Hard
                } else if index < H + S {
                    $crate::score::ScoreLevel::Soft
                } else {
                    panic!("{} has {} levels, got index {}", stringify!($type), H + S, index)
                }
            }

            fn to_short_string(&self) -> String {
                $crate::score::format::bendable_short_string(
                    self.init_score,
                    &self.hard_scores,
                    &self.soft_scores,
                )
            }
        }

        impl<const H: usize, const S: usize> Ord for $type<H, S> {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.init_score
                    .cmp(&other.init_score)
                    .then_with(|| self.hard_scores.cmp(&other.hard_scores))
                    .then_with(|| self.soft_scores.cmp(&other.soft_scores))
            }
        }

        impl<const H: usize, const S: usize> PartialOrd for $type<H, S> {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl<const H: usize, const S: usize> std::ops::Add for $type<H, S> {
            type Output = Self;

            fn add(self, other: Self) -> Self {
                let mut score = self.zip_with(other, $crate::score::ScoreNumber::plus);
                score.init_score = self.init_score.wrapping_add(other.init_score);
                score
            }
        }

        impl<const H: usize, const S: usize> std::ops::Sub for $type<H, S> {
            type Output = Self;

            fn sub(self, other: Self) -> Self {
                let mut score = self.zip_with(other, $crate::score::ScoreNumber::minus);
                score.init_score = self.init_score.wrapping_sub(other.init_score);
                score
            }
        }

        impl<const H: usize, const S: usize> std::ops::Neg for $type<H, S> {
            type Output = Self;

            fn neg(self) -> Self {
                let mut score = self.map_levels($crate::score::ScoreNumber::negate);
                score.init_score = self.init_score.wrapping_neg();
                score
            }
        }

        impl<const H: usize, const S: usize> std::fmt::Debug for $type<H, S> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($type), self)
            }
        }

        impl<const H: usize, const S: usize> std::fmt::Display for $type<H, S> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::score::format::bendable_full_string(
                    self.init_score,
                    &self.hard_scores,
                    &self.soft_scores,
                ))
            }
        }

        impl<const H: usize, const S: usize> $crate::score::ParseableScore for $type<H, S> {
            fn parse(s: &str) -> Result<Self, $crate::score::ScoreParseError> {
                let (init_score, hard, soft) =
                    $crate::score::format::parse_bendable::<$num>(stringify!($type), s, H, S)?;
                let mut levels = hard;
                levels.extend(soft);
                Ok(<Self as $crate::score::Score>::from_level_numbers(init_score, &levels))
            }

            fn to_string_repr(&self) -> String {
                self.to_string()
            }
        }
    };
}

// Macros are used via #[macro_use] on the module declaration.
