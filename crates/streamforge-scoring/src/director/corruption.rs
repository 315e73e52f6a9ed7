//! Score corruption reports.
//!
//! When an asserted environment mode finds that the incremental score
//! differs from a from-scratch calculation, the matches of both
//! calculations are compared. Matches only the incremental session has are
//! *excess*, matches only the fresh session has are *missing*; together
//! they point at the constraint whose incremental bookkeeping is wrong.

use std::collections::HashMap;
use std::fmt;

use streamforge_core::Score;

use crate::api::analysis::ConstraintMatchTotal;

/// One constraint match that only one of the two calculations found.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchDiff<Sc: Score> {
    pub constraint: String,
    pub justification: String,
    pub score: Sc,
}

impl<Sc: Score> fmt::Display for MatchDiff<Sc> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}={}", self.constraint, self.justification, self.score.to_short_string())
    }
}

/// Difference between an incremental and a from-scratch calculation.
#[derive(Debug, Clone)]
pub struct CorruptionReport<Sc: Score> {
    pub working_score: Sc,
    pub fresh_score: Sc,
    pub excess: Vec<MatchDiff<Sc>>,
    pub missing: Vec<MatchDiff<Sc>>,
}

type MatchKey<Sc> = (String, String, Sc);

fn count_matches<Sc: Score>(totals: &[ConstraintMatchTotal<Sc>], counts: &mut HashMap<MatchKey<Sc>, isize>, delta: isize) {
    for total in totals {
        let constraint = total.constraint_ref().full_name();
        for m in total.matches() {
            let key = (constraint.clone(), format!("{:?}", m.justification), m.score);
            *counts.entry(key).or_insert(0) += delta;
        }
    }
}

impl<Sc: Score> CorruptionReport<Sc> {
    /// Compares the matches of the working session with those of a fresh one.
    ///
    /// Matches are compared as multisets keyed by constraint, justification
    /// and score.
    pub fn compare(
        working_score: Sc,
        working_totals: &[ConstraintMatchTotal<Sc>],
        fresh_score: Sc,
        fresh_totals: &[ConstraintMatchTotal<Sc>],
    ) -> Self {
        let mut counts = HashMap::new();
        count_matches(working_totals, &mut counts, 1);
        count_matches(fresh_totals, &mut counts, -1);

        let mut excess = Vec::new();
        let mut missing = Vec::new();
        for ((constraint, justification, score), count) in counts {
            let diff = MatchDiff {
                constraint,
                justification,
                score,
            };
            let target = if count > 0 { &mut excess } else { &mut missing };
            for _ in 0..count.unsigned_abs() {
                target.push(diff.clone());
            }
        }
        excess.sort();
        missing.sort();
        Self {
            working_score,
            fresh_score,
            excess,
            missing,
        }
    }

    pub fn is_corrupted(&self) -> bool {
        self.working_score != self.fresh_score || !self.excess.is_empty() || !self.missing.is_empty()
    }
}

impl<Sc: Score> fmt::Display for CorruptionReport<Sc> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "the working score ({}) is not the fresh score ({})",
            self.working_score, self.fresh_score
        )?;
        if self.excess.is_empty() && self.missing.is_empty() {
            return write!(f, "  the constraint matches are equal, check the init score");
        }
        writeln!(f, "  excess matches ({}), present incrementally only:", self.excess.len())?;
        for diff in &self.excess {
            writeln!(f, "    {}", diff)?;
        }
        writeln!(f, "  missing matches ({}), present from scratch only:", self.missing.len())?;
        for diff in &self.missing {
            writeln!(f, "    {}", diff)?;
        }
        Ok(())
    }
}
