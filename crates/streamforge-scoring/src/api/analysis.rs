//! Score analysis types for detailed constraint tracking.
//!
//! With match tracking enabled, a session records one [`ConstraintMatch`]
//! per tuple reaching a constraint. The matches are summarized per
//! constraint in [`ConstraintMatchTotal`]s, per fact in an
//! [`IndictmentMap`], and for humans in a [`ScoreExplanation`].

use std::fmt::{self, Write};

use indexmap::IndexMap;

use streamforge_core::{ConstraintRef, Score};

use crate::fact::FactRef;

/// Identifies one match for as long as its tuple is live.
pub(crate) type MatchId = u64;

/// One tuple reaching a constraint, with the score it contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintMatch<Sc: Score> {
    /// Reference to the constraint that matched.
    pub constraint_ref: ConstraintRef,
    /// The facts of the matching tuple, in tuple order.
    pub justification: Vec<FactRef>,
    /// Score impact of this match.
    pub score: Sc,
}

impl<Sc: Score> ConstraintMatch<Sc> {
    pub fn new(constraint_ref: ConstraintRef, justification: Vec<FactRef>, score: Sc) -> Self {
        Self {
            constraint_ref,
            justification,
            score,
        }
    }

    /// Returns the distinct justification facts, in tuple order.
    pub fn indicted_facts(&self) -> Vec<&FactRef> {
        let mut facts: Vec<&FactRef> = Vec::with_capacity(self.justification.len());
        for fact in &self.justification {
            if !facts.contains(&fact) {
                facts.push(fact);
            }
        }
        facts
    }

    /// Human-readable list of the justification facts.
    pub fn description(&self) -> String {
        self.justification
            .iter()
            .map(|fact| format!("{:?}", fact))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Every live match of one constraint and their summed score.
#[derive(Debug, Clone)]
pub struct ConstraintMatchTotal<Sc: Score> {
    constraint_ref: ConstraintRef,
    constraint_weight: Sc,
    score: Sc,
    matches: IndexMap<MatchId, ConstraintMatch<Sc>>,
}

impl<Sc: Score> ConstraintMatchTotal<Sc> {
    pub(crate) fn new(constraint_ref: ConstraintRef, constraint_weight: Sc) -> Self {
        Self {
            constraint_ref,
            constraint_weight,
            score: Sc::zero(),
            matches: IndexMap::new(),
        }
    }

    pub fn constraint_ref(&self) -> &ConstraintRef {
        &self.constraint_ref
    }

    /// The weight the session applied, negated for penalties.
    pub fn constraint_weight(&self) -> Sc {
        self.constraint_weight
    }

    /// The sum of the scores of all matches.
    pub fn score(&self) -> Sc {
        self.score
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn matches(&self) -> impl Iterator<Item = &ConstraintMatch<Sc>> {
        self.matches.values()
    }

    pub(crate) fn add_match(&mut self, id: MatchId, constraint_match: ConstraintMatch<Sc>) {
        self.score = self.score + constraint_match.score;
        self.matches.insert(id, constraint_match);
    }

    pub(crate) fn remove_match(&mut self, id: MatchId) -> Option<ConstraintMatch<Sc>> {
        let removed = self.matches.swap_remove(&id)?;
        self.score = self.score - removed.score;
        Some(removed)
    }
}

/// Analysis of how a single fact impacts the score.
#[derive(Debug, Clone)]
pub struct Indictment<Sc: Score> {
    fact: FactRef,
    score: Sc,
    matches: IndexMap<MatchId, ConstraintMatch<Sc>>,
}

impl<Sc: Score> Indictment<Sc> {
    pub(crate) fn new(fact: FactRef) -> Self {
        Self {
            fact,
            score: Sc::zero(),
            matches: IndexMap::new(),
        }
    }

    /// The fact being analyzed.
    pub fn fact(&self) -> &FactRef {
        &self.fact
    }

    /// Total score impact of the matches involving this fact.
    pub fn score(&self) -> Sc {
        self.score
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn matches(&self) -> impl Iterator<Item = &ConstraintMatch<Sc>> {
        self.matches.values()
    }

    /// Returns the distinct constraints this fact matched, in first-match order.
    pub fn violated_constraints(&self) -> Vec<&ConstraintRef> {
        let mut refs: Vec<&ConstraintRef> = Vec::new();
        for constraint_match in self.matches.values() {
            if !refs.contains(&&constraint_match.constraint_ref) {
                refs.push(&constraint_match.constraint_ref);
            }
        }
        refs
    }

    /// Returns the number of distinct constraints matched.
    pub fn constraint_count(&self) -> usize {
        self.violated_constraints().len()
    }

    pub(crate) fn add_match(&mut self, id: MatchId, constraint_match: ConstraintMatch<Sc>) {
        self.score = self.score + constraint_match.score;
        self.matches.insert(id, constraint_match);
    }

    pub(crate) fn remove_match(&mut self, id: MatchId) {
        if let Some(removed) = self.matches.swap_remove(&id) {
            self.score = self.score - removed.score;
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Indictments of every fact involved in at least one match.
#[derive(Debug, Clone)]
pub struct IndictmentMap<Sc: Score> {
    indictments: IndexMap<FactRef, Indictment<Sc>>,
}

impl<Sc: Score> IndictmentMap<Sc> {
    pub fn new() -> Self {
        Self {
            indictments: IndexMap::new(),
        }
    }

    /// Builds an indictment map from a collection of matches.
    pub fn from_matches<'a, I>(matches: I) -> Self
    where
        I: IntoIterator<Item = &'a ConstraintMatch<Sc>>,
    {
        let mut map = Self::new();
        for (id, constraint_match) in matches.into_iter().enumerate() {
            map.add_match(id as MatchId, constraint_match);
        }
        map
    }

    pub(crate) fn add_match(&mut self, id: MatchId, constraint_match: &ConstraintMatch<Sc>) {
        for fact in constraint_match.indicted_facts() {
            self.indictments
                .entry(fact.clone())
                .or_insert_with(|| Indictment::new(fact.clone()))
                .add_match(id, constraint_match.clone());
        }
    }

    pub(crate) fn remove_match(&mut self, id: MatchId, constraint_match: &ConstraintMatch<Sc>) {
        for fact in constraint_match.indicted_facts() {
            if let Some(indictment) = self.indictments.get_mut(fact) {
                indictment.remove_match(id);
                if indictment.is_empty() {
                    self.indictments.swap_remove(fact);
                }
            }
        }
    }

    /// Gets the indictment of a fact.
    pub fn get(&self, fact: &FactRef) -> Option<&Indictment<Sc>> {
        self.indictments.get(fact)
    }

    /// Returns all indicted facts.
    pub fn facts(&self) -> impl Iterator<Item = &FactRef> {
        self.indictments.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FactRef, &Indictment<Sc>)> {
        self.indictments.iter()
    }

    /// Returns facts sorted by worst score impact (lowest score first).
    pub fn worst_facts(&self) -> Vec<&FactRef> {
        let mut facts: Vec<&Indictment<Sc>> = self.indictments.values().collect();
        facts.sort_by(|a, b| a.score.cmp(&b.score));
        facts.into_iter().map(|indictment| &indictment.fact).collect()
    }

    pub fn len(&self) -> usize {
        self.indictments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indictments.is_empty()
    }
}

impl<Sc: Score> Default for IndictmentMap<Sc> {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-constraint breakdown in a score explanation.
#[derive(Debug, Clone)]
pub struct ConstraintAnalysis<Sc: Score> {
    pub constraint_ref: ConstraintRef,
    /// Constraint weight (score per match), negated for penalties.
    pub weight: Sc,
    /// Total score from this constraint.
    pub score: Sc,
    pub matches: Vec<ConstraintMatch<Sc>>,
    /// Whether the weight touches a hard level.
    pub is_hard: bool,
}

impl<Sc: Score> ConstraintAnalysis<Sc> {
    pub fn from_total(total: &ConstraintMatchTotal<Sc>) -> Self {
        let weight = total.constraint_weight();
        let is_hard = weight
            .to_level_numbers()
            .iter()
            .take(Sc::hard_levels_count())
            .any(|level| !streamforge_core::score::ScoreNumber::is_zero(level));
        Self {
            constraint_ref: total.constraint_ref().clone(),
            weight,
            score: total.score(),
            matches: total.matches().cloned().collect(),
            is_hard,
        }
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn name(&self) -> &str {
        &self.constraint_ref.name
    }
}

/// Complete score explanation with per-constraint breakdown.
#[derive(Debug, Clone)]
pub struct ScoreExplanation<Sc: Score> {
    pub score: Sc,
    pub constraint_analyses: Vec<ConstraintAnalysis<Sc>>,
}

impl<Sc: Score> ScoreExplanation<Sc> {
    pub fn new(score: Sc, constraint_analyses: Vec<ConstraintAnalysis<Sc>>) -> Self {
        Self {
            score,
            constraint_analyses,
        }
    }

    pub fn from_totals(score: Sc, totals: &[ConstraintMatchTotal<Sc>]) -> Self {
        Self::new(score, totals.iter().map(ConstraintAnalysis::from_total).collect())
    }

    pub fn total_match_count(&self) -> usize {
        self.constraint_analyses.iter().map(|a| a.match_count()).sum()
    }

    /// Returns constraints with non-zero scores.
    pub fn non_zero_constraints(&self) -> Vec<&ConstraintAnalysis<Sc>> {
        self.constraint_analyses
            .iter()
            .filter(|a| a.score != Sc::zero())
            .collect()
    }

    pub fn all_matches(&self) -> Vec<&ConstraintMatch<Sc>> {
        self.constraint_analyses
            .iter()
            .flat_map(|a| &a.matches)
            .collect()
    }

    /// Multi-line summary, worst constraint first, listing up to
    /// `matches_per_constraint` matches of each.
    pub fn summary(&self, matches_per_constraint: usize) -> String {
        let mut analyses: Vec<&ConstraintAnalysis<Sc>> = self.non_zero_constraints();
        analyses.sort_by(|a, b| a.score.cmp(&b.score));

        let mut out = format!("Explanation of score ({}):\n", self.score);
        for analysis in analyses {
            let _ = writeln!(
                out,
                "    {}: {} ({} matches)",
                analysis.constraint_ref.full_name(),
                analysis.score,
                analysis.match_count()
            );
            for constraint_match in analysis.matches.iter().take(matches_per_constraint) {
                let _ = writeln!(out, "        {}: {}", constraint_match.score, constraint_match.description());
            }
            if analysis.match_count() > matches_per_constraint {
                let _ = writeln!(out, "        ...");
            }
        }
        out
    }
}

impl<Sc: Score> fmt::Display for ScoreExplanation<Sc> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary(3))
    }
}
