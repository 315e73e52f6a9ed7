//! Shift scheduling test fixtures.
//!
//! Employees are problem facts; each shift is an entity whose planning
//! variable is the assigned employee.

use streamforge_core::score::HardSoftScore;
use streamforge_core::{PlanningId, PlanningSolution};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Employee {
    pub id: usize,
    pub name: String,
}

impl Employee {
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

impl PlanningId for Employee {
    type Id = usize;

    fn planning_id(&self) -> usize {
        self.id
    }
}

/// A shift covering `[start, end)` in hours.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shift {
    pub id: usize,
    pub employee: Option<usize>,
    pub start: i64,
    pub end: i64,
}

impl Shift {
    pub fn new(id: usize, employee: Option<usize>, start: i64, end: i64) -> Self {
        Self {
            id,
            employee,
            start,
            end,
        }
    }

    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Returns true if both shifts share at least one hour.
    pub fn overlaps(&self, other: &Shift) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl PlanningId for Shift {
    type Id = usize;

    fn planning_id(&self) -> usize {
        self.id
    }
}

#[derive(Clone, Debug)]
pub struct ShiftSolution {
    pub employees: Vec<Employee>,
    pub shifts: Vec<Shift>,
    pub score: Option<HardSoftScore>,
}

impl ShiftSolution {
    pub fn new(employees: Vec<Employee>, shifts: Vec<Shift>) -> Self {
        Self {
            employees,
            shifts,
            score: None,
        }
    }

    /// Counts pairs of overlapping shifts assigned to the same employee.
    pub fn overlapping_pairs(&self) -> usize {
        let mut pairs = 0;
        for (i, a) in self.shifts.iter().enumerate() {
            for b in &self.shifts[i + 1..] {
                if a.employee.is_some() && a.employee == b.employee && a.overlaps(b) {
                    pairs += 1;
                }
            }
        }
        pairs
    }
}

impl PlanningSolution for ShiftSolution {
    type Score = HardSoftScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }
}
