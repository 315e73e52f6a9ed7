//! N-Queens problem test fixtures.
//!
//! N queens are placed on an N×N board, one per column; the planning
//! variable of each queen is its row. No two queens may share a row or a
//! diagonal.
//!
//! # Example
//!
//! ```
//! use streamforge_test::nqueens::{calculate_conflicts, NQueensSolution};
//!
//! let solution = NQueensSolution::with_rows(&[0, 2, 1, 3]);
//! assert_eq!(calculate_conflicts(&solution), 2);
//! ```

use streamforge_core::score::SimpleScore;
use streamforge_core::{PlanningId, PlanningSolution};

/// A queen; `column` is fixed, `row` is the planning variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Queen {
    pub id: usize,
    pub column: i64,
    pub row: Option<i64>,
}

impl Queen {
    pub fn new(id: usize, column: i64, row: Option<i64>) -> Self {
        Self { id, column, row }
    }

    pub fn assigned(id: usize, column: i64, row: i64) -> Self {
        Self::new(id, column, Some(row))
    }

    pub fn unassigned(id: usize, column: i64) -> Self {
        Self::new(id, column, None)
    }

    /// Index of the ascending diagonal, `None` when unassigned.
    pub fn ascending_diagonal(&self) -> Option<i64> {
        self.row.map(|row| row + self.column)
    }

    /// Index of the descending diagonal, `None` when unassigned.
    pub fn descending_diagonal(&self) -> Option<i64> {
        self.row.map(|row| row - self.column)
    }
}

impl PlanningId for Queen {
    type Id = usize;

    fn planning_id(&self) -> usize {
        self.id
    }
}

#[derive(Clone, Debug)]
pub struct NQueensSolution {
    pub queens: Vec<Queen>,
    pub score: Option<SimpleScore>,
}

impl NQueensSolution {
    pub fn new(queens: Vec<Queen>) -> Self {
        Self { queens, score: None }
    }

    /// Creates `n` queens in columns `0..n` without rows.
    pub fn uninitialized(n: usize) -> Self {
        Self::new((0..n).map(|i| Queen::unassigned(i, i as i64)).collect())
    }

    /// Creates one queen per row, in columns `0..rows.len()`.
    pub fn with_rows(rows: &[i64]) -> Self {
        Self::new(
            rows.iter()
                .enumerate()
                .map(|(i, &row)| Queen::assigned(i, i as i64, row))
                .collect(),
        )
    }

    pub fn with_optional_rows(rows: &[Option<i64>]) -> Self {
        Self::new(
            rows.iter()
                .enumerate()
                .map(|(i, &row)| Queen::new(i, i as i64, row))
                .collect(),
        )
    }
}

impl PlanningSolution for NQueensSolution {
    type Score = SimpleScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }
}

/// Counts row and diagonal conflicts between every pair of assigned queens.
pub fn calculate_conflicts(solution: &NQueensSolution) -> i64 {
    let mut conflicts = 0;
    let queens = &solution.queens;
    for i in 0..queens.len() {
        for j in (i + 1)..queens.len() {
            let (a, b) = (&queens[i], &queens[j]);
            if a.row.is_none() || b.row.is_none() {
                continue;
            }
            if a.row == b.row {
                conflicts += 1;
            }
            if a.ascending_diagonal() == b.ascending_diagonal() {
                conflicts += 1;
            }
            if a.descending_diagonal() == b.descending_diagonal() {
                conflicts += 1;
            }
        }
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_conflicts() {
        assert_eq!(calculate_conflicts(&NQueensSolution::with_rows(&[1, 3, 0, 2])), 0);
    }

    #[test]
    fn test_row_conflict() {
        assert_eq!(calculate_conflicts(&NQueensSolution::with_rows(&[0, 0])), 1);
    }

    #[test]
    fn test_diagonal_conflict() {
        assert_eq!(calculate_conflicts(&NQueensSolution::with_rows(&[0, 1])), 1);
        assert_eq!(calculate_conflicts(&NQueensSolution::with_rows(&[1, 0])), 1);
    }

    #[test]
    fn test_unassigned_queens_never_conflict() {
        let solution = NQueensSolution::with_optional_rows(&[Some(0), None, Some(0)]);
        assert_eq!(calculate_conflicts(&solution), 1);
        assert_eq!(calculate_conflicts(&NQueensSolution::uninitialized(4)), 0);
    }
}
