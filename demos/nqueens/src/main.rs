//! N-Queens Demo
//!
//! The N-Queens problem is a classic constraint satisfaction problem where
//! N queens must be placed on an NxN chessboard such that no two queens
//! threaten each other.
//!
//! A random-move hill climber changes one row at a time; the score director
//! rescores each move incrementally. Run with `RUST_LOG=debug` to see the
//! graph and session logs, and with `--assert` to check every score against
//! a fresh calculation.

use rand::Rng;
use streamforge::prelude::*;
use streamforge::{EnvironmentMode, SessionScoreDirector, StreamForgeError};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Planning entity: a queen fixed to a column.
#[derive(Clone, Debug)]
pub struct Queen {
    pub id: i32,
    pub column: i32,
    pub row: Option<i32>,
}

impl Queen {
    pub fn new(id: i32, column: i32) -> Self {
        Queen {
            id,
            column,
            row: None,
        }
    }
}

impl PlanningId for Queen {
    type Id = i32;

    fn planning_id(&self) -> i32 {
        self.id
    }
}

/// Planning solution: the complete N-Queens problem.
#[derive(Clone, Debug)]
pub struct NQueensSolution {
    pub n: i32,
    pub queens: Vec<Queen>,
    pub score: Option<SimpleScore>,
}

impl NQueensSolution {
    /// Creates a new N-Queens problem of size n.
    pub fn new(n: i32) -> Self {
        let queens: Vec<Queen> = (0..n).map(|i| Queen::new(i, i)).collect();

        NQueensSolution {
            n,
            queens,
            score: None,
        }
    }

    /// Prints the board to stdout.
    pub fn print_board(&self) {
        let score = self.score.map(|s| s.to_string()).unwrap_or_else(|| "?".to_string());
        println!("\n{}-Queens Solution (Score: {}):", self.n, score);
        println!("{}", "-".repeat((self.n as usize) * 2 + 1));

        for row_idx in 0..self.n {
            print!("|");
            for col_idx in 0..self.n {
                let queen_here = self
                    .queens
                    .iter()
                    .any(|q| q.column == col_idx && q.row == Some(row_idx));
                print!("{}", if queen_here { "Q|" } else { " |" });
            }
            println!();
        }
        println!("{}", "-".repeat((self.n as usize) * 2 + 1));
    }
}

impl PlanningSolution for NQueensSolution {
    type Score = SimpleScore;

    fn score(&self) -> Option<SimpleScore> {
        self.score
    }

    fn set_score(&mut self, score: Option<SimpleScore>) {
        self.score = score;
    }
}

impl SessionSolution for NQueensSolution {
    fn insert_into(&self, session: &mut ConstraintSession<SimpleScore>) -> streamforge::Result<()> {
        for queen in &self.queens {
            session.insert(queen.clone())?;
        }
        Ok(())
    }

    fn entity_count(&self, descriptor_index: usize) -> Option<usize> {
        (descriptor_index == 0).then_some(self.queens.len())
    }

    fn entity_fact(&self, descriptor_index: usize, entity_index: usize) -> Option<FactRef> {
        if descriptor_index != 0 {
            return None;
        }
        self.queens.get(entity_index).cloned().map(FactRef::new)
    }

    fn entity_uninitialized_count(&self, _descriptor_index: usize, entity_index: usize) -> usize {
        self.queens
            .get(entity_index)
            .map_or(0, |queen| usize::from(queen.row.is_none()))
    }
}

/// Creates constraints for N-Queens using the fluent API.
///
/// Constraints:
/// 1. No two queens on the same row
/// 2. No two queens on the same ascending diagonal
/// 3. No two queens on the same descending diagonal
fn define_constraints(factory: &ConstraintFactory<SimpleScore>) -> Vec<Constraint> {
    // Row conflict: two queens with same row
    let row_conflict = factory
        .for_each_unique_pair_with(joiner::equal(|q: &Queen| q.row))
        .filter(|a: &Queen, b: &Queen| a.row.is_some() && b.row.is_some())
        .penalize(SimpleScore::ONE)
        .as_constraint("Row conflict");

    // Ascending diagonal conflict: queens where (row - column) is the same
    let asc_diagonal = factory
        .for_each_unique_pair_with(joiner::equal(|q: &Queen| q.row.map(|r| r - q.column)))
        .filter(|a: &Queen, b: &Queen| a.row.is_some() && b.row.is_some())
        .penalize(SimpleScore::ONE)
        .as_constraint("Ascending diagonal conflict");

    // Descending diagonal conflict: queens where (row + column) is the same
    let desc_diagonal = factory
        .for_each_unique_pair_with(joiner::equal(|q: &Queen| q.row.map(|r| r + q.column)))
        .filter(|a: &Queen, b: &Queen| a.row.is_some() && b.row.is_some())
        .penalize(SimpleScore::ONE)
        .as_constraint("Descending diagonal conflict");

    vec![row_conflict, asc_diagonal, desc_diagonal]
}

type Director = SessionScoreDirector<NQueensSolution>;

fn change_row(director: &mut Director, queen_idx: usize, row: Option<i32>) -> streamforge::Result<()> {
    director.before_variable_changed(0, queen_idx, "row")?;
    director.working_solution_mut()?.queens[queen_idx].row = row;
    director.after_variable_changed(0, queen_idx, "row")
}

/// Runs construction heuristic: round-robin row assignment.
fn construction_heuristic(director: &mut Director, n: i32) -> streamforge::Result<SimpleScore> {
    let queen_count = director.entity_count(0).unwrap_or(0);
    for queen_idx in 0..queen_count {
        if director.working_solution()?.queens[queen_idx].row.is_some() {
            continue;
        }
        let row = (queen_idx as i32) % n;
        change_row(director, queen_idx, Some(row))?;
    }

    director.calculate_score()
}

/// Runs hill climbing local search.
fn hill_climbing(director: &mut Director, n: i32, max_steps: u64) -> streamforge::Result<SimpleScore> {
    let mut current_score = director.calculate_score()?;
    let mut rng = rand::rng();
    let queen_count = director.entity_count(0).unwrap_or(0);

    for step in 0..max_steps {
        if current_score == SimpleScore::ZERO {
            info!(step, "Found a solution without conflicts");
            break;
        }

        // Generate random change move
        let queen_idx = rng.random_range(0..queen_count);
        let new_row = rng.random_range(0..n);
        let old_row = director.working_solution()?.queens[queen_idx].row;

        // Skip no-op
        if old_row == Some(new_row) {
            continue;
        }

        change_row(director, queen_idx, Some(new_row))?;
        let new_score = director.calculate_score()?;

        // Accept if better or equal
        if new_score >= current_score {
            current_score = new_score;
        } else {
            change_row(director, queen_idx, old_row)?;
        }
    }

    Ok(current_score)
}

fn solve(n: i32, max_steps: u64, config: &ScoringConfig) -> streamforge::Result<()> {
    let factory = ScoreDirectorFactory::from_config(&define_constraints, config)?;
    let mut director = factory.build_score_director(NQueensSolution::new(n))?;
    info!(n, score = %director.calculate_score()?, "Starting");

    println!("Running Construction Heuristic...");
    let score = construction_heuristic(&mut director, n)?;
    println!("After construction: {}", score);

    println!("Running Hill Climbing (max {} steps)...", max_steps);
    let score = hill_climbing(&mut director, n, max_steps)?;
    println!("After local search: {}", score);

    let result = director.working_solution()?.clone();
    result.print_board();

    if score == SimpleScore::ZERO {
        println!("\nSolution is OPTIMAL! No queens threaten each other.");
    } else {
        println!(
            "\nSolution has {} conflicts (local optimum reached).",
            -score.score()
        );
    }

    if config.constraint_match_required() {
        println!("\n{}", director.explain_score()?);
    }
    Ok(())
}

fn main() -> Result<(), StreamForgeError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("StreamForge N-Queens Demo");
    println!("=========================\n");

    let mut config = ScoringConfig::new().with_constraint_match_enabled(true);
    if std::env::args().any(|arg| arg == "--assert") {
        config = config.with_environment_mode(EnvironmentMode::FullAssert);
    }

    solve(4, 100, &config)?;

    println!("\n--- Solving a larger problem ---\n");
    solve(8, 500, &config)?;

    Ok(())
}
