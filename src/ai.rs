// Targeting logic for the computer opponent: an explicit hunt/target state
// machine, plus a placement-density map that steers hard-difficulty hunting.

use std::collections::VecDeque;

use log::debug;
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::air_strike::{AirStrikeReport, CellOutcome};
use crate::board::{ShotHistory, SunkShip};
use crate::config::BOARD_SIZE;
use crate::coord::{Coordinate, Line, LineKind};
use crate::ship::{compute_cells, Orientation};
use crate::shot::ShotReport;

const GRID_SIZE: usize = BOARD_SIZE;

/// Placements covering known hits get this factor per covered hit.
const HIT_BIAS: f64 = 10.0;
/// Extra weight for cells on the parity lattice of the smallest live ship.
const PARITY_BIAS: f64 = 3.0;
/// Sampling temperature for density-based hunting; lower is greedier.
const HUNT_TEMPERATURE: f64 = 0.5;

/// How hard the computer opponent plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "service",
    derive(serde::Serialize, serde::Deserialize, clap::ValueEnum)
)]
#[cfg_attr(feature = "service", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    /// Uniformly random shots, never follows up on a hit.
    Easy,
    /// Random hunting, then works the neighbours of every hit.
    #[default]
    Medium,
    /// Density and parity driven hunting; remembers hits on other ships.
    Hard,
}

/// Targeting state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetMode {
    /// No unresolved hit to pursue.
    Hunt,
    /// Working through cells next to unresolved hits.
    Target { frontier: VecDeque<Coordinate> },
}

/// The computer's memory of its shots against one player board.
#[derive(Debug, Clone)]
pub struct Targeting {
    difficulty: Difficulty,
    mode: TargetMode,
    /// Hits not yet attributed to a sunk ship, oldest first.
    open_hits: Vec<Coordinate>,
}

impl Targeting {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            mode: TargetMode::Hunt,
            open_hits: Vec::new(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn mode(&self) -> &TargetMode {
        &self.mode
    }

    pub fn is_hunting(&self) -> bool {
        self.mode == TargetMode::Hunt
    }

    /// Next cell to fire at. Never returns a cell present in `history`;
    /// `None` only once every cell has been shot.
    pub fn select_target<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        history: &ShotHistory,
    ) -> Option<Coordinate> {
        if let TargetMode::Target { frontier } = &mut self.mode {
            while let Some(coord) = frontier.pop_front() {
                if !history.is_shot(coord) {
                    return Some(coord);
                }
            }
            debug!("frontier exhausted without a sink, hunting again");
            self.mode = TargetMode::Hunt;
            self.open_hits.clear();
        }
        match self.difficulty {
            Difficulty::Easy | Difficulty::Medium => random_unshot(rng, history),
            Difficulty::Hard => hunt_by_density(rng, history),
        }
    }

    /// Feed back the outcome of the last shot. `history` is the board view
    /// after the shot.
    pub fn observe(&mut self, report: &ShotReport, history: &ShotHistory) {
        if self.difficulty == Difficulty::Easy {
            return;
        }
        match (&report.sunk, report.hit) {
            (Some(sunk), _) => {
                self.open_hits.push(report.coord);
                self.record_sink(sunk, history);
            }
            (None, true) => {
                self.open_hits.push(report.coord);
                self.enqueue_neighbors(&[report.coord], history);
            }
            (None, false) => {
                if matches!(&self.mode, TargetMode::Target { frontier } if frontier.is_empty()) {
                    self.mode = TargetMode::Hunt;
                    self.open_hits.clear();
                }
            }
        }
    }

    /// Feed back a whole air strike volley.
    pub fn observe_strike(&mut self, report: &AirStrikeReport, history: &ShotHistory) {
        if self.difficulty == Difficulty::Easy {
            return;
        }
        for sunk in &report.sunk {
            self.record_sink(sunk, history);
        }
        let fresh: Vec<Coordinate> = report
            .cells
            .iter()
            .filter(|cell| cell.outcome == CellOutcome::Hit && !history.sunk.contains(cell.coord))
            .map(|cell| cell.coord)
            .collect();
        if !fresh.is_empty() {
            self.open_hits.extend(fresh.iter().copied());
            self.enqueue_neighbors(&fresh, history);
        }
    }

    fn record_sink(&mut self, sunk: &SunkShip, history: &ShotHistory) {
        debug!("sank {}, clearing frontier", sunk.kind);
        self.open_hits.retain(|c| !sunk.cells.contains(c));
        self.mode = TargetMode::Hunt;
        if self.difficulty == Difficulty::Hard && !self.open_hits.is_empty() {
            let seeds = self.open_hits.clone();
            debug!("{} hits on other ships remain, targeting them", seeds.len());
            self.enqueue_neighbors(&seeds, history);
        } else {
            self.open_hits.clear();
        }
    }

    fn enqueue_neighbors(&mut self, seeds: &[Coordinate], history: &ShotHistory) {
        let mut frontier = match std::mem::replace(&mut self.mode, TargetMode::Hunt) {
            TargetMode::Target { frontier } => frontier,
            TargetMode::Hunt => VecDeque::new(),
        };
        for seed in seeds {
            for n in seed.neighbors() {
                if !history.is_shot(n) && !frontier.contains(&n) {
                    frontier.push_back(n);
                }
            }
        }
        prioritize_axis(&mut frontier, &self.open_hits);
        self.mode = TargetMode::Target { frontier };
    }
}

/// Axis through the newest open hit and an older open hit on the same row
/// or column, with the row/column index.
fn known_axis(open_hits: &[Coordinate]) -> Option<(Orientation, usize)> {
    let (last, older) = open_hits.split_last()?;
    older.iter().rev().find_map(|hit| {
        if hit.row == last.row {
            Some((Orientation::Horizontal, last.row))
        } else if hit.col == last.col {
            Some((Orientation::Vertical, last.col))
        } else {
            None
        }
    })
}

/// Move frontier cells lying on the known axis ahead of the others,
/// keeping relative order.
fn prioritize_axis(frontier: &mut VecDeque<Coordinate>, open_hits: &[Coordinate]) {
    let Some((orientation, line)) = known_axis(open_hits) else {
        return;
    };
    let (mut along, across): (VecDeque<_>, VecDeque<_>) =
        frontier.drain(..).partition(|c| match orientation {
            Orientation::Horizontal => c.row == line,
            Orientation::Vertical => c.col == line,
        });
    along.extend(across);
    *frontier = along;
}

/// Any not-yet-shot cell, uniformly.
pub fn random_unshot<R: Rng + ?Sized>(rng: &mut R, history: &ShotHistory) -> Option<Coordinate> {
    history.unshot().iter().choose(rng)
}

fn hunt_by_density<R: Rng + ?Sized>(rng: &mut R, history: &ShotHistory) -> Option<Coordinate> {
    let mut pdf = calc_pdf(history);
    let stride = history.remaining_sizes().into_iter().min().unwrap_or(2).max(1);
    for coord in Coordinate::all() {
        if (coord.row + coord.col) % stride == 0 {
            pdf[coord.row][coord.col] *= PARITY_BIAS;
        }
    }
    let choice = sample_pdf(&pdf, HUNT_TEMPERATURE, rng);
    if history.is_shot(choice) {
        return random_unshot(rng, history);
    }
    Some(choice)
}

/// Probability density over the unshot cells: every way a remaining ship
/// could still lie on the board adds weight to the cells it covers.
/// Placements crossing a miss or a sunk ship are impossible; placements
/// covering open hits are strongly favoured.
pub fn calc_pdf(history: &ShotHistory) -> [[f64; GRID_SIZE]; GRID_SIZE] {
    let mut matrix = [[0.0f64; GRID_SIZE]; GRID_SIZE];
    let blocked = history.misses | history.sunk;
    let open = history.open_hits();

    for len in history.remaining_sizes() {
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            let (rows, cols) = match orientation {
                Orientation::Horizontal => (GRID_SIZE, GRID_SIZE + 1 - len),
                Orientation::Vertical => (GRID_SIZE + 1 - len, GRID_SIZE),
            };
            for r in 0..rows {
                for c in 0..cols {
                    let cells = compute_cells(Coordinate::new(r, c), len, orientation);
                    if cells.iter().any(|&cell| blocked.contains(cell)) {
                        continue;
                    }
                    let n_hits = cells.iter().filter(|&&cell| open.contains(cell)).count();
                    let weight = HIT_BIAS.powi(n_hits as i32);
                    for cell in cells {
                        if !history.is_shot(cell) {
                            matrix[cell.row][cell.col] += weight;
                        }
                    }
                }
            }
        }
    }

    normalize(matrix, history)
}

fn normalize(
    mut matrix: [[f64; GRID_SIZE]; GRID_SIZE],
    history: &ShotHistory,
) -> [[f64; GRID_SIZE]; GRID_SIZE] {
    let total: f64 = matrix.iter().flatten().sum();
    if total == 0.0 {
        // No placement fits; spread evenly over whatever is left.
        let unshot = history.unshot();
        let uniform = 1.0 / unshot.len().max(1) as f64;
        for coord in Coordinate::all() {
            matrix[coord.row][coord.col] = if unshot.contains(coord) { uniform } else { 0.0 };
        }
        return matrix;
    }
    for value in matrix.iter_mut().flatten() {
        *value /= total;
    }
    matrix
}

/// Sample a coordinate from a probability matrix using a temperature parameter.
pub fn sample_pdf<R: Rng + ?Sized>(
    pdf: &[[f64; GRID_SIZE]; GRID_SIZE],
    temperature: f64,
    rng: &mut R,
) -> Coordinate {
    let mut adjusted = [[0.0f64; GRID_SIZE]; GRID_SIZE];
    let mut total = 0.0;
    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            let v = pdf[r][c].powf(1.0 / temperature);
            adjusted[r][c] = v;
            total += v;
        }
    }
    if total == 0.0 {
        return Coordinate::new(
            rng.random_range(0..GRID_SIZE),
            rng.random_range(0..GRID_SIZE),
        );
    }
    let mut cumulative = 0.0;
    let threshold: f64 = rng.random_range(0.0..total);
    let mut last_positive = Coordinate::new(GRID_SIZE - 1, GRID_SIZE - 1);
    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            if adjusted[r][c] > 0.0 {
                last_positive = Coordinate::new(r, c);
            }
            cumulative += adjusted[r][c];
            if threshold < cumulative {
                return Coordinate::new(r, c);
            }
        }
    }
    last_positive
}

/// The row or column whose unshot cells carry the most density, for
/// spending an air strike. `None` once every cell has been shot.
pub fn best_strike_line(history: &ShotHistory) -> Option<Line> {
    let pdf = calc_pdf(history);
    let mut best: Option<(f64, Line)> = None;
    for kind in [LineKind::Row, LineKind::Column] {
        for index in 0..GRID_SIZE {
            let line = Line::new(kind, index).ok()?;
            let mut unshot = 0;
            let mut score = 0.0;
            for cell in line.cells().filter(|&c| !history.is_shot(c)) {
                unshot += 1;
                score += pdf[cell.row][cell.col];
            }
            if unshot == 0 {
                continue;
            }
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, line));
            }
        }
    }
    best.map(|(_, line)| line)
}
