#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;
use once_cell::sync::Lazy;
use std::collections::VecDeque;

use crate::game::{BASE_DROP_INTERVAL_MS, STARTING_LEVEL};

/// How many entries the on-screen event feed keeps.
pub const EVENT_LOG_CAPACITY: usize = 12;

/// The seven shape templates, as small matrices of color ids. The non-zero
/// value doubles as the shape's identity (1-7), which the reroll quirk uses
/// to avoid handing the player the same piece back.
static TEMPLATES: Lazy<[Vec<Vec<u8>>; 7]> = Lazy::new(|| {
    [
        vec![vec![1, 1, 1, 1]],
        vec![vec![0, 2, 0], vec![2, 2, 2]],
        vec![vec![3, 0, 0], vec![3, 3, 3]],
        vec![vec![0, 0, 4], vec![4, 4, 4]],
        vec![vec![5, 5], vec![5, 5]],
        vec![vec![6, 6, 0], vec![0, 6, 6]],
        vec![vec![0, 7, 7], vec![7, 7, 0]],
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    I,
    T,
    J,
    L,
    O,
    S,
    Z,
}

impl PieceKind {
    pub const ALL: [Self; 7] = [
        Self::I,
        Self::T,
        Self::J,
        Self::L,
        Self::O,
        Self::S,
        Self::Z,
    ];

    fn index(self) -> usize {
        match self {
            Self::I => 0,
            Self::T => 1,
            Self::J => 2,
            Self::L => 3,
            Self::O => 4,
            Self::S => 5,
            Self::Z => 6,
        }
    }

    #[must_use]
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self::ALL[rng.usize(0..Self::ALL.len())]
    }

    /// Uniformly random kind that is guaranteed to differ from `self`.
    #[must_use]
    pub fn random_other(self, rng: &mut fastrand::Rng) -> Self {
        let others: Vec<Self> = Self::ALL.into_iter().filter(|k| *k != self).collect();
        others[rng.usize(0..others.len())]
    }

    #[must_use]
    pub fn template(self) -> &'static [Vec<u8>] {
        &TEMPLATES[self.index()]
    }

    /// The dominant color id of this shape (1-7).
    #[must_use]
    pub fn color_id(self) -> u8 {
        (self.index() + 1) as u8
    }

    #[must_use]
    pub fn color(self) -> ratatui::style::Color {
        color_for_id(self.color_id())
    }
}

/// Color for a board cell id. Id 0 is empty and never rendered.
#[must_use]
pub fn color_for_id(id: u8) -> ratatui::style::Color {
    use ratatui::style::Color;
    match id {
        1 => Color::LightBlue,
        2 => Color::LightRed,
        3 => Color::LightYellow,
        4 => Color::Magenta,
        5 => Color::Yellow,
        6 => Color::Cyan,
        7 => Color::LightMagenta,
        _ => Color::White,
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// The falling piece: a mutable cell matrix plus the identity it was stamped
/// from. Rotation rewrites `cells`; the reroll quirk swaps out the whole
/// thing.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub cells: Vec<Vec<u8>>,
}

impl Piece {
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            cells: kind.template().to_vec(),
        }
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.cells.first().map_or(0, |row| row.len() as i32)
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.cells.len() as i32
    }
}

/// Clockwise rotation: transpose, then reverse each row.
#[must_use]
pub fn rotate_cw(cells: &[Vec<u8>]) -> Vec<Vec<u8>> {
    let rows = cells.len();
    let cols = cells.first().map_or(0, Vec::len);
    (0..cols)
        .map(|x| (0..rows).rev().map(|y| cells[y][x]).collect())
        .collect()
}

/// The playfield: `rows x cols` cells holding color ids, 0 = empty.
#[derive(Resource, Debug, Clone)]
pub struct Board {
    pub rows: usize,
    pub cols: usize,
    /// cells[row][col]; row 0 is the top.
    pub cells: Vec<Vec<u8>>,
}

impl Board {
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![0; cols]; rows],
        }
    }

    pub fn reset(&mut self) {
        for row in &mut self.cells {
            row.fill(0);
        }
    }

    /// True if any occupied piece cell, projected at `pos`, lands out of
    /// bounds or on a non-empty board cell. Pure; commits nothing.
    #[must_use]
    pub fn collides(&self, piece: &Piece, pos: Position) -> bool {
        for (dy, row) in piece.cells.iter().enumerate() {
            for (dx, &cell) in row.iter().enumerate() {
                if cell == 0 {
                    continue;
                }
                let x = pos.x + dx as i32;
                let y = pos.y + dy as i32;
                if x < 0 || x >= self.cols as i32 || y < 0 || y >= self.rows as i32 {
                    return true;
                }
                if self.cells[y as usize][x as usize] != 0 {
                    return true;
                }
            }
        }
        false
    }

    /// Writes the piece's color ids into the board. The caller must have
    /// already verified the placement; this does not re-check.
    pub fn merge(&mut self, piece: &Piece, pos: Position) {
        for (dy, row) in piece.cells.iter().enumerate() {
            for (dx, &cell) in row.iter().enumerate() {
                if cell != 0 {
                    let x = pos.x + dx as i32;
                    let y = pos.y + dy as i32;
                    if x >= 0 && x < self.cols as i32 && y >= 0 && y < self.rows as i32 {
                        self.cells[y as usize][x as usize] = cell;
                    }
                }
            }
        }
    }

    /// Removes every full row, inserting empty rows at the top. Scans bottom
    /// to top and re-examines the same index after a removal, since the row
    /// above has shifted into it. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.rows as i32 - 1;
        while y >= 0 {
            if self.cells[y as usize].iter().all(|&c| c != 0) {
                let mut row = self.cells.remove(y as usize);
                row.fill(0);
                self.cells.insert(0, row);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }
}

/// Lifecycle of the state machine. `GameOver` is terminal and only left via
/// an explicit restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

#[derive(Debug, Resource, Clone)]
pub struct GameState {
    pub run_state: RunState,
    /// Chaotic-mode scoring can subtract, so this may go negative.
    pub score: i64,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u64,
    /// Elapsed time accumulated toward the next automatic descent.
    pub drop_timer_ms: f64,
    pub high_score: i64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            run_state: RunState::Idle,
            score: 0,
            lines: 0,
            level: STARTING_LEVEL,
            drop_interval_ms: BASE_DROP_INTERVAL_MS,
            drop_timer_ms: 0.0,
            high_score: 0,
        }
    }
}

impl GameState {
    /// Back to defaults for a new round. The high score survives; the zeroed
    /// score must never register as a new record.
    pub fn reset_for_start(&mut self) {
        let high_score = self.high_score;
        *self = Self::default();
        self.high_score = high_score;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }
}

/// Read-only view handed to the presentation layer after state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub score: i64,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u64,
    pub global_mode: crate::modes::GlobalMode,
    pub control_mode: crate::modes::ControlMode,
    pub running: bool,
}

/// The five logical gameplay actions the input adapter can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
}

/// The inverted-controls swap table: left and right trade places, and so do
/// down (soft drop) and up (rotate). Hard drop is left alone.
#[must_use]
pub fn invert_action(action: Action) -> Action {
    match action {
        Action::MoveLeft => Action::MoveRight,
        Action::MoveRight => Action::MoveLeft,
        Action::SoftDrop => Action::Rotate,
        Action::Rotate => Action::SoftDrop,
        Action::HardDrop => Action::HardDrop,
    }
}

/// Seedable randomness source for piece selection and quirk rolls. Seeded
/// from config for reproducible runs, from entropy otherwise.
#[derive(Resource, Debug)]
pub struct GameRng(pub fastrand::Rng);

impl GameRng {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(fastrand::Rng::with_seed(seed)),
            None => Self(fastrand::Rng::new()),
        }
    }
}

/// Human-readable event feed, newest first, capped at
/// [`EVENT_LOG_CAPACITY`] entries.
#[derive(Resource, Debug, Default)]
pub struct EventLog {
    entries: VecDeque<String>,
}

impl EventLog {
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{message}");
        self.entries.push_front(message);
        self.entries.truncate(EVENT_LOG_CAPACITY);
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
