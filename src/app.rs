#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow potential wrapping when casting between types as board coordinates are within reasonable ranges
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;
use std::error;

use crate::Time;
use crate::components::{Board, EventLog, GameRng, GameState, Piece, Position, RunState};
use crate::config::Config;
use crate::game::{BOARD_COLS, BOARD_ROWS};
use crate::modes::ModeController;
use crate::systems;

pub type AppResult<T> = std::result::Result<T, Box<dyn error::Error>>;

/// The one process-wide session object: owns the ECS world holding every
/// piece of game state, and drives the lifecycle transitions.
pub struct App {
    pub world: World,
    pub should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(Board::new(BOARD_ROWS, BOARD_COLS));
        world.insert_resource(GameRng::new(config.seed));
        world.insert_resource(ModeController::new(config.normal_mode_ms()));
        world.insert_resource(EventLog::default());

        let highscores = crate::highscore::HighScoreStore::default();
        world.insert_resource(GameState {
            high_score: highscores.load(),
            ..GameState::default()
        });
        world.insert_resource(highscores);

        // Idle until the player starts; no piece exists yet.
        Self {
            world,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.world.resource::<GameState>().run_state
    }

    /// Starts a fresh round from idle or game over: board, score, level and
    /// quirks all back to defaults, first piece spawned, both timers armed.
    pub fn start(&mut self) {
        self.despawn_pieces();
        self.world.resource_mut::<Board>().reset();
        {
            let mut state = self.world.resource_mut::<GameState>();
            state.reset_for_start();
            state.run_state = RunState::Running;
        }
        {
            let mut modes = self.world.resource_mut::<ModeController>();
            modes.reset();
            modes.arm();
        }
        self.world
            .resource_mut::<EventLog>()
            .push("A fresh round begins. It will not go well.");
        systems::spawn_piece(&mut self.world);
    }

    /// Halts the drop loop and the mode timer. Only valid while running.
    pub fn pause(&mut self) {
        if self.run_state() != RunState::Running {
            return;
        }
        self.world.resource_mut::<GameState>().run_state = RunState::Paused;
        self.world.resource_mut::<ModeController>().disarm();
        self.world
            .resource_mut::<EventLog>()
            .push("Paused. The situation will not improve.");
    }

    /// Restarts both schedules with fresh baselines; drop progress from
    /// before the pause is discarded. Only valid while paused.
    pub fn resume(&mut self) {
        if self.run_state() != RunState::Paused {
            return;
        }
        {
            let mut state = self.world.resource_mut::<GameState>();
            state.run_state = RunState::Running;
            state.drop_timer_ms = 0.0;
        }
        self.world.resource_mut::<ModeController>().arm();
        if self.world.resource::<ModeController>().is_chaotic() {
            systems::roll_control_mode(&mut self.world);
        }
        self.world
            .resource_mut::<EventLog>()
            .push("Resumed. Brace yourself.");
    }

    pub fn toggle_pause(&mut self) {
        match self.run_state() {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
            RunState::Idle | RunState::GameOver => {}
        }
    }

    /// Read-only status view for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> crate::components::Snapshot {
        let state = self.world.resource::<GameState>();
        let modes = self.world.resource::<ModeController>();
        crate::components::Snapshot {
            score: state.score,
            lines: state.lines,
            level: state.level,
            drop_interval_ms: state.drop_interval_ms,
            global_mode: modes.global,
            control_mode: modes.control,
            running: state.is_running(),
        }
    }

    /// Everything the renderer needs to paint: board cells plus the
    /// projected cells of the active piece, as (position, color id) pairs.
    pub fn render_cells(&mut self) -> Vec<(Position, u8)> {
        let mut cells = Vec::new();

        let board = self.world.resource::<Board>();
        for (y, row) in board.cells.iter().enumerate() {
            for (x, &id) in row.iter().enumerate() {
                if id != 0 {
                    cells.push((
                        Position {
                            x: x as i32,
                            y: y as i32,
                        },
                        id,
                    ));
                }
            }
        }

        let piece_cells: Vec<_> = self
            .world
            .query::<(&Piece, &Position)>()
            .iter(&self.world)
            .flat_map(|(piece, pos)| {
                let pos = *pos;
                piece
                    .cells
                    .iter()
                    .enumerate()
                    .flat_map(move |(dy, row)| {
                        row.iter().enumerate().filter_map(move |(dx, &id)| {
                            (id != 0).then_some((
                                Position {
                                    x: pos.x + dx as i32,
                                    y: pos.y + dy as i32,
                                },
                                id,
                            ))
                        })
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        cells.extend(piece_cells);
        cells
    }

    fn despawn_pieces(&mut self) {
        let mut query = self.world.query::<(Entity, &Piece)>();
        let entities: Vec<Entity> = query.iter(&self.world).map(|(entity, _)| entity).collect();
        for entity in entities {
            self.world.despawn(entity);
        }
    }
}
