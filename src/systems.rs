use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::{
    Action, Board, EventLog, GameRng, GameState, Piece, PieceKind, Position, RunState, rotate_cw,
};
use crate::game::{SOFT_DROP_POINTS, hard_drop_points, level_for_lines, line_clear_points};
use crate::highscore::HighScoreStore;
use crate::modes::{ControlMode, GlobalMode, ModeController};

/// Picks one of the seven shapes uniformly at random and places it centered
/// at the top row. If even that placement collides, the game is over.
pub fn spawn_piece(world: &mut World) {
    let kind = {
        let mut rng = world.resource_mut::<GameRng>();
        PieceKind::random(&mut rng.0)
    };
    let piece = Piece::new(kind);
    let cols = world.resource::<Board>().cols as i32;
    let position = Position {
        x: cols / 2 - piece.width() / 2,
        y: 0,
    };

    if world.resource::<Board>().collides(&piece, position) {
        game_over(world);
        return;
    }

    debug!("Spawned {:?} at x={}", kind, position.x);
    world.spawn((piece, position));
}

fn game_over(world: &mut World) {
    world.resource_mut::<GameState>().run_state = RunState::GameOver;
    world.resource_mut::<ModeController>().disarm();
    world
        .resource_mut::<EventLog>()
        .push("Hard lock. Game over.");
    info!("Game over: no room to spawn");
}

fn active_piece(world: &mut World) -> Option<(Entity, Piece, Position)> {
    let mut query = world.query::<(Entity, &Piece, &Position)>();
    query
        .iter(world)
        .next()
        .map(|(entity, piece, position)| (entity, piece.clone(), *position))
}

/// Dispatches one logical player action. While the doubled-input quirk is in
/// force the action literally executes a second time, whatever that does --
/// two rotations may cancel out, two rerolls may not. The quirk in force when
/// the action arrives decides the doubling; a lock during the first execution
/// may re-roll the control mode, and that must not affect this dispatch.
pub fn apply_action(world: &mut World, action: Action) {
    if !world.resource::<GameState>().is_running() {
        return;
    }
    let doubled = world
        .resource::<ModeController>()
        .control_active(ControlMode::Double);

    perform_action(world, action);
    if doubled && world.resource::<GameState>().is_running() {
        perform_action(world, action);
    }
}

fn perform_action(world: &mut World, action: Action) {
    match action {
        Action::MoveLeft => move_piece(world, -1),
        Action::MoveRight => move_piece(world, 1),
        Action::SoftDrop => soft_drop(world),
        Action::Rotate => rotate_piece(world),
        Action::HardDrop => hard_drop(world),
    }
}

fn move_piece(world: &mut World, dx: i32) {
    if let Some((entity, piece, position)) = active_piece(world) {
        let candidate = Position {
            x: position.x + dx,
            y: position.y,
        };
        if !world.resource::<Board>().collides(&piece, candidate) {
            world.entity_mut(entity).insert(candidate);
        }
    }
}

/// One-row descent shared by the automatic tick and the soft drop: move the
/// piece down, or lock it where it stands if that collides. The drop counter
/// resets either way.
fn drop_once(world: &mut World) {
    if let Some((entity, piece, position)) = active_piece(world) {
        let below = Position {
            x: position.x,
            y: position.y + 1,
        };
        if world.resource::<Board>().collides(&piece, below) {
            lock_piece(world, entity, &piece, position);
        } else {
            world.entity_mut(entity).insert(below);
        }
    }
    world.resource_mut::<GameState>().drop_timer_ms = 0.0;
}

fn soft_drop(world: &mut World) {
    world.resource_mut::<GameState>().score += SOFT_DROP_POINTS;
    drop_once(world);
    update_high_score(world);
}

fn hard_drop(world: &mut World) {
    let Some((entity, piece, position)) = active_piece(world) else {
        return;
    };

    let (resting, distance) = {
        let board = world.resource::<Board>();
        let mut y = position.y;
        let mut distance = 0i64;
        loop {
            let below = Position {
                x: position.x,
                y: y + 1,
            };
            if board.collides(&piece, below) {
                break;
            }
            y += 1;
            distance += 1;
        }
        (Position { x: position.x, y }, distance)
    };

    let chaotic = world.resource::<ModeController>().is_chaotic();
    let points = hard_drop_points(chaotic, distance);
    world.resource_mut::<GameState>().score += points;
    if points < 0 {
        world
            .resource_mut::<EventLog>()
            .push(format!("Overshot. {} points docked.", -points));
    }

    world.entity_mut(entity).insert(resting);
    lock_piece(world, entity, &piece, resting);
}

fn rotate_piece(world: &mut World) {
    let Some((entity, piece, position)) = active_piece(world) else {
        return;
    };
    let reroll = world
        .resource::<ModeController>()
        .control_active(ControlMode::Reroll);
    if reroll {
        reroll_rotate(world, entity, &piece, position);
    } else {
        standard_rotate(world, entity, &piece, position);
    }
}

/// Plain clockwise rotation with horizontal nudges of 0, -1, +1 columns.
/// The first placement that clears wins; otherwise nothing is committed.
fn standard_rotate(world: &mut World, entity: Entity, piece: &Piece, position: Position) {
    let rotated = Piece {
        kind: piece.kind,
        cells: rotate_cw(&piece.cells),
    };
    let placement = {
        let board = world.resource::<Board>();
        [0, -1, 1]
            .into_iter()
            .map(|shift| Position {
                x: position.x + shift,
                y: position.y,
            })
            .find(|candidate| !board.collides(&rotated, *candidate))
    };
    if let Some(placement) = placement {
        world.entity_mut(entity).insert((rotated, placement));
    }
}

/// The reroll quirk: rotating swaps the piece for a random different shape,
/// re-centered on the old piece's center column. Wider nudges than a normal
/// rotation get a chance before the whole thing is abandoned.
fn reroll_rotate(world: &mut World, entity: Entity, piece: &Piece, position: Position) {
    let replacement = {
        let mut rng = world.resource_mut::<GameRng>();
        Piece::new(piece.kind.random_other(&mut rng.0))
    };

    let cols = world.resource::<Board>().cols as i32;
    let center = position.x + piece.width() / 2;
    let base_x = (center - replacement.width() / 2).clamp(0, cols - replacement.width());

    let placement = {
        let board = world.resource::<Board>();
        [0, -1, 1, -2, 2]
            .into_iter()
            .map(|shift| Position {
                x: base_x + shift,
                y: position.y,
            })
            .find(|candidate| !board.collides(&replacement, *candidate))
    };
    if let Some(placement) = placement {
        world.entity_mut(entity).insert((replacement, placement));
        world
            .resource_mut::<EventLog>()
            .push("The piece changed its mind mid-rotation.");
    }
}

/// The lock path: merge at the last valid position, clear lines, respawn,
/// and reroll the control quirk when the game is feeling chaotic.
fn lock_piece(world: &mut World, entity: Entity, piece: &Piece, position: Position) {
    world.resource_mut::<Board>().merge(piece, position);
    world.despawn(entity);

    apply_line_clears(world);
    spawn_piece(world);

    let reroll_due = world.resource::<GameState>().is_running()
        && world.resource::<ModeController>().is_chaotic();
    if reroll_due {
        roll_control_mode(world);
    }

    world.resource_mut::<GameState>().drop_timer_ms = 0.0;
    update_high_score(world);
}

fn apply_line_clears(world: &mut World) {
    let cleared = world.resource_mut::<Board>().clear_full_rows();
    if cleared == 0 {
        return;
    }

    let chaotic = world.resource::<ModeController>().is_chaotic();
    let points = line_clear_points(chaotic, cleared);

    let mut leveled_up = None;
    {
        let mut state = world.resource_mut::<GameState>();
        state.score += points;
        state.lines += cleared as u32;
        let level = level_for_lines(state.lines);
        if level != state.level {
            state.level = level;
            state.drop_interval_ms = crate::game::drop_interval_for_level(level);
            leveled_up = Some(level);
        }
    }

    world.resource_mut::<EventLog>().push(format!(
        "{cleared} line{} cleared for {points:+} points. Something feels off.",
        if cleared == 1 { "" } else { "s" }
    ));
    if let Some(level) = leveled_up {
        world
            .resource_mut::<EventLog>()
            .push(format!("Level {level}. Nobody asked for the speed-up."));
    }
    update_high_score(world);
}

/// Rolls a fresh control perturbation. Called on every lock while chaotic
/// and whenever chaotic mode is entered or resumed.
pub fn roll_control_mode(world: &mut World) {
    let rolled = {
        let mut rng = world.resource_mut::<GameRng>();
        ControlMode::roll(&mut rng.0)
    };
    let changed = {
        let mut modes = world.resource_mut::<ModeController>();
        let changed = modes.control != rolled;
        modes.control = rolled;
        changed
    };
    if changed {
        world
            .resource_mut::<EventLog>()
            .push(format!("New quirk: {}.", rolled.label()));
    }
}

/// Time-driven automatic descent: accumulate elapsed time into the drop
/// counter and drop one row once it exceeds the current interval.
pub fn game_tick_system(world: &mut World, delta_ms: f64) {
    if !world.resource::<GameState>().is_running() {
        return;
    }
    let due = {
        let mut state = world.resource_mut::<GameState>();
        state.drop_timer_ms += delta_ms;
        state.drop_timer_ms > state.drop_interval_ms as f64
    };
    if due {
        drop_once(world);
    }
}

/// Advances the mode timer and applies the flip side effects when it fires.
pub fn mode_tick_system(world: &mut World, delta_ms: f64) {
    if !world.resource::<GameState>().is_running() {
        return;
    }
    let fired = world.resource_mut::<ModeController>().tick(delta_ms);
    if !fired {
        return;
    }

    let entered = {
        let mut modes = world.resource_mut::<ModeController>();
        modes.flip();
        modes.global
    };
    match entered {
        GlobalMode::Chaotic => {
            world
                .resource_mut::<EventLog>()
                .push("The game got bored of being fair.");
            roll_control_mode(world);
        }
        GlobalMode::Normal => {
            world
                .resource_mut::<EventLog>()
                .push("Normality restored. For now.");
        }
    }
    info!("Global mode is now {}", entered.label());
}

/// Updates the in-memory record and persists it whenever the current score
/// beats it. Persistence failures are logged and otherwise ignored.
fn update_high_score(world: &mut World) {
    let beaten = {
        let mut state = world.resource_mut::<GameState>();
        if state.score > state.high_score {
            state.high_score = state.score;
            Some(state.high_score)
        } else {
            None
        }
    };
    if let Some(score) = beaten {
        world.resource::<HighScoreStore>().save(score);
    }
}
