#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::components::{Action, Board, GameState, Piece, RunState};
    use crate::config::Config;
    use crate::game::{BASE_DROP_INTERVAL_MS, MIN_DROP_INTERVAL_MS, level_for_lines};
    use crate::modes::{ControlMode, GlobalMode, ModeController};
    use crate::systems::{apply_action, game_tick_system, mode_tick_system};

    fn create_test_app(normal_mode_secs: u64) -> App {
        let config = Config {
            normal_mode_secs,
            seed: Some(7),
        };
        let mut app = App::new(&config);
        app.world
            .insert_resource(crate::highscore::HighScoreStore::detached());
        app
    }

    fn assert_invariants(app: &mut App) {
        let state = app.world.resource::<GameState>();
        assert_eq!(state.level, level_for_lines(state.lines));
        assert!(state.drop_interval_ms >= MIN_DROP_INTERVAL_MS);
        assert!(state.drop_interval_ms <= BASE_DROP_INTERVAL_MS);
        assert!(state.high_score >= state.score.min(state.high_score));

        let board = app.world.resource::<Board>();
        assert!(board.cells.iter().flatten().all(|&c| c <= 7));

        let running = state.run_state == RunState::Running;
        let mut query = app.world.query::<&Piece>();
        let pieces = query.iter(&app.world).count();
        if running {
            assert_eq!(pieces, 1);
        }
    }

    #[test]
    fn test_simulated_session_stays_consistent() {
        let mut app = create_test_app(8);
        app.start();

        for i in 0..400 {
            game_tick_system(&mut app.world, 50.0);
            mode_tick_system(&mut app.world, 50.0);
            match i % 7 {
                0 => apply_action(&mut app.world, Action::MoveLeft),
                3 => apply_action(&mut app.world, Action::MoveRight),
                5 => apply_action(&mut app.world, Action::Rotate),
                _ => {}
            }
            assert_invariants(&mut app);
        }
    }

    #[test]
    fn test_mode_alternation_over_time() {
        let mut app = create_test_app(1);
        app.start();

        // 1s of normal mode, stepped in 50ms ticks.
        for _ in 0..25 {
            mode_tick_system(&mut app.world, 50.0);
        }
        assert!(app.world.resource::<ModeController>().is_chaotic());
        assert_ne!(
            app.world.resource::<ModeController>().control,
            ControlMode::None
        );

        // The chaotic stretch runs for twice as long before flipping back.
        for _ in 0..40 {
            mode_tick_system(&mut app.world, 50.0);
        }
        let modes = app.world.resource::<ModeController>();
        assert_eq!(modes.global, GlobalMode::Normal);
        assert_eq!(modes.control, ControlMode::None);
    }

    #[test]
    fn test_pause_discards_mode_progress() {
        let mut app = create_test_app(1);
        app.start();

        for _ in 0..15 {
            mode_tick_system(&mut app.world, 50.0);
        }
        app.pause();
        // Nothing advances while paused.
        mode_tick_system(&mut app.world, 10_000.0);
        game_tick_system(&mut app.world, 10_000.0);
        assert!(!app.world.resource::<ModeController>().is_chaotic());

        app.resume();
        for _ in 0..15 {
            mode_tick_system(&mut app.world, 50.0);
        }
        // 750ms before the pause plus 750ms after would have flipped; the
        // resume started a fresh interval instead.
        assert!(!app.world.resource::<ModeController>().is_chaotic());
    }

    #[test]
    fn test_stacking_to_the_top_ends_the_game() {
        let mut app = create_test_app(8);
        app.start();

        // Hard-drop every piece in place; the center column fills up and
        // the spawn eventually has nowhere to go.
        for _ in 0..200 {
            if app.run_state() != RunState::Running {
                break;
            }
            apply_action(&mut app.world, Action::HardDrop);
        }

        assert_eq!(app.run_state(), RunState::GameOver);
        assert!(!app.world.resource::<ModeController>().is_armed());

        let state = app.world.resource::<GameState>();
        assert!(state.score > 0);
        assert!(state.high_score >= state.score);

        // An explicit restart revives the game with a clean slate.
        app.start();
        assert_eq!(app.run_state(), RunState::Running);
        assert_eq!(app.world.resource::<GameState>().score, 0);
        assert!(
            app.world
                .resource::<Board>()
                .cells
                .iter()
                .flatten()
                .all(|&c| c == 0)
        );
    }
}
