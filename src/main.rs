#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

use zatris::Time;
use zatris::app::{App, AppResult};
use zatris::components::{Action, RunState, invert_action};
use zatris::config::Config;
use zatris::modes::{ControlMode, ModeController};
use zatris::{systems, ui};

fn main() -> AppResult<()> {
    // Create log file and redirect stderr to it so panics and log lines end
    // up somewhere readable instead of corrupting the TUI.
    let log_path = "zatris.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .expect("Failed to create log file");

    let stderr_handle = std::io::stderr();
    let stderr_fd = stderr_handle.as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: We're redirecting stderr to our log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting zatris");

    let config = Config::load();

    // Terminal initialization. A failure here is fatal: without a rendering
    // surface there is nothing to partially initialize.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let render_rate = Duration::from_millis(33); // ~30 FPS
    let game_tick_rate = Duration::from_millis(50);

    let app = App::new(&config);
    let res = run_app(&mut terminal, app, render_rate, game_tick_rate);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    render_rate: Duration,
    game_tick_rate: Duration,
) -> AppResult<()> {
    let mut last_render = Instant::now();
    let mut last_game_tick = Instant::now();

    // Flush any pending input events that might be in the buffer.
    while crossterm::event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    loop {
        // Automatic drop is evaluated before the frame is painted.
        if last_game_tick.elapsed() >= game_tick_rate {
            last_game_tick = Instant::now();

            // The clock advances even while paused so that a resume does not
            // see the whole pause as one giant delta.
            let delta_ms = {
                let mut time = app.world.resource_mut::<Time>();
                time.update();
                time.delta_ms()
            };

            systems::game_tick_system(&mut app.world, delta_ms);
            systems::mode_tick_system(&mut app.world, delta_ms);
        }

        if last_render.elapsed() >= render_rate {
            terminal.draw(|f| ui::render(f, &mut app))?;
            last_render = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }

        // Input is dispatched synchronously as soon as it is observed.
        if crossterm::event::poll(Duration::from_millis(5))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }
                debug!("Key event: {key:?}");

                match key.code {
                    KeyCode::Char('q') => {
                        app.should_quit = true;
                        continue;
                    }
                    KeyCode::Char('s') => {
                        app.start();
                        continue;
                    }
                    KeyCode::Char('p') => {
                        app.toggle_pause();
                        continue;
                    }
                    _ => {}
                }

                if app.run_state() != RunState::Running {
                    continue;
                }

                if let Some(mut action) = raw_action(key.code) {
                    // The inverted-controls quirk remaps the logical action
                    // exactly once, before dispatch.
                    let inverted = app
                        .world
                        .resource::<ModeController>()
                        .control_active(ControlMode::Inverted);
                    if inverted {
                        action = invert_action(action);
                    }
                    systems::apply_action(&mut app.world, action);
                }
            }
        }
    }
}

/// Raw key-to-action mapping, before any quirk gets its hands on it.
fn raw_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Left | KeyCode::Char('a') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') => Some(Action::MoveRight),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SoftDrop),
        KeyCode::Up | KeyCode::Char('w') => Some(Action::Rotate),
        KeyCode::Char(' ') => Some(Action::HardDrop),
        _ => None,
    }
}
