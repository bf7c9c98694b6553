use crate::app::App;
use crate::components::{EventLog, GameState, RunState, color_for_id};
use crate::game::{BOARD_COLS, BOARD_ROWS};
use crate::modes::{ControlMode, GlobalMode, ModeController};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Mostly-unhappy faces rotated by level and lines.
const MOODS: [&str; 5] = ["😑", "😠", "🤢", "😵", "🤯"];

pub fn render(f: &mut Frame, app: &mut App) {
    // Each cell is 2 characters wide and 1 tall.
    let cell_width = 2;
    let board_width = BOARD_COLS as u16 * cell_width + 2; // +2 for borders
    let board_height = BOARD_ROWS as u16 + 2;
    let min_info_width = 26u16;
    let min_total_width = board_width + min_info_width;
    let min_total_height = board_height + 3;

    if f.area().width < min_total_width || f.area().height < min_total_height {
        let warning = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("zatris"));
        let warning_area = centered_rect(50, 30, f.area());
        f.render_widget(warning, warning_area);
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(board_width),
            Constraint::Min(min_info_width),
        ])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(board_height),
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Title
            Constraint::Length(7),             // Score block
            Constraint::Length(4),             // Mode block
            Constraint::Min(6),                // Event log
            Constraint::Length(8),             // Controls
        ])
        .split(main_layout[1]);

    let title = Paragraph::new("ZATRIS")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    render_board(f, app, game_layout[1]);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    render_stats(f, app, info_layout[1]);
    render_mode(f, app, info_layout[2]);
    render_event_log(f, app, info_layout[3]);

    let controls = Paragraph::new(
        "Controls:\n\
        ←/→: Move left/right\n\
        ↓: Soft drop\n\
        ↑: Rotate\n\
        Space: Hard drop\n\
        S: Start  P: Pause\n\
        Q: Quit\n\
        ",
    )
    .block(Block::default().borders(Borders::TOP))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, info_layout[4]);
}

fn render_stats(f: &mut Frame, app: &mut App, area: Rect) {
    let state = app.world.resource::<GameState>();
    let modes = app.world.resource::<ModeController>();

    let mood = if modes.is_chaotic() && modes.control != ControlMode::None {
        "🙃"
    } else {
        MOODS[((state.level + state.lines) % MOODS.len() as u32) as usize]
    };

    let stats = format!(
        "Score: {}\nLines: {}\nLevel: {}\nBest:  {}\nMood:  {}",
        state.score, state.lines, state.level, state.high_score, mood,
    );
    let stats = Paragraph::new(stats)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true });
    f.render_widget(stats, area);
}

fn render_mode(f: &mut Frame, app: &mut App, area: Rect) {
    let modes = app.world.resource::<ModeController>();

    let mode_color = match modes.global {
        GlobalMode::Normal => Color::Green,
        GlobalMode::Chaotic => Color::LightRed,
    };
    let quirk = if modes.is_chaotic() && modes.control != ControlMode::None {
        format!("Quirk: {}", modes.control.label())
    } else {
        String::new()
    };

    let mode = Paragraph::new(format!("Mode: {}\n{}", modes.global.label(), quirk))
        .style(Style::default().fg(mode_color))
        .block(Block::default().borders(Borders::TOP))
        .wrap(Wrap { trim: true });
    f.render_widget(mode, area);
}

fn render_event_log(f: &mut Frame, app: &mut App, area: Rect) {
    let log = app.world.resource::<EventLog>();
    let text = log.entries().collect::<Vec<_>>().join("\n");
    let events = Paragraph::new(text)
        .block(Block::default().borders(Borders::TOP).title("Events"))
        .wrap(Wrap { trim: true });
    f.render_widget(events, area);
}

fn render_board(f: &mut Frame, app: &mut App, area: Rect) {
    let cell_width = 2;
    let inner_area = Block::default().borders(Borders::ALL).inner(area);
    f.render_widget(Block::default().borders(Borders::ALL), area);

    for (position, id) in app.render_cells() {
        let x = position.x as u16;
        let y = position.y as u16;
        if x < BOARD_COLS as u16 && y < BOARD_ROWS as u16 {
            let block_x = inner_area.left() + x * cell_width;
            let block_y = inner_area.top() + y;

            if block_x < inner_area.right() && block_y < inner_area.bottom() {
                let color = color_for_id(id);
                for dx in 0..cell_width {
                    if let Some(cell) = f.buffer_mut().cell_mut((block_x + dx, block_y)) {
                        cell.set_symbol("█");
                        cell.set_fg(color);
                        cell.set_bg(Color::Black);
                    }
                }
            }
        }
    }

    let overlay = match app.run_state() {
        RunState::Idle => Some(("PRESS S TO START", Color::White)),
        RunState::Paused => Some(("PAUSED", Color::Yellow)),
        RunState::GameOver => Some(("GAME OVER", Color::Red)),
        RunState::Running => None,
    };
    if let Some((text, color)) = overlay {
        let width = text.len() as u16;
        let overlay_area = Rect {
            x: inner_area.x + inner_area.width.saturating_sub(width) / 2,
            y: inner_area.y + inner_area.height / 2,
            width: width.min(inner_area.width),
            height: 1,
        };
        let overlay = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        f.render_widget(overlay, overlay_area);
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
