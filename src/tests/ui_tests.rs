#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::config::Config;
    use crate::ui::{self, centered_rect};
    use ratatui::{backend::TestBackend, layout::Rect, prelude::*};

    fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        Terminal::new(backend).unwrap()
    }

    fn create_test_app() -> App {
        let mut app = App::new(&Config {
            seed: Some(42),
            ..Config::default()
        });
        app.world
            .insert_resource(crate::highscore::HighScoreStore::detached());
        app
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 100);
        let centered = centered_rect(50, 40, area);

        assert_eq!(centered.width, 50);
        assert_eq!(centered.height, 40);
        assert_eq!(centered.x, 25);
        assert_eq!(centered.y, 30);
    }

    #[test]
    fn test_render_idle_screen() {
        let mut terminal = create_test_terminal(80, 30);
        let mut app = create_test_app();

        terminal.draw(|f| ui::render(f, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("ZATRIS"));
        assert!(text.contains("Score:"));
        assert!(text.contains("PRESS S TO START"));
        assert!(text.contains("Mode: NORMAL"));
    }

    #[test]
    fn test_render_running_game() {
        let mut terminal = create_test_terminal(80, 30);
        let mut app = create_test_app();
        app.start();

        terminal.draw(|f| ui::render(f, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(!text.contains("PRESS S TO START"));
        assert!(text.contains("█"));
    }

    #[test]
    fn test_render_pause_overlay() {
        let mut terminal = create_test_terminal(80, 30);
        let mut app = create_test_app();
        app.start();
        app.pause();

        terminal.draw(|f| ui::render(f, &mut app)).unwrap();

        assert!(buffer_text(&terminal).contains("PAUSED"));
    }

    #[test]
    fn test_render_too_small_terminal() {
        let mut terminal = create_test_terminal(40, 20);
        let mut app = create_test_app();

        terminal.draw(|f| ui::render(f, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Terminal too"));
        assert!(!text.contains("ZATRIS"));
    }
}
