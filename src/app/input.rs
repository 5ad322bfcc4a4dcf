use crate::app::state::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            // Raw mode delivers Ctrl+C as a key rather than a signal
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('n') | KeyCode::Char('N') => self.sim.toggle_neurons(),
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.sim.clear_food();
                tracing::info!("Food cleared");
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_time_scale(2.0),
            KeyCode::Char('-') | KeyCode::Char('_') => self.adjust_time_scale(0.5),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if let Some(point) =
                self.scene
                    .screen_to_world(mouse.column, mouse.row, self.last_scene_rect)
            {
                self.sim.add_food(point);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;
    use std::path::PathBuf;
    use wormsim_core::config::AppConfig;

    fn app() -> App {
        let mut config = AppConfig::default();
        config.world.seed = Some(1);
        App::new(config, PathBuf::from("does-not-exist.toml")).unwrap()
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_key(KeyEvent::new(code, modifiers));
    }

    fn click(app: &mut App, column: u16, row: u16) {
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    #[test]
    fn test_quit_keys() {
        for (code, modifiers) in [
            (KeyCode::Char('q'), KeyModifiers::NONE),
            (KeyCode::Esc, KeyModifiers::NONE),
            (KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = app();
            press(&mut app, code, modifiers);
            assert!(!app.running);
        }
    }

    #[test]
    fn test_click_adds_food_and_c_clears() {
        let mut app = app();
        app.last_scene_rect = Rect::new(0, 0, 64, 18);

        click(&mut app, 10, 5);
        click(&mut app, 200, 5);
        assert_eq!(app.sim.food().len(), 1);

        press(&mut app, KeyCode::Char('c'), KeyModifiers::NONE);
        assert!(app.running);
        assert!(app.sim.food().is_empty());
    }

    #[test]
    fn test_toggles() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '), KeyModifiers::NONE);
        assert!(app.paused);
        press(&mut app, KeyCode::Char('n'), KeyModifiers::NONE);
        assert!(!app.sim.neurons_visible());
        press(&mut app, KeyCode::Char('+'), KeyModifiers::NONE);
        assert_eq!(app.time_scale, 2.0);
    }
}
