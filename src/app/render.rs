use crate::app::state::App;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;
use wormsim_tui::views::status::StatusWidget;

impl App {
    pub fn draw(&mut self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Scene
                Constraint::Length(2), // Status + legend
            ])
            .split(f.area());

        let block = Block::default().borders(Borders::ALL).title(" wormsim ");
        let scene_rect = block.inner(rows[0]);
        f.render_widget(block, rows[0]);
        self.last_scene_rect = scene_rect;

        let frame = self.sim.frame();
        let scene = self.scene.compose(scene_rect, &frame);
        f.render_widget(scene, scene_rect);

        let state = self.sim.locomotion().state();
        let (left, right) = self
            .last_report
            .map_or((0.0, 0.0), |report| (report.left, report.right));
        let status = StatusWidget {
            tick: self.sim.tick_count(),
            fps: self.fps,
            speed: state.speed,
            heading: state.facing_direction,
            left,
            right,
            food: self.sim.food().len(),
            eaten: self.sim.metrics().food_eaten(),
            time_scale: self.time_scale,
            paused: self.paused,
            food_sensed: self
                .last_report
                .is_some_and(|report| report.contact.sensed),
        };
        f.render_widget(status, rows[1]);
    }
}
