use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

/// One-line readout under the scene plus a key legend.
#[derive(Debug, Clone, Default)]
pub struct StatusWidget {
    pub tick: u64,
    pub fps: f64,
    pub speed: f64,
    pub heading: f64,
    pub left: f64,
    pub right: f64,
    pub food: usize,
    pub eaten: u64,
    pub time_scale: f64,
    pub paused: bool,
    pub food_sensed: bool,
}

impl StatusWidget {
    fn readout(&self) -> Line<'static> {
        let label = Style::default().add_modifier(Modifier::BOLD);
        let state = if self.paused {
            Span::styled(" PAUSED ", Style::default().fg(Color::Black).bg(Color::Yellow))
        } else {
            Span::styled(
                format!(" x{:.2} ", self.time_scale),
                Style::default().fg(Color::Cyan),
            )
        };
        let food_style = if self.food_sensed {
            Style::default().fg(Color::Rgb(251, 192, 45))
        } else {
            Style::default()
        };

        Line::from(vec![
            state,
            Span::styled("Tick: ", label),
            Span::raw(format!("{} ", self.tick)),
            Span::styled("FPS: ", label),
            Span::raw(format!("{:.0} ", self.fps)),
            Span::styled("Speed: ", label),
            Span::raw(format!("{:.2} ", self.speed)),
            Span::styled("Heading: ", label),
            Span::raw(format!("{:+.2} ", self.heading)),
            Span::styled("L/R: ", label),
            Span::raw(format!("{:.0}/{:.0} ", self.left, self.right)),
            Span::styled("Food: ", label),
            Span::styled(format!("{} ", self.food), food_style),
            Span::styled("Eaten: ", label),
            Span::raw(self.eaten.to_string()),
        ])
    }
}

impl Widget for StatusWidget {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        Paragraph::new(self.readout()).render(rows[0], buf);

        let legend = " [Click] Food | [Space] Pause | [N] Neurons | [C] Clear | [+/-] Speed | [Q] Quit";
        Paragraph::new(legend)
            .style(Style::default().fg(Color::DarkGray))
            .render(rows[1], buf);
    }
}
