use crate::framebuffer::{Framebuffer, Viewport};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;
use wormsim_core::simulation::Frame;
use wormsim_data::{Overlay, Point, Rgba};

const CANVAS_COLOR: Rgba = Rgba::BLACK;
const LETTERBOX_COLOR: Rgba = Rgba::rgb(24, 24, 24);
const UPPER_HALF: &str = "▀";

/// Composites frames for a terminal area.
///
/// The connectivity layer only changes on resize or restyle, so it is
/// rasterized into a cached background and each frame starts from a copy.
pub struct SceneRenderer {
    world_width: f64,
    world_height: f64,
    viewport: Viewport,
    background: Framebuffer,
    canvas: Framebuffer,
    cached_connectome: Option<Overlay>,
    background_valid: bool,
}

impl SceneRenderer {
    #[must_use]
    pub fn new(world_width: f64, world_height: f64) -> Self {
        let viewport = Viewport::fit(0, 0, world_width, world_height);
        Self {
            world_width,
            world_height,
            viewport,
            background: Framebuffer::new(0, 0, CANVAS_COLOR),
            canvas: Framebuffer::new(0, 0, CANVAS_COLOR),
            cached_connectome: None,
            background_valid: false,
        }
    }

    /// Viewport for a cell area: one column per pixel, two pixels per row.
    #[must_use]
    pub fn viewport_for(&self, area: Rect) -> Viewport {
        Viewport::fit(
            usize::from(area.width),
            usize::from(area.height) * 2,
            self.world_width,
            self.world_height,
        )
    }

    /// Rasterizes `frame` for `area` and returns the widget that draws it.
    pub fn compose(&mut self, area: Rect, frame: &Frame<'_>) -> SceneWidget<'_> {
        let viewport = self.viewport_for(area);
        if viewport != self.viewport {
            self.viewport = viewport;
            self.background_valid = false;
        }
        if frame.connectome != self.cached_connectome.as_ref() {
            self.cached_connectome = frame.connectome.cloned();
            self.background_valid = false;
        }

        if !self.background_valid {
            self.background = Framebuffer::for_viewport(&viewport, CANVAS_COLOR, LETTERBOX_COLOR);
            if let Some(connectome) = &self.cached_connectome {
                self.background.draw_overlay(connectome, &viewport);
            }
            self.background_valid = true;
        }

        self.canvas.copy_from(&self.background);
        for layer in [&frame.activity, &frame.food, &frame.body] {
            self.canvas.draw_overlay(layer, &viewport);
        }

        SceneWidget {
            canvas: &self.canvas,
        }
    }

    /// Canvas point under terminal cell `(column, row)` of `area`.
    #[must_use]
    pub fn screen_to_world(&self, column: u16, row: u16, area: Rect) -> Option<Point> {
        if column < area.x
            || row < area.y
            || column >= area.x + area.width
            || row >= area.y + area.height
        {
            return None;
        }
        let viewport = self.viewport_for(area);
        let px = usize::from(column - area.x);
        // The lower pixel of the cell sits closest to its visual center.
        let py = usize::from(row - area.y) * 2 + 1;
        viewport.to_world(px, py)
    }
}

/// Paints a framebuffer with upper-half blocks: foreground is the top pixel,
/// background the bottom one.
pub struct SceneWidget<'a> {
    canvas: &'a Framebuffer,
}

impl<'a> SceneWidget<'a> {
    #[must_use]
    pub fn new(canvas: &'a Framebuffer) -> Self {
        Self { canvas }
    }
}

impl Widget for SceneWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for column in 0..area.width {
                let px = usize::from(column);
                let py = usize::from(row) * 2;
                let (Some(top), Some(bottom)) =
                    (self.canvas.get(px, py), self.canvas.get(px, py + 1))
                else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + column, area.y + row)) {
                    cell.set_symbol(UPPER_HALF)
                        .set_fg(to_color(top))
                        .set_bg(to_color(bottom));
                }
            }
        }
    }
}

fn to_color(c: Rgba) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}
