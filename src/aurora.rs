use std::f32::consts::{FRAC_PI_3, PI};

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::game::{ARENA_HEIGHT, ARENA_WIDTH};

/// One translucent sine band of the background effect.
struct Band {
    amplitude: f32,
    frequency: f32,
    phase: f32,
    speed: f32,
    color: (u8, u8, u8),
    alpha: f32,
}

// Cyan, pink and yellow bands drifting at different speeds.
const BANDS: [Band; 3] = [
    Band {
        amplitude: 80.0,
        frequency: 0.009,
        phase: 0.0,
        speed: 0.004,
        color: (8, 247, 254),
        alpha: 0.09,
    },
    Band {
        amplitude: 60.0,
        frequency: 0.013,
        phase: FRAC_PI_3,
        speed: 0.003,
        color: (247, 9, 107),
        alpha: 0.09,
    },
    Band {
        amplitude: 40.0,
        frequency: 0.017,
        phase: PI,
        speed: 0.002,
        color: (255, 222, 0),
        alpha: 0.09,
    },
];

const BASE_COLOR: (u8, u8, u8) = (5, 5, 12);
// Vertical overlay: dark at the top fading into deep night blue.
const GRADIENT_TOP: (u8, u8, u8) = (34, 34, 34);
const GRADIENT_BOTTOM: (u8, u8, u8) = (30, 60, 114);
const GRADIENT_TOP_ALPHA: f32 = 0.4;
const GRADIENT_BOTTOM_ALPHA: f32 = 0.8;

impl Band {
    /// Upper edge of the band in arena units at column `x`.
    /// Two stacked sines around the arena midline; the band fills everything
    /// below this curve.
    fn surface_y(&self, x: f32, time_ms: f32) -> f32 {
        self.amplitude * (self.frequency * x + self.phase + self.speed * time_ms).sin()
            + ARENA_HEIGHT / 2.0
            + self.amplitude
                * (self.frequency * x / 2.0 + self.phase * 2.0 + self.speed * time_ms / 2.0).sin()
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Alpha-blend `src` over `dst`.
fn blend(dst: (u8, u8, u8), src: (u8, u8, u8), alpha: f32) -> (u8, u8, u8) {
    let mix = |d: u8, s: u8| (d as f32 * (1.0 - alpha) + s as f32 * alpha).round() as u8;
    (mix(dst.0, src.0), mix(dst.1, src.1), mix(dst.2, src.2))
}

/// Animated aurora background for the play area.
///
/// Writes a background color into every cell of its area, so it also resets
/// stale buffer content from previous frames (ratatui alternates two buffers
/// and never clears them between draws).
pub struct Aurora {
    time_ms: f32,
}

impl Aurora {
    pub fn new(time_ms: f32) -> Self {
        Self { time_ms }
    }

    fn cell_color(&self, arena_x: f32, arena_y: f32) -> (u8, u8, u8) {
        let mut rgb = BASE_COLOR;
        for band in &BANDS {
            if arena_y >= band.surface_y(arena_x, self.time_ms) {
                rgb = blend(rgb, band.color, band.alpha);
            }
        }
        let t = (arena_y / ARENA_HEIGHT).clamp(0.0, 1.0);
        let overlay = (
            lerp(GRADIENT_TOP.0 as f32, GRADIENT_BOTTOM.0 as f32, t) as u8,
            lerp(GRADIENT_TOP.1 as f32, GRADIENT_BOTTOM.1 as f32, t) as u8,
            lerp(GRADIENT_TOP.2 as f32, GRADIENT_BOTTOM.2 as f32, t) as u8,
        );
        blend(rgb, overlay, lerp(GRADIENT_TOP_ALPHA, GRADIENT_BOTTOM_ALPHA, t))
    }
}

impl Widget for Aurora {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for col in 0..area.width {
            let arena_x = (col as f32 + 0.5) / area.width as f32 * ARENA_WIDTH;
            for row in 0..area.height {
                let arena_y = (row as f32 + 0.5) / area.height as f32 * ARENA_HEIGHT;
                let (r, g, b) = self.cell_color(arena_x, arena_y);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char(' ');
                    cell.set_bg(Color::Rgb(r, g, b));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_with_zero_alpha_keeps_destination() {
        assert_eq!(blend((10, 20, 30), (200, 200, 200), 0.0), (10, 20, 30));
    }

    #[test]
    fn blend_with_full_alpha_takes_source() {
        assert_eq!(blend((10, 20, 30), (200, 100, 50), 1.0), (200, 100, 50));
    }

    #[test]
    fn band_surface_stays_near_the_midline() {
        for band in &BANDS {
            for step in 0..100 {
                let x = step as f32 * ARENA_WIDTH / 100.0;
                let y = band.surface_y(x, 12_345.0);
                let reach = 2.0 * band.amplitude;
                assert!(
                    (y - ARENA_HEIGHT / 2.0).abs() <= reach,
                    "Band curve escaped its amplitude envelope at x={x}"
                );
            }
        }
    }

    #[test]
    fn render_paints_every_cell() {
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        Aurora::new(500.0).render(area, &mut buf);
        for col in 0..area.width {
            for row in 0..area.height {
                let cell = buf.cell((col, row)).expect("cell in area");
                assert!(
                    matches!(cell.bg, Color::Rgb(_, _, _)),
                    "Cell ({col},{row}) was not painted"
                );
            }
        }
    }
}
