//! Drawing commands handed to the host renderer.
//!
//! The simulation never touches a drawing surface. Each frame,
//! [`emit`] turns the current state into an ordered list of
//! [`DrawCommand`]s; the host paints them in order.

use std::fmt;

use glam::DVec2;
use serde::Serialize;

use crate::{particle::Particle, types::ConnectivityPair};

const BACKGROUND_FADE: Color = Color::rgba(0, 0, 0, 0.1);
const LINK_COLOR: Color = Color::rgba(255, 255, 255, 0.1);
const LINK_WIDTH: f64 = 0.5;
const OVERLAY_BACKING: Color = Color::rgba(0, 0, 0, 0.7);
const OVERLAY_TEXT: Color = Color::rgba(255, 255, 255, 0.95);
const OVERLAY_FONT: &str = "14px monospace";
const PARTICLE_SATURATION: f64 = 100.0;
const PARTICLE_LIGHTNESS: f64 = 60.0;

/// A fill or stroke colour.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Color {
    /// Hue in degrees, saturation and lightness in percent.
    Hsl { h: f64, s: f64, l: f64 },
    /// 8-bit channels with alpha in `[0, 1]`.
    Rgba { r: u8, g: u8, b: u8, a: f64 },
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self::Rgba { r, g, b, a }
    }

    pub const fn hsl(h: f64, s: f64, l: f64) -> Self {
        Self::Hsl { h, s, l }
    }

    /// Converts to straight (non-premultiplied) 8-bit RGBA.
    pub fn to_rgba8(self) -> [u8; 4] {
        match self {
            Color::Rgba { r, g, b, a } => [r, g, b, unit_to_u8(a)],
            Color::Hsl { h, s, l } => {
                let (r, g, b) = hsl_to_rgb(h, s / 100.0, l / 100.0);
                [unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), 255]
            }
        }
    }
}

/// CSS colour syntax, e.g. `hsl(120, 100%, 60%)` or `rgba(0, 0, 0, 0.1)`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Hsl { h, s, l } => write!(f, "hsl({h:.0}, {s:.0}%, {l:.0}%)"),
            Color::Rgba { r, g, b, a } => write!(f, "rgba({r}, {g}, {b}, {a})"),
        }
    }
}

fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// `h` in degrees, `s` and `l` in `[0, 1]`; returns channels in `[0, 1]`.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    (r + m, g + m, b + m)
}

/// One drawing primitive, in simulation coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Color,
    },
    Circle {
        center: DVec2,
        radius: f64,
        color: Color,
    },
    Line {
        from: DVec2,
        to: DVec2,
        color: Color,
        width: f64,
    },
    Text {
        pos: DVec2,
        text: String,
        color: Color,
        font: &'static str,
    },
}

/// Builds the draw list for one frame.
///
/// Order:
/// 1. A translucent full-surface rectangle that fades the previous frame
///    into a trail.
/// 2. One filled circle per particle, coloured from its hue.
/// 3. One line per connectivity pair.
/// 4. The stats overlay (backing rectangle, FPS, particle count), last so
///    nothing covers it.
///
/// ### Parameters
/// - `particles` - Current particles; their count is shown in the overlay.
/// - `pairs` - Indices into `particles`. Pairs referring past the end are
///   skipped.
/// - `displayed_fps` - The throttled FPS snapshot.
/// - `bounds` - Size of the drawing surface.
pub fn emit(
    particles: &[Particle],
    pairs: &[ConnectivityPair],
    displayed_fps: i32,
    bounds: DVec2,
) -> Vec<DrawCommand> {
    let mut cmds = Vec::with_capacity(particles.len() + pairs.len() + 4);

    cmds.push(DrawCommand::FillRect {
        x: 0.0,
        y: 0.0,
        w: bounds.x,
        h: bounds.y,
        color: BACKGROUND_FADE,
    });

    cmds.extend(particles.iter().map(|p| DrawCommand::Circle {
        center: p.pos,
        radius: p.radius,
        color: Color::hsl(p.hue, PARTICLE_SATURATION, PARTICLE_LIGHTNESS),
    }));

    cmds.extend(pairs.iter().filter_map(|&(i, j)| {
        let (a, b) = (particles.get(i)?, particles.get(j)?);
        Some(DrawCommand::Line {
            from: a.pos,
            to: b.pos,
            color: LINK_COLOR,
            width: LINK_WIDTH,
        })
    }));

    cmds.push(DrawCommand::FillRect {
        x: 5.0,
        y: 5.0,
        w: 120.0,
        h: 50.0,
        color: OVERLAY_BACKING,
    });
    cmds.push(DrawCommand::Text {
        pos: DVec2::new(10.0, 20.0),
        text: format!("FPS: {displayed_fps}"),
        color: OVERLAY_TEXT,
        font: OVERLAY_FONT,
    });
    cmds.push(DrawCommand::Text {
        pos: DVec2::new(10.0, 40.0),
        text: format!("Particles: {}", particles.len()),
        color: OVERLAY_TEXT,
        font: OVERLAY_FONT,
    });

    cmds
}
