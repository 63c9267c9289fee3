//! Dot style rendering for QR modules

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How individual QR modules are drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DotStyle {
    /// Full squares (classic QR look)
    #[default]
    Square,
    /// Filled circles
    Dots,
    /// Squares with lightly rounded corners
    Rounded,
    /// Squares with heavily rounded corners
    ExtraRounded,
}

impl DotStyle {
    /// All supported styles, in CLI help order
    pub const ALL: [DotStyle; 4] = [
        DotStyle::Square,
        DotStyle::Dots,
        DotStyle::Rounded,
        DotStyle::ExtraRounded,
    ];

    /// Corner radius in pixels for a module drawn at `scale` pixels
    fn corner_radius(self, scale: u32) -> f32 {
        let scale = scale as f32;
        match self {
            DotStyle::Square => 0.0,
            DotStyle::Dots => scale / 2.0,
            DotStyle::Rounded => scale / 4.0,
            DotStyle::ExtraRounded => scale * 0.45,
        }
    }
}

impl FromStr for DotStyle {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "square" => Ok(Self::Square),
            "dots" => Ok(Self::Dots),
            "rounded" => Ok(Self::Rounded),
            "extra-rounded" => Ok(Self::ExtraRounded),
            other => Err(format!(
                "Unknown dot style '{other}'. Use square, dots, rounded, or extra-rounded"
            )),
        }
    }
}

impl fmt::Display for DotStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Square => write!(f, "square"),
            Self::Dots => write!(f, "dots"),
            Self::Rounded => write!(f, "rounded"),
            Self::ExtraRounded => write!(f, "extra-rounded"),
        }
    }
}

/// Draw one dark module at pixel origin `(px, py)` with side `scale`
///
/// Coordinates are assumed in-bounds; the renderer sizes the canvas before
/// drawing. `Dots` degenerates to a plain square below 3px so tiny symbols
/// do not lose connectivity.
pub(crate) fn draw_module(
    img: &mut RgbaImage,
    px: u32,
    py: u32,
    scale: u32,
    style: DotStyle,
    color: Rgba<u8>,
) {
    let radius = if scale < 3 {
        0.0
    } else {
        style.corner_radius(scale)
    };

    if radius == 0.0 {
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(px + dx, py + dy, color);
            }
        }
        return;
    }

    for dy in 0..scale {
        for dx in 0..scale {
            if inside_rounded_square(dx, dy, scale, radius) {
                img.put_pixel(px + dx, py + dy, color);
            }
        }
    }
}

/// Membership test for a rounded square of side `scale` with corner radius `radius`
///
/// Pixels are sampled at their centers. A radius of `scale / 2` yields a
/// circle, which is how `Dots` reuses this test.
fn inside_rounded_square(dx: u32, dy: u32, scale: u32, radius: f32) -> bool {
    let x = dx as f32 + 0.5;
    let y = dy as f32 + 0.5;
    let side = scale as f32;
    let r = radius.min(side / 2.0);

    // Inside the cross formed by the two inner rectangles
    if (x >= r && x <= side - r) || (y >= r && y <= side - r) {
        return true;
    }

    // Otherwise must fall within one of the corner arcs
    let cx = if x < r { r } else { side - r };
    let cy = if y < r { r } else { side - r };
    let (ddx, ddy) = (x - cx, y - cy);
    ddx * ddx + ddy * ddy <= r * r
}
