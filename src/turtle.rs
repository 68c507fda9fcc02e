//! Turtle state and operations for pattern interpretation.

use crate::sketch::{ShapeKind, canvas_center};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Lower clamp bound for the turtle scale.
pub const SCALE_MIN: f32 = 1.0 / 64.0;

/// Upper clamp bound for the turtle scale.
pub const SCALE_MAX: f32 = 64.0;

/// Initial heading in degrees. The canvas is y-down, so 270 points up.
pub const HEADING_UP: f32 = 270.0;

/// The state of the drawing turtle.
///
/// Tracks position, heading, and stroke styling for one interpretation pass.
/// A fresh state is created per pass and never shared across calls.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current position on the logical canvas, in pixels.
    pub position: Vec2,

    /// Current heading in degrees, wrapped to `[0, 360)`.
    pub heading: f32,

    /// Current stroke scale. Clamped to `[SCALE_MIN, SCALE_MAX]`.
    pub scale: f32,

    /// Current hue as a fraction of the color wheel, wrapped to `[0, 1)`.
    pub hue: f32,

    /// Shape stamped on each step while in continuous mode.
    ///
    /// This acts as a "pen" for movement: `None` until a drawing op latches
    /// a shape, after which every move stamps it before stepping.
    pub pen: Option<ShapeKind>,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: canvas_center(),
            heading: HEADING_UP,
            scale: 1.0,
            hue: 0.0,
            pen: None,
        }
    }
}

impl TurtleState {
    /// Unit vector along the current heading.
    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.heading.to_radians())
    }

    /// Unit vector 90 degrees clockwise from the heading.
    pub fn strafe(&self) -> Vec2 {
        Vec2::from_angle((self.heading + 90.0).to_radians())
    }

    /// Turns the turtle by `angle` degrees, wrapping to `[0, 360)`.
    pub fn rotate(&mut self, angle: f32) {
        self.heading = (self.heading + angle).rem_euclid(360.0);
    }

    /// Multiplies the scale by `factor`, clamped to `[SCALE_MIN, SCALE_MAX]`.
    pub fn scale_by(&mut self, factor: f32) {
        self.scale = (self.scale * factor).clamp(SCALE_MIN, SCALE_MAX);
    }

    /// Advances the hue by `amount`, wrapping around the color wheel.
    pub fn shift_hue(&mut self, amount: f32) {
        self.hue = (self.hue + amount).rem_euclid(1.0);
    }
}

/// Operations that can be performed by the drawing turtle.
///
/// One instruction per meaningful glyph; produced only by the parser and
/// consumed only by the interpreter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternOp {
    // --- Drawing (The Stamps) ---
    /// Stamp a circle outline (`o`).
    DrawCircle,
    /// Stamp a diagonal cross (`x`).
    DrawX,
    /// Stamp an axis-aligned cross (`+`).
    DrawPlus,
    /// Stamp a vertical line (`|`).
    DrawVLine,
    /// Stamp a horizontal line (`-`).
    DrawHLine,

    // --- Spatial Navigation ---
    /// Step along the heading (`^`).
    MoveForward,
    /// Step against the heading (`v`).
    MoveBackward,
    /// Step to the right of the heading (`>`).
    MoveRight,
    /// Step to the left of the heading (`<`).
    MoveLeft,

    // --- Styling (The Pen) ---
    /// Multiply the scale by the configured step (`!`).
    ScaleUp,
    /// Divide the scale by the configured step (`i`).
    ScaleDown,
    /// Turn clockwise by 15 degrees (`?`).
    Rotate,
    /// Advance the hue by a tenth of the wheel (`*`).
    HueShift,
}
