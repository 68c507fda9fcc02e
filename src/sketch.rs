use bevy_math::primitives::{Circle, Segment2d};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Side length of the logical square canvas, in pixels.
///
/// Renderers map this space onto their own surface; the origin is the
/// top-left corner and y grows downward.
pub const CANVAS_SIZE: f32 = 1000.0;

/// Center of the logical canvas, where every interpretation pass starts.
pub fn canvas_center() -> Vec2 {
    Vec2::splat(CANVAS_SIZE / 2.0)
}

/// The complete, renderer-agnostic description of one drawn picture.
///
/// This structure represents the "picture" generated from a pattern string.
/// It contains the resolved stamps in draw order; a renderer strokes each
/// one exactly once, in list order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Sketch {
    /// Resolved stamps, in the order they must be drawn.
    pub commands: Vec<DrawCommand>,
}

impl Sketch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

/// Shapes a drawing instruction can stamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Circle outline (`o`).
    Circle,
    /// Diagonal cross (`x`).
    X,
    /// Axis-aligned cross (`+`).
    Plus,
    /// Vertical line (`|`).
    VLine,
    /// Horizontal line (`-`).
    HLine,
}

/// A single resolved stamp.
///
/// Snapshot of everything a renderer needs to stroke one shape: translate to
/// `position`, rotate by `rotation`, stroke in `color` at `stroke_width`.
/// Fully self-contained; it stays valid however the turtle state changes
/// after it was emitted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrawCommand {
    /// Which shape to stroke.
    pub shape: ShapeKind,

    /// Center of the stamp on the logical canvas.
    pub position: Vec2,

    /// Rotation in degrees, inherited from the turtle heading.
    pub rotation: f32,

    /// Stroke scale at stamp time.
    pub scale: f32,

    /// Hue at stamp time, as a fraction of the color wheel in `[0, 1)`.
    pub hue: f32,

    /// Stroke width in pixels, never below 1.
    pub stroke_width: f32,

    /// Circle radius in pixels, already scaled.
    pub radius: f32,

    /// Line extent in pixels, already scaled. Per-shape meaning is resolved
    /// by [`DrawCommand::outline`].
    pub length: f32,

    /// Resolved CSS color string (`hsla(...)`).
    pub color: String,
}

/// Local-space outline of a stamp, centered at the origin.
///
/// Wraps `bevy_math` primitives so renderers can consume resolved geometry
/// directly instead of re-deriving it from `radius`/`length`.
#[derive(Clone, Debug)]
pub enum ShapeOutline {
    /// A circle outline.
    Circle(Circle),
    /// One stroked segment per entry.
    Segments(Vec<Segment2d>),
}

impl DrawCommand {
    /// Resolves the local-space outline for this stamp, before translation to
    /// [`position`](Self::position) and rotation by [`rotation`](Self::rotation).
    ///
    /// `X` treats [`length`](Self::length) as the half-extent of each diagonal;
    /// the axis-aligned shapes span `length` symmetrically about the center.
    pub fn outline(&self) -> ShapeOutline {
        match self.shape {
            ShapeKind::Circle => ShapeOutline::Circle(Circle::new(self.radius)),
            ShapeKind::X => {
                let e = self.length;
                ShapeOutline::Segments(vec![
                    Segment2d::new(Vec2::new(-e, -e), Vec2::new(e, e)),
                    Segment2d::new(Vec2::new(e, -e), Vec2::new(-e, e)),
                ])
            }
            ShapeKind::Plus => {
                let h = self.length / 2.0;
                ShapeOutline::Segments(vec![
                    Segment2d::new(Vec2::new(-h, 0.0), Vec2::new(h, 0.0)),
                    Segment2d::new(Vec2::new(0.0, -h), Vec2::new(0.0, h)),
                ])
            }
            ShapeKind::VLine => {
                let h = self.length / 2.0;
                ShapeOutline::Segments(vec![Segment2d::new(
                    Vec2::new(0.0, -h),
                    Vec2::new(0.0, h),
                )])
            }
            ShapeKind::HLine => {
                let h = self.length / 2.0;
                ShapeOutline::Segments(vec![Segment2d::new(
                    Vec2::new(-h, 0.0),
                    Vec2::new(h, 0.0),
                )])
            }
        }
    }
}
