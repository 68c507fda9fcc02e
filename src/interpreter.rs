//! Interpreter that walks a compiled [`Program`](crate::parser::Program) and
//! renders it into a [`Sketch`].
//!
//! The entry point is [`PatternInterpreter`]. Configure it with a
//! [`PatternConfig`], then call [`PatternInterpreter::execute`] with the
//! output of [`parse`](crate::parser::parse).

use crate::sketch::{DrawCommand, ShapeKind, Sketch};
use crate::turtle::{PatternOp, TurtleState};

/// Step length in pixels for a move at scale 1.
const STEP_BASE: f32 = 24.0;
/// Circle radius in pixels at scale 1.
const RADIUS_BASE: f32 = 18.0;
/// Line extent in pixels at scale 1.
const LENGTH_BASE: f32 = 28.0;
/// Stroke width in pixels at scale 1. Floored at 1 after scaling.
const STROKE_BASE: f32 = 2.0;
/// Degrees turned per rotate op.
const ROTATE_STEP: f32 = 15.0;
/// Hue fraction advanced per hue-shift op.
const HUE_STEP: f32 = 0.10;

/// Configuration for pattern interpretation.
#[derive(Clone, Debug)]
pub struct PatternConfig {
    /// When set, drawing ops select a pen instead of stamping, and every
    /// move stamps the selected pen at the pre-move position.
    pub continuous_mode: bool,

    /// Multiplicative factor applied by the scale ops. Default: 2.
    pub scale_step: f32,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            continuous_mode: false,
            scale_step: 2.0,
        }
    }
}

/// Interprets compiled pattern programs to build [`Sketch`]es.
pub struct PatternInterpreter {
    config: PatternConfig,
}

impl PatternInterpreter {
    /// Creates a new interpreter with the given configuration.
    pub fn new(config: PatternConfig) -> Self {
        Self { config }
    }

    /// Walks `program` in order and returns the resulting [`Sketch`].
    ///
    /// Each call starts from a fresh [`TurtleState`] at the canvas center,
    /// heading up, so repeated or concurrent calls never interfere.
    /// Interpretation is total: every instruction has a defined transition,
    /// and an empty program yields an empty sketch.
    ///
    /// # Drawing modes
    ///
    /// In standard mode a drawing op stamps its shape immediately at the
    /// current state. In continuous mode a drawing op only latches the pen;
    /// each subsequent move stamps the latched pen where the turtle stands,
    /// then steps.
    pub fn execute(&self, program: &[PatternOp]) -> Sketch {
        let mut sketch = Sketch::new();
        let mut turtle = TurtleState::default();

        for &op in program {
            match op {
                // --- STYLING ---
                PatternOp::ScaleUp => turtle.scale_by(self.config.scale_step),
                PatternOp::ScaleDown => turtle.scale_by(1.0 / self.config.scale_step),
                PatternOp::Rotate => turtle.rotate(ROTATE_STEP),
                PatternOp::HueShift => turtle.shift_hue(HUE_STEP),

                // --- SPATIAL ---
                PatternOp::MoveForward
                | PatternOp::MoveBackward
                | PatternOp::MoveRight
                | PatternOp::MoveLeft => {
                    if self.config.continuous_mode
                        && let Some(pen) = turtle.pen
                    {
                        sketch.add_command(stamp(&turtle, pen));
                    }

                    let dir = match op {
                        PatternOp::MoveForward => turtle.forward(),
                        PatternOp::MoveBackward => -turtle.forward(),
                        PatternOp::MoveRight => turtle.strafe(),
                        PatternOp::MoveLeft => -turtle.strafe(),
                        _ => unreachable!(),
                    };
                    turtle.position += dir * (STEP_BASE * turtle.scale);
                }

                // --- DRAWING ---
                PatternOp::DrawCircle
                | PatternOp::DrawX
                | PatternOp::DrawPlus
                | PatternOp::DrawVLine
                | PatternOp::DrawHLine => {
                    let shape = match op {
                        PatternOp::DrawCircle => ShapeKind::Circle,
                        PatternOp::DrawX => ShapeKind::X,
                        PatternOp::DrawPlus => ShapeKind::Plus,
                        PatternOp::DrawVLine => ShapeKind::VLine,
                        PatternOp::DrawHLine => ShapeKind::HLine,
                        _ => unreachable!(),
                    };

                    if self.config.continuous_mode {
                        turtle.pen = Some(shape);
                    } else {
                        sketch.add_command(stamp(&turtle, shape));
                    }
                }
            }
        }

        sketch
    }
}

/// Resolves a self-contained stamp from the current turtle state.
fn stamp(turtle: &TurtleState, shape: ShapeKind) -> DrawCommand {
    let s = turtle.scale;
    DrawCommand {
        shape,
        position: turtle.position,
        rotation: turtle.heading,
        scale: s,
        hue: turtle.hue,
        stroke_width: (STROKE_BASE * s).max(1.0),
        radius: RADIUS_BASE * s,
        length: LENGTH_BASE * s,
        color: format!(
            "hsla({}, 80%, 60%, 0.7)",
            (turtle.hue * 360.0).round() as i32
        ),
    }
}
