//! Compiler that turns a raw pattern string into a flat [`Program`].
//!
//! The entry point is [`parse`] (or [`parse_with_ceiling`] for hosts that
//! want a tighter budget). Lexing keeps only the meaningful glyphs, bracket
//! balance is validated up front, then groups are expanded innermost-first
//! with the instruction ceiling enforced at every append.

use crate::turtle::PatternOp;
use thiserror::Error;

/// Maximum number of instructions a fully expanded [`Program`] may hold.
pub const MAX_INSTRUCTIONS: usize = 1_000_000;

/// A fully expanded instruction sequence, ready for interpretation.
pub type Program = Vec<PatternOp>;

/// Errors produced while compiling a pattern string.
///
/// These are the only failures the crate surfaces; interpretation of a
/// successfully compiled program cannot fail.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `)` with no matching `(`.
    #[error("Unexpected ')'")]
    UnexpectedClose,

    /// A `(` still open at the end of the input.
    #[error("Missing ')'")]
    MissingClose,

    /// Expansion would grow the program past the instruction ceiling.
    #[error("Instruction limit exceeded ({ceiling})")]
    LimitExceeded { ceiling: usize },
}

/// One meaningful glyph surviving the lexical filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Glyph {
    Op(PatternOp),
    Open,
    Close,
    Dot,
    Comma,
}

/// Allow-list mapping from source characters to glyphs.
///
/// Anything outside the map is dropped before the grammar runs, so the
/// parser itself never sees an unknown token.
fn glyph(c: char) -> Option<Glyph> {
    let g = match c {
        'o' => Glyph::Op(PatternOp::DrawCircle),
        'x' => Glyph::Op(PatternOp::DrawX),
        '+' => Glyph::Op(PatternOp::DrawPlus),
        '|' => Glyph::Op(PatternOp::DrawVLine),
        '-' => Glyph::Op(PatternOp::DrawHLine),
        '^' => Glyph::Op(PatternOp::MoveForward),
        'v' => Glyph::Op(PatternOp::MoveBackward),
        '>' => Glyph::Op(PatternOp::MoveRight),
        '<' => Glyph::Op(PatternOp::MoveLeft),
        '!' => Glyph::Op(PatternOp::ScaleUp),
        'i' => Glyph::Op(PatternOp::ScaleDown),
        '?' => Glyph::Op(PatternOp::Rotate),
        '*' => Glyph::Op(PatternOp::HueShift),
        '(' => Glyph::Open,
        ')' => Glyph::Close,
        '.' => Glyph::Dot,
        ',' => Glyph::Comma,
        _ => return None,
    };
    Some(g)
}

fn lex(source: &str) -> Vec<Glyph> {
    source.chars().filter_map(glyph).collect()
}

/// Full balance scan, run before any expansion work.
///
/// Malformed grouping fails here so pathological repeat suffixes inside an
/// unbalanced string never cost expansion time.
fn check_balance(glyphs: &[Glyph]) -> Result<(), ParseError> {
    let mut depth: usize = 0;
    for g in glyphs {
        match g {
            Glyph::Open => depth += 1,
            Glyph::Close => {
                depth = depth.checked_sub(1).ok_or(ParseError::UnexpectedClose)?;
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err(ParseError::MissingClose);
    }
    Ok(())
}

/// Effective repeat count of a group suffix: `(dots + 1) * 5^commas`.
///
/// `None` on overflow; a count that big cannot fit any non-empty group
/// under the ceiling anyway.
fn repeat_count(dots: u64, commas: u32) -> Option<u64> {
    5u64.checked_pow(commas)?.checked_mul(dots + 1)
}

/// Compiles `source` into a flat [`Program`] bounded by [`MAX_INSTRUCTIONS`].
///
/// Characters outside the grammar are ignored. Fails with a bracket error on
/// malformed grouping and with [`ParseError::LimitExceeded`] as soon as the
/// running instruction count would pass the ceiling.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    parse_with_ceiling(source, MAX_INSTRUCTIONS)
}

/// Same grammar as [`parse`] with a caller-chosen instruction ceiling.
///
/// Both compilation work and the resulting program length stay within
/// `ceiling`, so a host can impose a smaller memory/time budget per call.
pub fn parse_with_ceiling(source: &str, ceiling: usize) -> Result<Program, ParseError> {
    let glyphs = lex(source);
    check_balance(&glyphs)?;

    let mut parser = Parser {
        glyphs,
        pos: 0,
        ceiling,
        emitted: 0,
    };
    parser.parse_sequence()
}

struct Parser {
    glyphs: Vec<Glyph>,
    pos: usize,
    /// Instruction ceiling for this compilation.
    ceiling: usize,
    /// Instructions materialized so far, across all nesting levels.
    emitted: usize,
}

impl Parser {
    fn peek(&self) -> Option<Glyph> {
        self.glyphs.get(self.pos).copied()
    }

    /// Parses items until a `)` or the end of input.
    ///
    /// Called once for the top level and recursively per group, which gives
    /// depth-first, innermost-first expansion: a group's suffix multiplies
    /// its already-expanded inner sequence.
    fn parse_sequence(&mut self) -> Result<Vec<PatternOp>, ParseError> {
        let mut seq = Vec::new();

        while let Some(g) = self.peek() {
            match g {
                // The matching `)` of the group being parsed; the caller
                // consumes it. Cannot occur at the top level (balance scan).
                Glyph::Close => break,
                Glyph::Open => {
                    self.pos += 1;
                    let inner = self.parse_sequence()?;
                    self.pos += 1; // the `)` that ended the recursion
                    let (dots, commas) = self.repeat_suffix();
                    self.splice_repeated(&mut seq, inner, dots, commas)?;
                }
                Glyph::Op(op) => {
                    self.pos += 1;
                    self.charge(1)?;
                    seq.push(op);
                }
                // Repeat markers are only meaningful directly after a `)`;
                // anywhere else they are inert.
                Glyph::Dot | Glyph::Comma => self.pos += 1,
            }
        }

        Ok(seq)
    }

    /// Greedily consumes the `.`/`,` run following a closed group.
    fn repeat_suffix(&mut self) -> (u64, u32) {
        let mut dots = 0u64;
        let mut commas = 0u32;
        loop {
            match self.peek() {
                Some(Glyph::Dot) => {
                    dots += 1;
                    self.pos += 1;
                }
                Some(Glyph::Comma) => {
                    commas += 1;
                    self.pos += 1;
                }
                _ => return (dots, commas),
            }
        }
    }

    /// Reserves room for `extra` more instructions under the ceiling.
    fn charge(&mut self, extra: usize) -> Result<(), ParseError> {
        let total = self.emitted.checked_add(extra);
        match total {
            Some(t) if t <= self.ceiling => {
                self.emitted = t;
                Ok(())
            }
            _ => Err(ParseError::LimitExceeded {
                ceiling: self.ceiling,
            }),
        }
    }

    /// Splices `n` copies of an expanded group into `seq`.
    ///
    /// The copy produced while parsing the group is already charged, so only
    /// the `n - 1` duplicates are; the total is checked before any copy is
    /// materialized, which keeps memory bounded by the ceiling even for
    /// `5^c` blow-ups. An empty group expands to nothing in O(1).
    fn splice_repeated(
        &mut self,
        seq: &mut Vec<PatternOp>,
        inner: Vec<PatternOp>,
        dots: u64,
        commas: u32,
    ) -> Result<(), ParseError> {
        if inner.is_empty() {
            return Ok(());
        }

        let n = repeat_count(dots, commas).ok_or(ParseError::LimitExceeded {
            ceiling: self.ceiling,
        })?;
        let duplicates = (n - 1)
            .checked_mul(inner.len() as u64)
            .and_then(|d| usize::try_from(d).ok())
            .ok_or(ParseError::LimitExceeded {
                ceiling: self.ceiling,
            })?;
        self.charge(duplicates)?;

        seq.reserve(inner.len() * n as usize);
        for _ in 1..n {
            seq.extend_from_slice(&inner);
        }
        seq.extend(inner);
        Ok(())
    }
}
