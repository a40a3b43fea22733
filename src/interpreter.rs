//! Interpreter that converts an expanded command string into a [`Drawing`].
//!
//! The entry point is [`TurtleInterpreter`]. Configure it with a [`TurtleConfig`],
//! register symbol-to-operation mappings via [`TurtleInterpreter::set_op`] or
//! [`TurtleInterpreter::populate_standard_symbols`], then call
//! [`TurtleInterpreter::interpret`] with the output of [`crate::expand`].

use crate::error::{Error, Result};
use crate::primitive::{DrawPrimitive, Drawing};
use crate::turtle::{TurtleOp, TurtleState};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for turtle interpretation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurtleConfig {
    /// Length of a single `F` step. Must be positive.
    pub step_length: f32,
    /// Rotation applied by `+`/`-`, in degrees.
    pub turn_angle: f32,
    /// Starting position of the turtle.
    pub origin: Vec3,
    /// Starting orientation of the turtle. The heading is `orientation * Y`.
    pub orientation: Quat,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            step_length: 1.0,
            turn_angle: 25.0,
            origin: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl TurtleConfig {
    /// Rejects parameters the interpreter cannot draw with.
    pub fn validate(&self) -> Result<()> {
        if !(self.step_length.is_finite() && self.step_length > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "step_length must be positive and finite, got {}",
                self.step_length
            )));
        }
        if !self.turn_angle.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "turn_angle must be finite, got {}",
                self.turn_angle
            )));
        }
        if !self.origin.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "origin must be finite, got {}",
                self.origin
            )));
        }
        if !self.orientation.is_finite() || self.orientation.length_squared() == 0.0 {
            return Err(Error::InvalidConfig(format!(
                "orientation must be a finite non-zero quaternion, got {}",
                self.orientation
            )));
        }
        Ok(())
    }

    fn start_state(&self) -> TurtleState {
        TurtleState::new(self.origin, self.orientation.normalize())
    }
}

/// Interprets L-System output to build a [`Drawing`].
#[derive(Clone, Debug)]
pub struct TurtleInterpreter {
    op_map: HashMap<char, TurtleOp>,
    config: TurtleConfig,
}

impl Default for TurtleInterpreter {
    fn default() -> Self {
        Self::standard(TurtleConfig::default())
    }
}

impl TurtleInterpreter {
    /// Creates a new interpreter with the given configuration and an empty symbol map.
    ///
    /// Register operations with [`set_op`](Self::set_op) or
    /// [`populate_standard_symbols`](Self::populate_standard_symbols) before calling
    /// [`interpret`](Self::interpret).
    pub fn new(config: TurtleConfig) -> Self {
        Self {
            op_map: HashMap::new(),
            config,
        }
    }

    /// Creates an interpreter with the standard symbol table already registered.
    pub fn standard(config: TurtleConfig) -> Self {
        let mut interpreter = Self::new(config);
        interpreter.populate_standard_symbols();
        interpreter
    }

    /// Replaces the entire symbol-to-operation map in one step (builder pattern).
    ///
    /// Any symbol missing from `map` is treated as [`TurtleOp::Ignore`].
    pub fn with_map(mut self, map: HashMap<char, TurtleOp>) -> Self {
        self.op_map = map;
        self
    }

    /// Assigns a single [`TurtleOp`] to a symbol.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.op_map.insert(symbol, op);
    }

    pub fn op(&self, symbol: char) -> TurtleOp {
        self.op_map.get(&symbol).copied().unwrap_or(TurtleOp::Ignore)
    }

    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    /// Registers the standard symbol table:
    ///
    /// | Symbol | Operation |
    /// |---|---|
    /// | `F` | [`TurtleOp::Draw`] |
    /// | `L` | [`TurtleOp::Leaf`] |
    /// | `+` | [`TurtleOp::Turn`]`(-1.0)` |
    /// | `-` | [`TurtleOp::Turn`]`(1.0)` |
    /// | `[` | [`TurtleOp::Push`] |
    /// | `]` | [`TurtleOp::Pop`] |
    pub fn populate_standard_symbols(&mut self) {
        let mappings = [
            ('F', TurtleOp::Draw),
            ('L', TurtleOp::Leaf),
            ('+', TurtleOp::Turn(-1.0)),
            ('-', TurtleOp::Turn(1.0)),
            ('[', TurtleOp::Push),
            (']', TurtleOp::Pop),
        ];

        for (symbol, op) in mappings {
            self.set_op(symbol, op);
        }
    }

    /// Interprets `commands` left to right and returns the resulting [`Drawing`].
    ///
    /// The turtle starts at the configured origin and orientation with an empty stack.
    /// Symbols with no registered mapping are ignored.
    ///
    /// # Push / Pop
    ///
    /// `[` saves position and orientation as one record; `]` restores the most recent one.
    /// Records still on the stack when the string ends are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] before reading any symbol if the configuration
    /// fails [`TurtleConfig::validate`], and [`Error::UnmatchedPop`] as soon as `]` is
    /// reached with an empty stack. Nothing drawn before that point is returned.
    pub fn interpret(&self, commands: &str) -> Result<Drawing> {
        self.config.validate()?;

        let mut drawing = Drawing::new();
        let mut turtle = self.config.start_state();
        let mut stack: Vec<TurtleState> = Vec::new();
        let angle = self.config.turn_angle.to_radians();

        for (index, symbol) in commands.char_indices() {
            match self.op(symbol) {
                TurtleOp::Draw => {
                    let start = turtle.position;
                    let end = turtle.advance(self.config.step_length);
                    drawing.push(DrawPrimitive::Segment { start, end });
                }
                TurtleOp::Move => {
                    turtle.advance(self.config.step_length);
                }
                TurtleOp::Leaf => drawing.push(DrawPrimitive::Marker {
                    point: turtle.position,
                    orientation: turtle.rotation,
                }),
                TurtleOp::Turn(s) => turtle.rotate_local_z(angle * s),
                TurtleOp::Push => stack.push(turtle),
                TurtleOp::Pop => match stack.pop() {
                    Some(saved) => turtle = saved,
                    None => {
                        tracing::warn!(
                            index,
                            emitted = drawing.len(),
                            "unmatched ']' in command string"
                        );
                        return Err(Error::UnmatchedPop {
                            index,
                            emitted: drawing.len(),
                        });
                    }
                },
                TurtleOp::Ignore => {}
            }
        }

        if !stack.is_empty() {
            tracing::trace!(open = stack.len(), "branches left open at end of input");
        }

        Ok(drawing)
    }
}

/// Interprets `commands` with the standard symbol table.
///
/// Convenience wrapper over [`TurtleInterpreter::interpret`].
pub fn interpret(
    commands: &str,
    origin: Vec3,
    orientation: Quat,
    step_length: f32,
    turn_angle: f32,
) -> Result<Drawing> {
    TurtleInterpreter::standard(TurtleConfig {
        step_length,
        turn_angle,
        origin,
        orientation,
    })
    .interpret(commands)
}
