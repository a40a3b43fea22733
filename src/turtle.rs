//! Turtle state and operations for geometric interpretation.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The state of the drawing turtle.
///
/// The turtle heads along its local up axis (Y). Turns happen about its local Z axis,
/// so all branching stays in the plane spanned by the starting up and right vectors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current world-space position of the "cursor".
    pub position: Vec3,

    /// Current world-space orientation.
    pub rotation: Quat,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl TurtleState {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Returns the turtle's local up direction (Y-axis) in world space. This is the heading.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Moves the turtle `distance` along its heading and returns the new position.
    pub fn advance(&mut self, distance: f32) -> Vec3 {
        self.position += self.up() * distance;
        self.position
    }

    /// Rotates the turtle around its local Z axis by `angle` radians.
    pub fn rotate_local_z(&mut self, angle: f32) {
        let rot = Quat::from_axis_angle(Vec3::Z, angle);
        self.rotation *= rot;
    }
}

/// Operations that can be performed by the turtle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurtleOp {
    /// Emit a segment one step along the heading and move to its end (`F`).
    Draw,
    /// Move one step along the heading without drawing. Not bound by default.
    Move,
    /// Emit a marker at the current position and orientation (`L`).
    Leaf,
    /// Rotate about the local Z axis by `sign * turn_angle` (`+` is `-1`, `-` is `+1`).
    Turn(f32),
    /// Save position and orientation onto the stack (`[`).
    Push,
    /// Restore the most recently pushed state (`]`).
    Pop,
    /// No-op; symbol has no registered meaning.
    Ignore,
}
