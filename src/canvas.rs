//! Hand-off between regeneration and whatever renders the primitives.

use crate::error::Result;
use crate::primitive::{DrawPrimitive, Drawing};
use crate::system::LSystem;
use glam::{Quat, Vec3};

/// Receives draw commands. Implemented by the host renderer.
pub trait PrimitiveSink {
    /// Releases everything emitted since the last clear.
    fn clear(&mut self);

    /// Creates a branch renderable between `start` and `end`.
    fn segment(&mut self, start: Vec3, end: Vec3);

    /// Creates a leaf renderable at `point` facing `orientation`.
    fn marker(&mut self, point: Vec3, orientation: Quat);
}

/// Owns an [`LSystem`], its sink, and the drawing currently shown in the sink.
///
/// The sink only ever shows the output of a single successful regeneration.
pub struct Canvas<S> {
    system: LSystem,
    sink: S,
    current: Option<Drawing>,
}

impl<S: PrimitiveSink> Canvas<S> {
    /// Creates a canvas. Nothing is drawn until [`refresh`](Self::refresh).
    pub fn new(system: LSystem, sink: S) -> Self {
        Self {
            system,
            sink,
            current: None,
        }
    }

    pub fn system(&self) -> &LSystem {
        &self.system
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The drawing currently in the sink, if any regeneration has succeeded.
    pub fn current(&self) -> Option<&Drawing> {
        self.current.as_ref()
    }

    /// Regenerates and swaps the result into the sink.
    ///
    /// On error the sink and [`current`](Self::current) are left untouched.
    pub fn refresh(&mut self) -> Result<&Drawing> {
        let drawing = self.system.regenerate()?;
        Ok(self.show(drawing))
    }

    /// Clears the sink and emits `drawing` into it.
    fn show(&mut self, drawing: Drawing) -> &Drawing {
        self.sink.clear();
        for primitive in &drawing {
            match *primitive {
                DrawPrimitive::Segment { start, end } => self.sink.segment(start, end),
                DrawPrimitive::Marker { point, orientation } => {
                    self.sink.marker(point, orientation)
                }
            }
        }

        self.current.insert(drawing)
    }

    /// Handles an iteration-count change: clamp, store, refresh.
    ///
    /// If regeneration fails the previous count is restored, so [`system`](Self::system)
    /// always describes the drawing in the sink.
    pub fn set_iterations(&mut self, iterations: u32) -> Result<&Drawing> {
        let previous = self.system.iterations;
        let effective = self.system.set_iterations(iterations);
        tracing::debug!(requested = iterations, effective, "iteration count changed");

        let drawing = match self.system.regenerate() {
            Ok(drawing) => drawing,
            Err(err) => {
                self.system.iterations = previous;
                return Err(err);
            }
        };
        Ok(self.show(drawing))
    }

    /// Replaces the whole parameter set and refreshes.
    ///
    /// If `system` fails to regenerate it is dropped and the current one stays.
    pub fn set_system(&mut self, system: LSystem) -> Result<&Drawing> {
        let drawing = system.regenerate()?;
        self.system = system;
        Ok(self.show(drawing))
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
