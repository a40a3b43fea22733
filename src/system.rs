//! The full parameter set of an L-System and its single regeneration entry point.

use crate::error::{Error, Result};
use crate::grammar::{Grammar, RECOMMENDED_MAX_ITERATIONS};
use crate::interpreter::{TurtleConfig, TurtleInterpreter};
use crate::primitive::Drawing;
use serde::{Deserialize, Serialize};

/// Bounds for the user-selectable iteration count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationRange {
    pub min: u32,
    pub max: u32,
}

impl Default for IterationRange {
    fn default() -> Self {
        Self { min: 1, max: 6 }
    }
}

impl IterationRange {
    pub fn clamp(&self, iterations: u32) -> u32 {
        iterations.max(self.min).min(self.max)
    }

    pub fn contains(&self, iterations: u32) -> bool {
        (self.min..=self.max).contains(&iterations)
    }
}

/// Everything needed to regenerate a drawing from scratch.
///
/// The default is a small branching tree: axiom `F`, `F -> F[+F]F[-F]L`, `L -> L`,
/// one iteration, 25° turns and unit steps.
///
/// # Configuration
///
/// ```toml
/// axiom = "F"
/// iterations = 3
///
/// [rules]
/// F = "F[+F]F[-F]L"
/// L = "L"
///
/// [range]
/// min = 1
/// max = 6
///
/// [turtle]
/// step_length = 1.0
/// turn_angle = 25.0
/// origin = [0.0, 0.0, 0.0]
/// orientation = [0.0, 0.0, 0.0, 1.0]
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LSystem {
    pub axiom: String,
    pub iterations: u32,
    pub rules: Grammar,
    pub range: IterationRange,
    pub turtle: TurtleConfig,
}

impl Default for LSystem {
    fn default() -> Self {
        Self {
            axiom: "F".to_owned(),
            iterations: 1,
            rules: Grammar::from([('F', "F[+F]F[-F]L"), ('L', "L")]),
            range: IterationRange::default(),
            turtle: TurtleConfig::default(),
        }
    }
}

impl LSystem {
    /// Parses and validates a TOML description. Missing fields take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let system: Self = toml::from_str(source)?;
        system.validate()?;
        Ok(system)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.range.min > self.range.max {
            return Err(Error::InvalidConfig(format!(
                "iteration range is empty ({}..={})",
                self.range.min, self.range.max
            )));
        }
        if !self.range.contains(self.iterations) {
            return Err(Error::InvalidConfig(format!(
                "iterations {} outside {}..={}",
                self.iterations, self.range.min, self.range.max
            )));
        }
        self.turtle.validate()
    }

    /// Sets the iteration count, clamped into [`range`](Self::range).
    ///
    /// Returns the count actually stored.
    pub fn set_iterations(&mut self, iterations: u32) -> u32 {
        self.iterations = self.range.clamp(iterations);
        self.iterations
    }

    /// Text for the host's iteration counter.
    pub fn iteration_label(&self) -> String {
        format!("Iterations: {}", self.iterations)
    }

    /// The fully expanded command string for the current iteration count.
    pub fn command_string(&self) -> String {
        self.rules.expand(&self.axiom, self.iterations)
    }

    /// Expands and interprets from scratch, returning a fresh [`Drawing`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] for parameters that fail [`validate`](Self::validate),
    /// [`Error::UnmatchedPop`] when the expanded string closes a branch it never opened.
    pub fn regenerate(&self) -> Result<Drawing> {
        self.validate()?;

        if self.iterations > RECOMMENDED_MAX_ITERATIONS {
            tracing::warn!(
                iterations = self.iterations,
                predicted_len = %self.rules.expanded_len(&self.axiom, self.iterations),
                "iteration count above recommended maximum of {RECOMMENDED_MAX_ITERATIONS}"
            );
        }

        let commands = self.command_string();
        let drawing = TurtleInterpreter::standard(self.turtle.clone()).interpret(&commands)?;

        tracing::debug!(
            iterations = self.iterations,
            command_len = commands.len(),
            segments = drawing.segment_count(),
            markers = drawing.marker_count(),
            "regenerated l-system"
        );

        Ok(drawing)
    }
}
