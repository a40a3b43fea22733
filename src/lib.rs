//! # arbor-turtle
//!
//! An engine-agnostic L-System crate that rewrites single-character grammars and
//! interprets the result with a 3D turtle, using [glam](https://crates.io/crates/glam).
//!
//! It decouples the *Genotype* (axiom, rules, iteration count) from the *Phenotype*
//! (what is on screen), producing a [`Drawing`] of branch segments and leaf markers
//! that any renderer can ingest through a [`PrimitiveSink`].
//!
//! ```
//! use arbor_turtle::LSystem;
//!
//! let mut tree = LSystem::default();
//! tree.set_iterations(2);
//! let drawing = tree.regenerate().unwrap();
//! assert_eq!(drawing.marker_count(), 5);
//! ```

pub mod canvas;
pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod primitive;
pub mod system;
pub mod turtle;

pub use canvas::*;
pub use error::*;
pub use grammar::*;
pub use interpreter::*;
pub use primitive::*;
pub use system::*;
pub use turtle::*;
