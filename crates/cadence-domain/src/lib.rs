//! Cadence Domain Layer
//!
//! Pure model for blending voice clone DNA. No I/O; the SDK and CLI crates
//! build on these types.
//!
//! ## Key Concepts
//!
//! - **Category**: one of nine fixed writing-style dimensions
//! - **Weight**: an integer in `[0, 100]`, clamped on input
//! - **SourceProfile**: a clone's complete per-category weights
//! - **WeightMatrix**: the editable source x category state of a merge
//! - **Percentages**: display shares derived from the matrix on demand
//! - **MergePlan**: a validated snapshot of the matrix, ready to send

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod clone_id;
pub mod matrix;
pub mod merge;
pub mod profile;
pub mod selection;
pub mod weight;

// Re-exports for convenience
pub use category::Category;
pub use clone_id::CloneId;
pub use matrix::{percentages, MatrixError, WeightMatrix};
pub use merge::{MergePlan, ValidationError, MAX_SOURCES};
pub use profile::{CategoryWeights, SourceProfile};
pub use selection::{SourceSelection, Toggle};
pub use weight::Weight;
