//! Deterministic simulation module
//!
//! All crack growth lives here. This module must be pure and deterministic:
//! - Fixed step count only, no wall clock
//! - One seeded RNG stream, consumed in a fixed order
//! - Stable iteration order (crack creation order)
//! - Output only through a `DrawingContext`

pub mod crack;
pub mod field;
pub mod sand;
pub mod state;
pub mod tick;

pub use crack::{Crack, CrackPhase, StepOutcome, TerminationCause, is_compatible};
pub use field::CrackField;
pub use sand::SandPainter;
pub use state::{RunStats, SubstrateState};
pub use tick::{RunSummary, paint_background, run, run_steps, run_with_config, step};
