//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (InputSource) but are themselves
//! concrete structs, not traits.

mod solver;

pub use solver::{Report, SolverService};
