//! Infrastructure layer: I/O implementations
//!
//! This layer implements the I/O boundary traits the services read through.

pub mod error;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use traits::{input_for, FileInput, InputSource, StdinInput, TextInput};
