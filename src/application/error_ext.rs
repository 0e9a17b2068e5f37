//! Error conversion helpers for I/O performed on behalf of a service

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add the action and the name of the input involved.
    ///
    /// # Example
    /// ```ignore
    /// source.read_to_string()
    ///     .with_source_context("read tree", &source.describe())?;
    /// ```
    fn with_source_context(self, action: &str, source: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_source_context(self, action: &str, source: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, source),
            source: Box::new(e),
        })
    }
}
