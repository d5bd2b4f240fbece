// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use newscast_error::GenerateError;

/// Builds the item for a given sequence number.
///
/// The worker calls it once per productive tick with sequence numbers
/// `1, 2, 3, ...`. An error ends the worker loop.
///
/// Any `Fn(u64) -> Result<T, GenerateError>` is a generator:
///
/// ```
/// use newscast_producer::ItemGenerator;
/// use newscast_error::GenerateError;
///
/// let squares = |n: u64| Ok::<_, GenerateError>(n * n);
/// assert_eq!(squares.generate(4).unwrap(), 16);
/// ```
pub trait ItemGenerator<T>: Send + 'static {
    /// Produce the item for `sequence`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] when the item cannot be built.
    fn generate(&self, sequence: u64) -> Result<T, GenerateError>;
}

impl<T, F> ItemGenerator<T> for F
where
    F: Fn(u64) -> Result<T, GenerateError> + Send + 'static,
{
    fn generate(&self, sequence: u64) -> Result<T, GenerateError> {
        self(sequence)
    }
}
