use std::alloc;
use std::error::Error;

use crate::util::error::ReserveError;

pub(crate) trait ResultExtension<T, E: Error> {
    /// A method similar to [`Result::unwrap`], except that it applies only to types which implement
    /// [`Error`] and panics with the message of the error itself.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`].
    fn throw(self) -> T;
}

impl<T, E: Error> ResultExtension<T, E> for Result<T, E> {
    fn throw(self) -> T {
        match self {
            Ok(val) => val,
            Err(error) => panic!("{}", error),
        }
    }
}

pub(crate) trait ReserveExtension<T> {
    /// Unwraps the result of a fallible reservation, panicking on a capacity overflow and deferring
    /// to [`alloc::handle_alloc_error`] when the allocator fails, as recommended.
    ///
    /// # Panics
    /// Panics if the [`Result`] is a [`ReserveError::CapacityOverflow`].
    fn handle(self) -> T;
}

impl<T> ReserveExtension<T> for Result<T, ReserveError> {
    fn handle(self) -> T {
        match self {
            Ok(val) => val,
            Err(ReserveError::CapacityOverflow(error)) => panic!("{}", error),
            Err(ReserveError::AllocFailure(error)) => alloc::handle_alloc_error(error.layout),
        }
    }
}
