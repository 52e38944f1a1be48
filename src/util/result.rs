use std::error::Error;

pub(crate) trait ResultExtension<T> {
    /// Unwraps the value, or panics with the error's own message. This is how every panicking
    /// method in the crate is derived from its `try_` twin.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`], reporting the location of the caller.
    fn throw(self) -> T;
}

impl<T, E: Error> ResultExtension<T> for Result<T, E> {
    #[track_caller]
    fn throw(self) -> T {
        match self {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}
