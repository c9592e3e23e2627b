mod error;

pub use error::{ErrorBody, HttpError, error_response};
