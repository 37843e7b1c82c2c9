pub mod error;

pub use error::{LearnGlError, FATAL_EXIT_CODE};
