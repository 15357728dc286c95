//! compass-loader — Quiz definition loading.
//!
//! Fetches the quiz document exactly once, from a local file or an HTTP(S)
//! URL, and hands back a validated [`Quiz`]. Failures are terminal: there is
//! no retry.

pub mod source;

pub use source::{load_quiz, QuizSource};

pub use compass_core::{DataLoadError, Quiz};
