use std::io;

/// Everything that can go wrong while evaluating one candidate.
///
/// None of these abort the process.
/// They end up as the `error` field of the result line.
#[derive(Debug, Clone, PartialEq, Fail)]
pub enum Error {
    /// Optima or config file are malformed or unreadable.
    #[fail(display = "configuration error: {}", _0)]
    Config(String),

    /// The candidate is not a JSON number or array of numbers.
    #[fail(display = "cannot parse candidate: {}", _0)]
    Parse(String),

    /// The candidate does not have the dimension of the optima.
    #[fail(display = "candidate shape mismatch: {}", _0)]
    Shape(String),

    /// No candidate line could be read.
    #[fail(display = "cannot read candidate: {}", _0)]
    Io(String),

    /// Squared distance overflowed.
    #[fail(display = "objective for optimum {} is not finite", index)]
    NotFinite { index: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
