use std::fmt;

/// A tagged error: the first field names the subsystem that raised it
/// ("io", "parser", "config"), the second carries the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error(pub String, pub String);

impl Error {
    pub fn new(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Error(tag.into(), message.into())
    }

    pub fn tag(&self) -> &str {
        &self.0
    }

    pub fn message(&self) -> &str {
        &self.1
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.0, self.1)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::new("io", err.to_string())
    }
}
