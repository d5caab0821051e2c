//! Purpose: Domain error model shared by every generation and the C ABI.
//! Exports: `Error`, `ErrorKind`, `Result`, `to_exit_code`.
//! Role: Single error type surfaced by factories, tag parsing, and the CLI.
//! Invariants: Error kinds are stable once published; new kinds are appended.
//! Invariants: Exit-code and ABI kind numbers map 1:1 with `ErrorKind`.
use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    OutOfRange,
    Io,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Internal => "internal",
            ErrorKind::Usage => "usage",
            ErrorKind::OutOfRange => "out_of_range",
            ErrorKind::Io => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::OutOfRange => 3,
        ErrorKind::Io => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, to_exit_code};
    use std::error::Error as StdError;

    #[test]
    fn exit_code_mapping_is_stable() {
        let cases = [
            (ErrorKind::Internal, 1),
            (ErrorKind::Usage, 2),
            (ErrorKind::OutOfRange, 3),
            (ErrorKind::Io, 4),
        ];

        for (kind, code) in cases {
            assert_eq!(to_exit_code(kind), code);
        }
    }

    #[test]
    fn display_includes_message_and_hint() {
        let err = Error::new(ErrorKind::OutOfRange)
            .with_message("value -1 is below 0")
            .with_hint("pass a non-negative value");
        assert_eq!(
            err.to_string(),
            "OutOfRange: value -1 is below 0 (hint: pass a non-negative value)"
        );
        assert_eq!(err.message(), Some("value -1 is below 0"));
        assert_eq!(err.hint(), Some("pass a non-negative value"));
    }

    #[test]
    fn source_is_exposed() {
        let io = std::io::Error::other("broken pipe");
        let err = Error::new(ErrorKind::Io).with_source(io);
        assert_eq!(
            err.source().map(|source| source.to_string()),
            Some("broken pipe".to_string())
        );
    }
}
