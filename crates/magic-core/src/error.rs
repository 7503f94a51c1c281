//! The `MagicError` taxonomy: structured, localizable error values carrying
//! a kind, a message, optional location, structured details, and an
//! optional chained cause.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Source location attached to an error when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// File or logical input name (e.g. the decoded image's path, if any).
    pub file: Option<String>,
    /// Line number, when meaningful (e.g. a pixel row).
    pub line: Option<u32>,
    /// Column number, when meaningful (e.g. a pixel column).
    pub column: Option<u32>,
}

/// Structured payload attached to every [`MagicError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable, machine-readable error code.
    pub code: String,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Contextual key-value pairs (symbol type, position, counts, ...).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint suggesting how to resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the given code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// The error-kind taxonomy. Kind tokens stay English-stable even when
/// the prose around them is localized (see [`MagicError`]'s [`Display`]
/// impl).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The referenced input file does not exist.
    FileNotFound,
    /// The input's container format is not supported by the external decoder.
    UnsupportedFormat,
    /// Reading the input failed.
    FileRead,
    /// Writing a debug dump or other output failed.
    FileWrite,
    /// Decoded byte length exceeded the configured maximum.
    FileTooLarge,
    /// Image dimensions exceeded the configured maximum.
    DimensionsTooLarge,
    /// The decoded image is malformed in a way the preprocessor rejects.
    InvalidImage,
    /// No symbols at all were detected in the image.
    NoSymbolsDetected,
    /// No `OuterCircle` symbol was present among the detected symbols.
    NoOuterCircle,
    /// A contour could not be classified into any known symbol shape.
    InvalidSymbolShape,
    /// A generic image-processing failure (e.g. inconsistent buffer state).
    ImageProcessing,
    /// Aggregated parse-time errors, surfaced once at the end of `parse()`.
    Syntax,
    /// A symbol graph node had no recognized statement-dispatch rule.
    UnexpectedSymbol,
    /// No main entry point could be found or synthesized.
    MissingMainEntry,
    /// A connection failed the `isValidConnection` predicate.
    InvalidConnection,
    /// A binary operator symbol had fewer than two resolvable operands.
    UnbalancedExpression,
    /// A downstream compilation step failed (external collaborator surface).
    Compilation,
    /// An operation was requested that the AST does not support.
    UnsupportedOperation,
    /// A downstream execution step failed (external collaborator surface).
    Execution,
    /// Generic input validation failure.
    Validation,
    /// Generic I/O failure not covered by a more specific kind.
    Io,
    /// A caller-supplied deadline elapsed before the stage completed.
    Cancelled,
}

impl ErrorKind {
    /// English-stable token used as the `Display` prefix and the key into
    /// a [`LocalizedMessages`] table.
    pub fn token(&self) -> &'static str {
        match self {
            ErrorKind::FileNotFound => "file-not-found",
            ErrorKind::UnsupportedFormat => "unsupported-format",
            ErrorKind::FileRead => "file-read",
            ErrorKind::FileWrite => "file-write",
            ErrorKind::FileTooLarge => "file-too-large",
            ErrorKind::DimensionsTooLarge => "dimensions-too-large",
            ErrorKind::InvalidImage => "invalid-image",
            ErrorKind::NoSymbolsDetected => "no-symbols-detected",
            ErrorKind::NoOuterCircle => "no-outer-circle",
            ErrorKind::InvalidSymbolShape => "invalid-symbol-shape",
            ErrorKind::ImageProcessing => "image-processing",
            ErrorKind::Syntax => "syntax",
            ErrorKind::UnexpectedSymbol => "unexpected-symbol",
            ErrorKind::MissingMainEntry => "missing-main-entry",
            ErrorKind::InvalidConnection => "invalid-connection",
            ErrorKind::UnbalancedExpression => "unbalanced-expression",
            ErrorKind::Compilation => "compilation",
            ErrorKind::UnsupportedOperation => "unsupported-operation",
            ErrorKind::Execution => "execution",
            ErrorKind::Validation => "validation",
            ErrorKind::Io => "io",
            ErrorKind::Cancelled => "cancelled",
        }
    }
}

/// Canonical error type for the magic-circle recognizer.
///
/// Carries a typed [`ErrorKind`], a structured [`ErrorInfo`] payload, an
/// optional [`Location`], and an optional chained cause. A captured
/// backtrace string is attached only when debug mode is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub struct MagicError {
    kind: ErrorKind,
    info: ErrorInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<Box<MagicError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    backtrace: Option<String>,
}

impl MagicError {
    /// Creates a new error of the given kind with the given payload.
    pub fn new(kind: ErrorKind, info: ErrorInfo) -> Self {
        Self {
            kind,
            info,
            location: None,
            cause: None,
            backtrace: None,
        }
    }

    /// Builds the aggregated `Syntax` error from a non-empty set of
    /// per-statement errors collected during parsing; surfaced as a
    /// single `Syntax`-kind error at the end of the parse, with the
    /// first underlying error preserved as its cause.
    pub fn aggregate_syntax(errors: Vec<MagicError>) -> Self {
        debug_assert!(!errors.is_empty());
        let mut info = ErrorInfo::new(
            "E_SYNTAX_AGGREGATE",
            format!("{} parse error(s) accumulated", errors.len()),
        );
        for (idx, e) in errors.iter().enumerate() {
            info = info.with_context(format!("error[{idx}]"), e.info().message.clone());
        }
        let mut err = Self::new(ErrorKind::Syntax, info);
        if let Some(first) = errors.into_iter().next() {
            err.cause = Some(Box::new(first));
        }
        err
    }

    /// Attaches a source location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Attaches a chained cause.
    pub fn with_cause(mut self, cause: MagicError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Attaches a captured backtrace string; only meaningful when debug
    /// mode is on.
    pub fn with_backtrace(mut self, backtrace: impl Into<String>) -> Self {
        self.backtrace = Some(backtrace.into());
        self
    }

    /// Returns the error's kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the structured payload.
    pub fn info(&self) -> &ErrorInfo {
        &self.info
    }

    /// Returns the chained cause, if any.
    pub fn cause(&self) -> Option<&MagicError> {
        self.cause.as_deref()
    }
}

impl Display for MagicError {
    /// Tool-integration formatting: a kind prefix, a location
    /// line when available, detail/suggestion lines, and a cause line for
    /// chained errors.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.token(), self.info)?;
        if let Some(loc) = &self.location {
            write!(f, "\n  at ")?;
            if let Some(file) = &loc.file {
                write!(f, "{file}")?;
            } else {
                write!(f, "<image>")?;
            }
            match (loc.line, loc.column) {
                (Some(l), Some(c)) => write!(f, ":{l}:{c}")?,
                (Some(l), None) => write!(f, ":{l}")?,
                _ => {}
            }
        }
        if let Some(cause) = &self.cause {
            write!(f, "\n  caused by: {cause}")?;
        }
        Ok(())
    }
}

/// Pass-through localization hook: a message table mapping an
/// [`ErrorKind`] token to localized prose. The kind tokens themselves
/// (`ErrorKind::token`) are never localized.
pub trait LocalizedMessages {
    /// Returns localized prose for the given kind token, if the table has
    /// an entry for it.
    fn lookup(&self, kind_token: &str) -> Option<&str>;
}

/// Default English message table: an identity pass-through.
#[derive(Debug, Default, Clone)]
pub struct EnglishMessages;

impl LocalizedMessages for EnglishMessages {
    fn lookup(&self, _kind_token: &str) -> Option<&str> {
        None
    }
}
