use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    InvalidDocx(String),
    Xml(roxmltree::Error),
    Json(serde_json::Error),
    /// A style annotation carried a `type` outside the supported set.
    /// `annotation` is its zero-based position in the submitted list.
    UnknownStyleType { annotation: usize, value: String },
    InvalidLogEntry(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::InvalidDocx(msg) => write!(f, "invalid DOCX: {msg}"),
            Error::Xml(e) => write!(f, "XML parse error: {e}"),
            Error::Json(e) => write!(f, "JSON error: {e}"),
            Error::UnknownStyleType { annotation, value } => write!(
                f,
                "style annotation #{annotation} has unknown type \"{value}\""
            ),
            Error::InvalidLogEntry(msg) => write!(f, "invalid log entry: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Xml(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::InvalidDocx(_) | Error::UnknownStyleType { .. } | Error::InvalidLogEntry(_) => {
                None
            }
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::Xml(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}
