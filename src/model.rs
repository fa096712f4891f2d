use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    #[default]
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "table-cell")]
    TableCell,
}

/// One unit of extracted text. Its position in the document's sequence is
/// the index annotations refer to; `id` is opaque.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: ContentKind,
    pub text: String,
}

impl Paragraph {
    pub fn new(id: impl Into<String>, kind: ContentKind, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            text: text.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Highlight,
    TextColor,
    Border,
    Circle,
}

impl StyleKind {
    pub const ALL: [StyleKind; 8] = [
        StyleKind::Bold,
        StyleKind::Italic,
        StyleKind::Underline,
        StyleKind::Strikethrough,
        StyleKind::Highlight,
        StyleKind::TextColor,
        StyleKind::Border,
        StyleKind::Circle,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bold" => Some(StyleKind::Bold),
            "italic" => Some(StyleKind::Italic),
            "underline" => Some(StyleKind::Underline),
            "strikethrough" => Some(StyleKind::Strikethrough),
            "highlight" => Some(StyleKind::Highlight),
            "textcolor" => Some(StyleKind::TextColor),
            "border" => Some(StyleKind::Border),
            "circle" => Some(StyleKind::Circle),
            _ => None,
        }
    }

    /// Wire name, also used verbatim as the CSS class.
    pub fn name(self) -> &'static str {
        match self {
            StyleKind::Bold => "bold",
            StyleKind::Italic => "italic",
            StyleKind::Underline => "underline",
            StyleKind::Strikethrough => "strikethrough",
            StyleKind::Highlight => "highlight",
            StyleKind::TextColor => "textcolor",
            StyleKind::Border => "border",
            StyleKind::Circle => "circle",
        }
    }
}

/// A style applied to the half-open char range `[start_offset, end_offset)`
/// of the paragraph at `paragraph_index`. Offsets are stored as submitted
/// and clamped at render time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StyleAnnotation {
    #[serde(rename = "paraIndex")]
    pub paragraph_index: i64,
    #[serde(rename = "startOffset")]
    pub start_offset: i64,
    #[serde(rename = "endOffset")]
    pub end_offset: i64,
    #[serde(rename = "type")]
    pub kind: StyleKind,
    pub color: String,
    /// Client-assigned identifier, kept for the editor's undo history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The selected text at the time the style was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Any other client fields (e.g. `created_at`), carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StyleAnnotation {
    pub fn new(
        paragraph_index: i64,
        start_offset: i64,
        end_offset: i64,
        kind: StyleKind,
        color: impl Into<String>,
    ) -> Self {
        Self {
            paragraph_index,
            start_offset,
            end_offset,
            kind,
            color: color.into(),
            id: None,
            text: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// Annotation as it arrives over the wire, before its type is checked.
#[derive(Clone, Debug, Deserialize)]
pub struct RawAnnotation {
    #[serde(rename = "paraIndex")]
    pub paragraph_index: i64,
    #[serde(rename = "startOffset")]
    pub start_offset: i64,
    #[serde(rename = "endOffset")]
    pub end_offset: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RawAnnotation {
    pub fn validate(self, position: usize) -> Result<StyleAnnotation, Error> {
        let Some(kind) = StyleKind::from_name(&self.kind) else {
            return Err(Error::UnknownStyleType {
                annotation: position,
                value: self.kind,
            });
        };
        Ok(StyleAnnotation {
            paragraph_index: self.paragraph_index,
            start_offset: self.start_offset,
            end_offset: self.end_offset,
            kind,
            color: self.color.unwrap_or_default(),
            id: self.id,
            text: self.text,
            extra: self.extra,
        })
    }
}

/// Validates every raw annotation, failing on the first unknown type.
pub fn validate_annotations(raw: Vec<RawAnnotation>) -> Result<Vec<StyleAnnotation>, Error> {
    raw.into_iter()
        .enumerate()
        .map(|(i, a)| a.validate(i))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogAction {
    Add,
    Delete,
    Clear,
}

impl LogAction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "add" => Some(LogAction::Add),
            "delete" => Some(LogAction::Delete),
            "clear" => Some(LogAction::Clear),
            _ => None,
        }
    }
}

/// One editing action recorded against a document.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_id: Option<String>,
    pub action: LogAction,
    pub timestamp: String,
    /// Snapshot of the style added or deleted; `None` for `clear`.
    pub style: Option<serde_json::Value>,
    pub styles_cleared: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawLogEntry {
    #[serde(default)]
    pub log_id: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub style: Option<serde_json::Value>,
    #[serde(default)]
    pub styles_cleared: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RawLogEntry {
    /// Requires both `action` and `timestamp`; the action must be one of
    /// `add`, `delete` or `clear`.
    pub fn validate(self) -> Result<LogEntry, Error> {
        let (Some(action), Some(timestamp)) = (self.action, self.timestamp) else {
            return Err(Error::InvalidLogEntry(
                "missing \"action\" or \"timestamp\"".into(),
            ));
        };
        let Some(action) = LogAction::from_name(&action) else {
            return Err(Error::InvalidLogEntry(format!(
                "invalid action type \"{action}\""
            )));
        };
        Ok(LogEntry {
            log_id: self.log_id,
            action,
            timestamp,
            style: self.style,
            styles_cleared: self.styles_cleared,
            extra: self.extra,
        })
    }
}
