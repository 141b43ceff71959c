use serde_json::Value as JsonValue;

use super::remote::FetchedContent;
use crate::error::ClientError;
use crate::types::{Category, FileRecord};

pub const CONTENT_UNAVAILABLE: &str = "Content unavailable.";

const TEXT_EXTENSIONS: [&str; 3] = [".txt", ".md", ".json"];

/// How a file is previewed inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Image,
    Video,
    Audio,
    Pdf,
    /// Fetched through `read_content` and shown verbatim.
    Text,
    /// No inline preview; only "open externally" is offered.
    External,
}

impl PreviewKind {
    pub fn for_record(record: &FileRecord) -> Self {
        let ext = record.extension.to_lowercase();
        match record.category {
            Category::Images => PreviewKind::Image,
            Category::Video => PreviewKind::Video,
            Category::Audio => PreviewKind::Audio,
            _ if ext == ".pdf" => PreviewKind::Pdf,
            Category::Code => PreviewKind::Text,
            _ if TEXT_EXTENSIONS.contains(&ext.as_str()) => PreviewKind::Text,
            _ => PreviewKind::External,
        }
    }

    /// Media kinds are handed to the renderer as a content URL.
    pub fn is_streamed(&self) -> bool {
        matches!(self, PreviewKind::Image | PreviewKind::Video | PreviewKind::Audio | PreviewKind::Pdf)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewBody {
    /// Rendered from the content URL.
    Stream,
    /// Text fetch in flight.
    Loading,
    Text(String),
    Unavailable,
    ExternalOnly,
}

impl PreviewBody {
    /// Inline text to show, if any.
    pub fn display_text(&self) -> Option<&str> {
        match self {
            PreviewBody::Text(text) => Some(text),
            PreviewBody::Unavailable => Some(CONTENT_UNAVAILABLE),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub target: FileRecord,
    pub kind: PreviewKind,
    pub body: PreviewBody,
}

impl Preview {
    /// Opens a preview for `target`. Returns the preview and whether its text
    /// must be fetched.
    pub fn open(target: FileRecord) -> (Self, bool) {
        let kind = PreviewKind::for_record(&target);
        let body = match kind {
            PreviewKind::Text => PreviewBody::Loading,
            PreviewKind::External => PreviewBody::ExternalOnly,
            _ => PreviewBody::Stream,
        };
        let needs_text = body == PreviewBody::Loading;
        (Self { target, kind, body }, needs_text)
    }

    pub fn complete(&mut self, result: Result<FetchedContent, ClientError>) {
        self.body = match result {
            Ok(content) => PreviewBody::Text(render_text(&content)),
            Err(e) => {
                tracing::warn!(path = %self.target.path, error = %e, "preview read failed");
                PreviewBody::Unavailable
            }
        };
    }
}

/// Text shown for a fetched body. JSON objects and arrays are pretty-printed;
/// anything else is shown as (lossy) UTF-8.
pub fn render_text(content: &FetchedContent) -> String {
    if let Ok(value) = serde_json::from_slice::<JsonValue>(&content.body) {
        if value.is_object() || value.is_array() {
            if let Ok(pretty) = serde_json::to_string_pretty(&value) {
                return pretty;
            }
        }
    }
    String::from_utf8_lossy(&content.body).into_owned()
}
