//! File record types.

use chrono::{DateTime, Utc};
use filedock_shared::FileId;
use serde::{Deserialize, Serialize};

/// Coarse content classification derived from the MIME type prefix at upload
/// time. Anything that does not match a known prefix is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Image content (`image/*`).
    Image,
    /// Video content (`video/*`).
    Video,
    /// Audio content (`audio/*`).
    Audio,
    /// Text content (`text/*`).
    Text,
    /// Application content (`application/*`).
    Application,
    /// Anything else.
    #[default]
    Other,
}

impl ContentKind {
    /// Derive the content kind from a MIME type string by prefix.
    #[must_use]
    pub fn from_mime(mime: &str) -> Self {
        const PREFIXES: [(&str, ContentKind); 5] = [
            ("image", ContentKind::Image),
            ("video", ContentKind::Video),
            ("audio", ContentKind::Audio),
            ("text", ContentKind::Text),
            ("application", ContentKind::Application),
        ];

        PREFIXES
            .iter()
            .find(|(prefix, _)| mime.starts_with(prefix))
            .map_or(Self::Other, |(_, kind)| *kind)
    }

    /// Convert to the string stored in the database.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Text => "text",
            Self::Application => "application",
            Self::Other => "other",
        }
    }

    /// Parse from the stored string value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            "audio" => Some(Self::Audio),
            "text" => Some(Self::Text),
            "application" => Some(Self::Application),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Metadata record describing one stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique file identifier, primary key.
    pub file_id: FileId,
    /// Original filename, user supplied.
    pub name: String,
    /// Content classification.
    pub content_kind: ContentKind,
    /// Byte count of the stored payload.
    pub size: i64,
    /// Set once at creation, never changed.
    pub created_at: DateTime<Utc>,
    /// Updated on every mutation. Always `>= created_at`.
    pub modified_at: DateTime<Utc>,
}

impl FileRecord {
    /// Create a new record with both timestamps set to now.
    #[must_use]
    pub fn new(file_id: FileId, name: impl Into<String>, content_kind: ContentKind, size: i64) -> Self {
        let now = Utc::now();
        Self {
            file_id,
            name: name.into(),
            content_kind,
            size,
            created_at: now,
            modified_at: now,
        }
    }
}

/// Partial update to a file record. Only supplied fields change; every
/// applied patch bumps `modified_at`.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    /// New filename.
    pub name: Option<String>,
    /// New content classification.
    pub content_kind: Option<ContentKind>,
    /// New payload size.
    pub size: Option<i64>,
}

impl RecordPatch {
    /// Patch replacing the payload-derived fields after a content replace.
    #[must_use]
    pub fn content(content_kind: ContentKind, size: i64) -> Self {
        Self {
            name: None,
            content_kind: Some(content_kind),
            size: Some(size),
        }
    }

    /// Patch renaming the stored filename.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            content_kind: None,
            size: None,
        }
    }

    /// Apply this patch to a record, bumping `modified_at`.
    pub fn apply(self, record: &mut FileRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(kind) = self.content_kind {
            record.content_kind = kind;
        }
        if let Some(size) = self.size {
            record.size = size;
        }
        record.modified_at = Utc::now();
    }
}
