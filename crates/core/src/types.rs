use serde::{Deserialize, Serialize};

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Classification of an uploaded asset, derived from the upload
/// gateway's reported resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// The stored string form (`"image"` / `"video"`).
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Map a gateway resource type to a local kind.
    ///
    /// Anything containing `video` is a video; everything else
    /// (image, raw, ...) is treated as an image.
    pub fn from_resource_type(resource_type: &str) -> Self {
        if resource_type.contains("video") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}
