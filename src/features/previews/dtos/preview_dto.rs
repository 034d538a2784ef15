use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::video::VideoRef;

/// Form state for a slug preview.
///
/// `previous_title`/`current_slug` carry the form's state so the preview can
/// tell whether the slug is still auto-generated.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SlugPreviewQuery {
    pub title: String,
    pub previous_title: Option<String>,
    pub current_slug: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SlugPreviewDto {
    /// Plain derivation of `title`
    pub derived: String,
    /// Value the slug field should hold after the title change
    pub slug: String,
    /// Whether the slug still follows the title
    pub is_auto: bool,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct VideoResolveQuery {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VideoPreviewDto {
    pub video: VideoRef,
    pub embed_url: Option<String>,
}
