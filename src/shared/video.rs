//! Lesson video URL classification.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

lazy_static! {
    static ref YOUTUBE: Regex =
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&?#/\s]+)").unwrap();
    /// Numeric id after any path prefix (`/video/`, `/channels/<name>/`, ...)
    static ref VIMEO: Regex = Regex::new(r"vimeo\.com/(?:[^?#\s]*/)?(\d+)(?:[/?#&\s]|$)").unwrap();
    static ref DIRECT_FILE: Regex = Regex::new(r"(?i)\.(?:mp4|webm|ogg)$").unwrap();
}

/// Where a lesson video is hosted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum VideoRef {
    Youtube { video_id: String },
    Vimeo { video_id: String },
    Direct { url: String },
    /// Unrecognised; the raw URL is kept for an outbound link
    Unknown { url: String },
}

impl VideoRef {
    /// URL suitable for an `<iframe>` or `<video>` source
    pub fn embed_url(&self) -> Option<String> {
        match self {
            VideoRef::Youtube { video_id } => {
                Some(format!("https://www.youtube.com/embed/{}", video_id))
            }
            VideoRef::Vimeo { video_id } => {
                Some(format!("https://player.vimeo.com/video/{}", video_id))
            }
            VideoRef::Direct { url } => Some(url.clone()),
            VideoRef::Unknown { .. } => None,
        }
    }

    pub fn provider(&self) -> &'static str {
        match self {
            VideoRef::Youtube { .. } => "youtube",
            VideoRef::Vimeo { .. } => "vimeo",
            VideoRef::Direct { .. } => "direct",
            VideoRef::Unknown { .. } => "unknown",
        }
    }
}

/// Classify a video URL. Never fails: anything unrecognised is `Unknown`.
pub fn resolve_video(url: &str) -> VideoRef {
    let url = url.trim();

    if let Some(caps) = YOUTUBE.captures(url) {
        return VideoRef::Youtube {
            video_id: caps[1].to_string(),
        };
    }

    if let Some(caps) = VIMEO.captures(url) {
        return VideoRef::Vimeo {
            video_id: caps[1].to_string(),
        };
    }

    // Extension check ignores query string and fragment
    let path = url.split(['?', '#']).next().unwrap_or(url);
    if DIRECT_FILE.is_match(path) {
        return VideoRef::Direct {
            url: url.to_string(),
        };
    }

    VideoRef::Unknown {
        url: url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_watch_stops_at_ampersand() {
        assert_eq!(
            resolve_video("https://youtube.com/watch?v=abc123&t=5"),
            VideoRef::Youtube {
                video_id: "abc123".to_string()
            }
        );
        assert_eq!(
            resolve_video("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            VideoRef::Youtube {
                video_id: "dQw4w9WgXcQ".to_string()
            }
        );
    }

    #[test]
    fn test_youtube_short_links() {
        assert_eq!(
            resolve_video("https://youtu.be/xyz789?t=42"),
            VideoRef::Youtube {
                video_id: "xyz789".to_string()
            }
        );
    }

    #[test]
    fn test_vimeo() {
        let video = resolve_video("https://vimeo.com/555");
        assert_eq!(
            video,
            VideoRef::Vimeo {
                video_id: "555".to_string()
            }
        );
        assert_eq!(
            video.embed_url().as_deref(),
            Some("https://player.vimeo.com/video/555")
        );
    }

    #[test]
    fn test_vimeo_id_after_path_prefix() {
        let vimeo = |id: &str| VideoRef::Vimeo {
            video_id: id.to_string(),
        };
        assert_eq!(resolve_video("https://player.vimeo.com/video/123"), vimeo("123"));
        assert_eq!(
            resolve_video("https://vimeo.com/channels/staffpicks/987654"),
            vimeo("987654")
        );
        assert_eq!(resolve_video("https://vimeo.com/76979871?h=8272103f6e"), vimeo("76979871"));
        assert_eq!(resolve_video("https://vimeo.com/555/abcdef12"), vimeo("555"));
        assert_eq!(resolve_video("https://vimeo.com/about").provider(), "unknown");
    }

    #[test]
    fn test_direct_files_by_extension() {
        assert_eq!(resolve_video("https://cdn.test/a/intro.mp4").provider(), "direct");
        assert_eq!(resolve_video("https://cdn.test/clip.WEBM?sig=1").provider(), "direct");
        assert_eq!(resolve_video("https://cdn.test/sound.ogg#t=3").provider(), "direct");
        assert_eq!(resolve_video("https://cdn.test/clip.mov").provider(), "unknown");
    }

    #[test]
    fn test_unknown_keeps_raw_url() {
        let video = resolve_video("not a url");
        assert_eq!(
            video,
            VideoRef::Unknown {
                url: "not a url".to_string()
            }
        );
        assert_eq!(video.embed_url(), None);
    }

    #[test]
    fn test_watch_without_id_is_unknown() {
        assert_eq!(resolve_video("https://youtube.com/watch?v=").provider(), "unknown");
    }

    #[test]
    fn test_serializes_as_tagged_variant() {
        let json = serde_json::to_value(resolve_video("https://youtu.be/abc")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "provider": "youtube", "video_id": "abc" })
        );
    }
}
