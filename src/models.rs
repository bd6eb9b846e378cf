//! Typed view of the `get-gallery` payload.
//!
//! The pipeline itself passes the payload through as raw text; these types are
//! only populated in strict mode to check a payload before it is archived.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Gallery as returned under the `gallery` key
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gallery {
    pub id: u64,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub sponsored: bool,
    pub title: String,
    #[serde(default)]
    pub total_images: u32,
    #[serde(default)]
    pub photographers: Vec<Photographer>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub comments_enabled: bool,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(deserialize_with = "display_string")]
    pub id: String,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub user_liked: bool,
    #[serde(default)]
    pub creator: Option<Photographer>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub exif: Option<Exif>,
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
    /// Display dimensions, sent either as text or as numbers
    #[serde(default, deserialize_with = "display_string")]
    pub width: String,
    #[serde(default, deserialize_with = "display_string")]
    pub height: String,
    #[serde(default, deserialize_with = "display_string")]
    pub size: String,
    /// Full resolution asset
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub raw_url: Option<String>,
    #[serde(default, deserialize_with = "display_string")]
    pub raw_size: String,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub direct_url: Option<String>,
    #[serde(default, deserialize_with = "display_string")]
    pub comment_id: String,
    #[serde(default)]
    pub comment_count: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Exif {
    pub camera: Option<Camera>,
    pub lens: Option<Lens>,
    pub display_text: String,
    pub focal_length: Option<f64>,
    pub shutter_speed: Option<ShutterSpeed>,
    pub aperture: Option<f64>,
    pub iso: Option<u32>,
    pub exposure_comp: Option<f64>,
    // only present for video assets
    pub video_url: Option<String>,
    pub video_fps: Option<f64>,
    pub video_codec: Option<String>,
    pub video_recording_device: Option<String>,
}

impl Exif {
    pub fn is_video(&self) -> bool {
        self.video_url.is_some()
    }
}

/// Exposure time as an unreduced fraction, `1/250` stays `1/250`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ShutterSpeed {
    pub numerator: i64,
    pub denominator: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Photographer {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Camera {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Lens {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

fn display_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
