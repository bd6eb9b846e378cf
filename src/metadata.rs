use crate::client::Client;
use crate::error::{Error, Result};
use crate::models;
use crate::resolver::GalleryId;
use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::Value;
use url::Url;

/// Where the json endpoint lives on the listing page's host
pub const API_PATH: &str = "/sample-galleries/data";

#[derive(Deserialize)]
struct Envelope {
    gallery: Option<Box<RawValue>>,
    images: Option<Box<RawValue>>,
}

/// The two fields of a `get-gallery` response, kept as the server sent them
#[derive(Debug)]
pub struct GalleryMetadata {
    gallery: Box<RawValue>,
    images: Box<RawValue>,
    images_value: Value,
}

impl GalleryMetadata {
    pub fn from_json(body: &str) -> Result<Self> {
        let envelope: Envelope = serde_json::from_str(body)?;
        let gallery = envelope.gallery.ok_or(Error::MissingField("gallery"))?;
        let images = envelope.images.ok_or(Error::MissingField("images"))?;
        let images_value = serde_json::from_str(images.get())?;
        Ok(Self {
            gallery,
            images,
            images_value,
        })
    }

    /// Raw text of `gallery`
    pub fn gallery(&self) -> &str {
        self.gallery.get()
    }

    /// Raw text of `images`
    pub fn images(&self) -> &str {
        self.images.get()
    }

    /// Every `images[*].thumbnails[*].url`, outer array first
    pub fn thumbnail_urls(&self) -> impl Iterator<Item = &str> + '_ {
        self.images_value
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|image| image.get("thumbnails")?.as_array())
            .flatten()
            .filter_map(|thumbnail| thumbnail.get("url")?.as_str())
    }

    /// Check both fields against the typed model
    pub fn validate(&self) -> Result<(models::Gallery, Vec<models::Image>)> {
        let gallery = serde_json::from_str(self.gallery()).map_err(|source| Error::Schema {
            field: "gallery",
            source,
        })?;
        let images = serde_json::from_str(self.images()).map_err(|source| Error::Schema {
            field: "images",
            source,
        })?;
        Ok((gallery, images))
    }
}

/// `https://<host>/sample-galleries/data` for the site serving `page`
pub fn default_api_base(page: &Url) -> Result<Url> {
    let host = page
        .host_str()
        .ok_or_else(|| Error::InvalidUrl(page.to_string()))?;
    Url::parse(&format!("https://{}{}", host, API_PATH))
        .map_err(|_| Error::InvalidUrl(page.to_string()))
}

impl Client {
    pub async fn fetch_metadata(&self, api_base: &Url, id: &GalleryId) -> Result<GalleryMetadata> {
        let endpoint = format!("{}/get-gallery", api_base.as_str().trim_end_matches('/'));
        info!("fetching metadata: {}?galleryId={}", endpoint, id);
        let request = self.get(&endpoint).query(&[("galleryId", id.as_str())]);
        let body = self.send(request).await?.text().await?;
        trace!("metadata: {} bytes", body.len());
        GalleryMetadata::from_json(&body)
    }
}
