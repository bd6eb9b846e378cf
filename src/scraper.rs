use crate::client::Client;
use crate::config;
use crate::error::{Error, Result};
use crate::metadata::default_api_base;
use crate::models::Exif;
use crate::resolver::GalleryId;
use crate::snapshot::write_snapshot;
use std::path::PathBuf;
use url::Url;

/// What one archived gallery left on disk
#[derive(Debug)]
pub struct Report {
    pub id: GalleryId,
    /// `<output_dir>/<name>`
    pub dir: PathBuf,
    /// `gallery.json` and `images.json`
    pub snapshots: Vec<PathBuf>,
    /// Thumbnail files written, overwrites included
    pub thumbnails: usize,
}

pub struct Scraper {
    client: Client,
    config: config::Scraper,
}

impl Scraper {
    pub fn new(config: config::Scraper) -> Result<Self> {
        let client = Client::new(&config.user_agent, config.proxy.as_deref())?;
        Ok(Self { client, config })
    }

    /// Archive the gallery embedded in the listing page at `url`
    pub async fn archive(&self, url: &Url) -> Result<Report> {
        let name = gallery_name(url)?;
        let id = self.client.resolve(url).await?;

        let api_base = match &self.config.api_base {
            Some(base) => base.clone(),
            None => default_api_base(url)?,
        };
        let metadata = self.client.fetch_metadata(&api_base, &id).await?;

        if self.config.strict {
            let (gallery, images) = metadata.validate()?;
            let videos = images
                .iter()
                .filter(|image| image.exif.as_ref().map_or(false, Exif::is_video))
                .count();
            info!(
                "schema ok: {:?}, {} of {} images, {} videos",
                gallery.title,
                images.len(),
                gallery.total_images,
                videos
            );
        }

        let dir = self.config.output_dir.join(name);
        let images_dir = dir.join("images");
        tokio::fs::create_dir_all(&images_dir)
            .await
            .map_err(Error::io(&images_dir))?;

        let mode = self.config.sanitize;
        let snapshots = vec![
            write_snapshot(metadata.gallery(), &dir.join("gallery"), mode).await?,
            write_snapshot(metadata.images(), &dir.join("images"), mode).await?,
        ];

        let thumbnails = self
            .client
            .download_thumbnails(metadata.thumbnail_urls(), &images_dir, self.config.threads)
            .await?;

        Ok(Report {
            id,
            dir,
            snapshots,
            thumbnails,
        })
    }
}

/// Directory name for the gallery: the page url's last path segment
pub fn gallery_name(url: &Url) -> Result<String> {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .filter(|s| *s != "." && *s != "..")
        .map(str::to_owned)
        .ok_or_else(|| Error::InvalidUrl(url.to_string()))
}
