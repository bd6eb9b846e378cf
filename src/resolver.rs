use crate::client::Client;
use crate::error::{Error, Result};
use crate::xpath::parse_html;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use url::Url;

/// Path prefix of the links that point at a sample gallery
pub const GALLERY_PATH_PREFIX: &str = "/sample-galleries";

static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{10}").unwrap());

/// Numeric gallery id, always exactly 10 ASCII digits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GalleryId(String);

impl GalleryId {
    pub fn parse(s: &str) -> Result<Self> {
        if s.len() == 10 && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s.to_owned()))
        } else {
            Err(Error::InvalidGalleryId(s.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GalleryId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pull the gallery id out of a single link target
fn id_from_href(href: &str) -> Option<GalleryId> {
    if !href.starts_with(GALLERY_PATH_PREFIX) {
        return None;
    }
    ID_RE
        .find(href)
        .and_then(|m| GalleryId::parse(m.as_str()).ok())
}

/// Scan the page's links in document order and return the id of the first sample gallery
pub fn find_gallery_id(html: &str) -> Result<GalleryId> {
    // an empty or unparseable page has no links either
    let root = match parse_html(html) {
        Ok(root) => root,
        Err(e) => {
            debug!("listing page not parsed: {}", e);
            return Err(Error::NoGalleryId);
        }
    };
    let anchors = root.xpath_elem("//a[@href]")?;
    debug!("links on page: {}", anchors.len());
    anchors
        .iter()
        .filter_map(|a| a.attr("href"))
        .find_map(|href| {
            let id = id_from_href(&href)?;
            debug!("gallery link: {}", href);
            Some(id)
        })
        .ok_or(Error::NoGalleryId)
}

impl Client {
    /// Fetch the listing page and find the gallery it embeds
    pub async fn resolve(&self, url: &Url) -> Result<GalleryId> {
        info!("fetching listing page: {}", url);
        let html = self.get_text(url.clone()).await?;
        trace!("page: {} bytes", html.len());
        let id = find_gallery_id(&html)?;
        info!("gallery id: {}", id);
        Ok(id)
    }
}
