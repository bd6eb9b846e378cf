use crate::client::Client;
use crate::error::{Error, Result};
use futures::prelude::*;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^/]+$").unwrap());

/// Final path segment of `url`, used as the file name on disk
pub fn file_name(url: &str) -> Result<&str> {
    match NAME_RE.find(url).map(|m| m.as_str()) {
        Some(".") | Some("..") | None => Err(Error::InvalidUrl(url.to_owned())),
        Some(name) => Ok(name),
    }
}

impl Client {
    pub async fn fetch_thumbnail(&self, url: &str) -> Result<Vec<u8>> {
        debug!("downloading: {}", url);
        let response = self.send(self.get(url)).await?;
        let bytes = response.bytes().await?;
        trace!("{} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    /// Download every url into `dir`, returning how many files were written.
    ///
    /// At most `threads` requests are in flight, but files are always written in
    /// the order of `urls`: when two urls share a file name the later one wins.
    /// The first failure stops everything that is left.
    pub async fn download_thumbnails<'a, I>(&self, urls: I, dir: &Path, threads: usize) -> Result<usize>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let urls = urls.into_iter().collect::<Vec<_>>();
        let total = urls.len();
        info!("downloading {} thumbnails", total);

        let mut downloads = stream::iter(urls)
            .map(|url| async move {
                let name = file_name(url)?;
                let bytes = self.fetch_thumbnail(url).await?;
                Ok::<_, Error>((name, bytes))
            })
            .buffered(threads.max(1));

        let mut written = 0;
        while let Some(result) = downloads.next().await {
            let (name, bytes) = result?;
            let path = dir.join(name);
            tokio::fs::write(&path, &bytes)
                .await
                .map_err(Error::io(&path))?;
            written += 1;
            info!("{} / {} thumbnails", written, total);
        }
        Ok(written)
    }
}
