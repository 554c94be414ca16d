use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::StreamExt;
use reqwest::{Client, StatusCode};
use spdlog::{debug, warn};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::config::Download;
use crate::render::RenderedPost;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("error writing {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("error downloading {url}: {source}")]
    Http { url: String, source: reqwest::Error },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageOutcome {
    pub url: String,
    pub path: PathBuf,
    pub status: StatusCode,
    pub bytes: u64,
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> SinkError + '_ {
    move |source| SinkError::Io { path: path.to_path_buf(), source }
}

fn http_error(url: &str) -> impl FnOnce(reqwest::Error) -> SinkError + '_ {
    move |source| SinkError::Http { url: url.to_string(), source }
}

pub fn build_client(download: &Download) -> reqwest::Result<Client> {
    let mut builder = Client::builder();
    if let Some(ref user_agent) = download.user_agent {
        builder = builder.user_agent(user_agent.as_str());
    }
    if let Some(secs) = download.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}

/// Creates the post directory and, when the post has images, its `images` directory
pub async fn prepare_dirs(rendered: &RenderedPost, with_images: bool) -> Result<(), SinkError> {
    tokio::fs::create_dir_all(&rendered.dir).await.map_err(io_error(&rendered.dir))?;
    if with_images {
        tokio::fs::create_dir_all(&rendered.images_dir).await.map_err(io_error(&rendered.images_dir))?;
    }
    Ok(())
}

pub async fn write_document(rendered: &RenderedPost) -> Result<PathBuf, SinkError> {
    tokio::fs::write(&rendered.index_path, rendered.content.as_bytes())
        .await
        .map_err(io_error(&rendered.index_path))?;
    debug!("Post written to {}", rendered.index_path.display());
    Ok(rendered.index_path.clone())
}

/// Streams the image body to `dest`. A non-success status is only a warning,
/// whatever the server sent is saved.
pub async fn download_image(client: &Client, url: &str, dest: &Path) -> Result<ImageOutcome, SinkError> {
    let response = client.get(url).send().await.map_err(http_error(url))?;

    let status = response.status();
    if !status.is_success() {
        warn!("Downloading {} returned {}. Saving the response body anyway", url, status);
    }

    let mut file = File::create(dest).await.map_err(io_error(dest))?;
    let mut stream = response.bytes_stream();
    let mut bytes = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(http_error(url))?;
        file.write_all(&chunk).await.map_err(io_error(dest))?;
        bytes += chunk.len() as u64;
    }
    file.flush().await.map_err(io_error(dest))?;

    debug!("Image {} saved to {} ({} bytes)", url, dest.display(), bytes);

    Ok(ImageOutcome {
        url: url.to_string(),
        path: dest.to_path_buf(),
        status,
        bytes,
    })
}
