use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use spdlog::{debug, error, info, warn};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::export_tree::parse_tree;
use crate::extract::{collect_images, collect_posts};
use crate::merge::{merge_images_into_posts, MergeStats};
use crate::model::{url_basename, Post};
use crate::render::render;
use crate::sink::{build_client, download_image, prepare_dirs, write_document, ImageOutcome, SinkError};
use crate::slug::assign_unique_slugs;

#[derive(Debug, Clone, PartialEq)]
pub struct TaskFailure {
    /// Slug of the post the failed write belongs to
    pub post: String,
    pub error: String,
}

#[derive(Debug, Default, PartialEq)]
pub struct Summary {
    pub posts: usize,
    pub documents_written: usize,
    pub images_downloaded: usize,
    pub images_with_bad_status: usize,
    pub orphaned_images: usize,
    pub failures: Vec<TaskFailure>,
}

enum Written {
    Document(PathBuf),
    Image(ImageOutcome),
}

type TaskResult = (String, Result<Written, SinkError>);

/// Parses the export and returns the posts with their images, ready to be rendered
pub fn load_posts(xml: &str) -> Result<(Vec<Post>, MergeStats)> {
    let tree = parse_tree(xml).context("Error parsing export file")?;
    let images = collect_images(&tree).context("Error reading attachments")?;
    let mut posts = collect_posts(&tree).context("Error reading posts")?;
    info!("Export has {} posts and {} images", posts.len(), images.len());

    let stats = merge_images_into_posts(&images, &mut posts)?;
    if stats.orphaned > 0 {
        info!("{} images belong to posts that are not in the export and were skipped", stats.orphaned);
    }
    assign_unique_slugs(&mut posts);

    Ok((posts, stats))
}

/// Images to download for a post as `(file name, url)`, one url per file name.
/// The cover keeps its file name, so `coverImageFilename` always points to the cover.
fn image_files(post: &Post) -> Vec<(&str, &str)> {
    let cover_url = post.meta.cover_image_url.as_deref();
    let mut file_names: HashSet<&str> = HashSet::new();
    if let Some(cover_url) = cover_url {
        file_names.insert(url_basename(cover_url));
    }

    let mut files = vec![];
    let mut cover_added = false;
    for url in &post.meta.image_urls {
        let url = url.as_str();
        let file_name = url_basename(url);
        if Some(url) == cover_url && !cover_added {
            cover_added = true;
            files.push((file_name, url));
        } else if file_names.insert(file_name) {
            files.push((file_name, url));
        } else {
            warn!("Post {} has more than one image named {}. Skipping {}", post.frontmatter.slug, file_name, url);
        }
    }
    files
}

/// Writes every post and downloads its images. Each file is an independent task,
/// a failing one is recorded in the summary and the others carry on.
pub async fn write_posts(posts: &[Post], output_dir: &Path, client: Client, max_concurrent: usize) -> Summary {
    let mut summary = Summary {
        posts: posts.len(),
        ..Default::default()
    };
    let limit = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut tasks: JoinSet<TaskResult> = JoinSet::new();

    for post in posts {
        debug!("Writing post {}", post);
        let rendered = render(post, output_dir);
        let slug = post.frontmatter.slug.clone();
        let with_images = !post.meta.image_urls.is_empty();

        if let Err(e) = prepare_dirs(&rendered, with_images).await {
            error!("Skipping post {}: {}", slug, e);
            summary.failures.push(TaskFailure { post: slug, error: e.to_string() });
            continue;
        }

        for (file_name, url) in image_files(post) {
            let dest = rendered.images_dir.join(file_name);
            let client = client.clone();
            let limit = limit.clone();
            let url = url.to_string();
            let slug = slug.clone();
            tasks.spawn(async move {
                let _permit = limit.acquire_owned().await.ok();
                let res = download_image(&client, &url, &dest).await.map(Written::Image);
                (slug, res)
            });
        }

        tasks.spawn(async move {
            let res = write_document(&rendered).await.map(Written::Document);
            (slug, res)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(Written::Document(path)))) => {
                info!("Post written: {}", path.display());
                summary.documents_written += 1;
            }
            Ok((_, Ok(Written::Image(outcome)))) => {
                if outcome.status.is_success() {
                    summary.images_downloaded += 1;
                } else {
                    summary.images_with_bad_status += 1;
                }
            }
            Ok((slug, Err(e))) => {
                error!("Post {}: {}", slug, e);
                summary.failures.push(TaskFailure { post: slug, error: e.to_string() });
            }
            Err(e) => {
                error!("Write task did not finish: {}", e);
                summary.failures.push(TaskFailure { post: String::new(), error: e.to_string() });
            }
        }
    }

    summary
}

pub async fn run(config: &Config) -> Result<Summary> {
    let xml = tokio::fs::read_to_string(&config.input_file)
        .await
        .with_context(|| format!("Error reading export file {}", config.input_file.display()))?;

    let (posts, stats) = load_posts(&xml)?;
    let client = build_client(&config.download).context("Error creating HTTP client")?;

    let mut summary = write_posts(&posts, &config.output_dir, client, config.download.max_concurrent).await;
    summary.orphaned_images = stats.orphaned;

    Ok(summary)
}
