use std::collections::HashMap;

use spdlog::debug;
use thiserror::Error;

use crate::model::{url_basename, AttachmentImage, Post};

#[derive(Debug, Error, PartialEq)]
pub enum MergeError {
    #[error("post id {0} appears more than once in the export")]
    DuplicatePostId(String),
}

#[derive(Debug, Default, PartialEq)]
pub struct MergeStats {
    pub associated: usize,
    pub orphaned: usize,
}

/// Attaches every image to the post it belongs to, resolving the cover image.
/// Images are appended in input order. Images of posts absent from the export are dropped.
pub fn merge_images_into_posts(images: &[AttachmentImage], posts: &mut [Post]) -> Result<MergeStats, MergeError> {
    let mut by_id: HashMap<String, usize> = HashMap::with_capacity(posts.len());
    for (pos, post) in posts.iter().enumerate() {
        if by_id.insert(post.meta.id.clone(), pos).is_some() {
            return Err(MergeError::DuplicatePostId(post.meta.id.clone()));
        }
    }

    let mut stats = MergeStats::default();
    for image in images {
        let Some(&pos) = by_id.get(&image.post_id) else {
            debug!("Image {} belongs to post {} which is not in the export", image.url, image.post_id);
            stats.orphaned += 1;
            continue;
        };

        let post = &mut posts[pos];
        post.meta.image_urls.push(image.url.clone());
        stats.associated += 1;

        if post.meta.cover_image_id.as_deref() == Some(image.id.as_str()) {
            post.meta.cover_image_url = Some(image.url.clone());
            post.frontmatter.cover_image_filename = Some(url_basename(&image.url).to_string());
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use crate::model::PostMeta;

    use super::*;

    fn post(id: &str, cover: Option<&str>) -> Post {
        Post {
            meta: PostMeta {
                id: id.to_string(),
                cover_image_id: cover.map(str::to_string),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn image(id: &str, post_id: &str, url: &str) -> AttachmentImage {
        AttachmentImage {
            id: id.to_string(),
            post_id: post_id.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_merge_with_cover() {
        let mut posts = vec![post("5", Some("11"))];
        let images = vec![image("10", "5", "a.png"), image("11", "5", "b.jpg")];

        let stats = merge_images_into_posts(&images, &mut posts).unwrap();

        assert_eq!(stats, MergeStats { associated: 2, orphaned: 0 });
        let merged = &posts[0];
        assert_eq!(merged.meta.image_urls, ["a.png", "b.jpg"]);
        assert_eq!(merged.meta.cover_image_url.as_deref(), Some("b.jpg"));
        assert_eq!(merged.frontmatter.cover_image_filename.as_deref(), Some("b.jpg"));
    }

    #[test]
    fn test_cover_filename_is_basename() {
        let mut posts = vec![post("5", Some("10"))];
        let images = vec![image("10", "5", "https://blog.example.com/uploads/2019/01/a.png")];

        merge_images_into_posts(&images, &mut posts).unwrap();

        assert_eq!(posts[0].frontmatter.cover_image_filename.as_deref(), Some("a.png"));
    }

    #[test]
    fn test_orphan_image_is_dropped() {
        let mut posts = vec![post("5", None), post("6", None)];
        let images = vec![image("10", "99", "lost.png"), image("11", "6", "found.png")];

        let stats = merge_images_into_posts(&images, &mut posts).unwrap();

        assert_eq!(stats, MergeStats { associated: 1, orphaned: 1 });
        assert!(posts[0].meta.image_urls.is_empty());
        assert_eq!(posts[1].meta.image_urls, ["found.png"]);
        assert_eq!(posts[1].meta.cover_image_url, None);
        assert_eq!(posts[1].frontmatter.cover_image_filename, None);
    }

    #[test]
    fn test_cover_not_among_images() {
        let mut posts = vec![post("5", Some("42"))];
        let images = vec![image("10", "5", "a.png")];

        merge_images_into_posts(&images, &mut posts).unwrap();

        assert_eq!(posts[0].meta.image_urls, ["a.png"]);
        assert_eq!(posts[0].meta.cover_image_url, None);
    }

    #[test]
    fn test_duplicate_post_id() {
        let mut posts = vec![post("5", None), post("5", None)];
        let res = merge_images_into_posts(&[], &mut posts);
        assert_eq!(res, Err(MergeError::DuplicatePostId("5".to_string())));
    }
}
