use lazy_static::lazy_static;
use regex::Regex;
use spdlog::debug;
use thiserror::Error;

use crate::export_tree::Element;
use crate::model::{AttachmentImage, Frontmatter, Post, PostMeta};
use crate::text_utils::rfc2822_to_iso;

const COVER_META_KEY: &str = "_thumbnail_id";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("export has no <channel> element")]
    MissingChannel,
    #[error("{kind} item #{index} has no <{field}> element")]
    MissingField {
        kind: &'static str,
        index: usize,
        field: &'static str,
    },
    #[error("post {post_id} has an invalid pubDate '{value}': {source}")]
    InvalidDate {
        post_id: String,
        value: String,
        source: chrono::ParseError,
    },
}

/// Export item with its position in the channel, used to report structural errors
struct Item<'a> {
    index: usize,
    kind: &'static str,
    element: &'a Element,
}

impl<'a> Item<'a> {
    /// Identifier-like field, trimmed
    fn field(&self, field: &'static str) -> Result<&'a str, ExtractError> {
        self.raw_field(field).map(str::trim)
    }

    fn raw_field(&self, field: &'static str) -> Result<&'a str, ExtractError> {
        self.element.child_text(field)
            .ok_or(ExtractError::MissingField { kind: self.kind, index: self.index, field })
    }

    /// Body of the post. `content:encoded` comes before `excerpt:encoded` in the export and
    /// both lose their prefix, so the first `encoded` is the content.
    fn body(&self) -> Result<&'a str, ExtractError> {
        self.element.children("encoded")
            .next()
            .map(|e| e.text.trim())
            .ok_or(ExtractError::MissingField { kind: self.kind, index: self.index, field: "encoded" })
    }

    fn cover_image_id(&self) -> Result<Option<String>, ExtractError> {
        for meta in self.element.children("postmeta") {
            let is_cover = meta.child_text("meta_key")
                .map(|key| key.trim() == COVER_META_KEY)
                .unwrap_or(false);
            if !is_cover {
                continue;
            }

            let value = meta.child_text("meta_value")
                .ok_or(ExtractError::MissingField { kind: self.kind, index: self.index, field: "meta_value" })?;
            return Ok(Some(value.trim().to_string()));
        }
        Ok(None)
    }
}

fn channel(tree: &Element) -> Result<&Element, ExtractError> {
    if tree.name == "channel" {
        return Ok(tree);
    }
    tree.child("channel").ok_or(ExtractError::MissingChannel)
}

/// Items of the channel whose `post_type` is `post_type`
fn items_of_type<'a>(tree: &'a Element, post_type: &'static str) -> Result<Vec<Item<'a>>, ExtractError> {
    let mut items = vec![];
    for (index, element) in channel(tree)?.children("item").enumerate() {
        let item_type = element.child_text("post_type")
            .ok_or(ExtractError::MissingField { kind: "item", index, field: "post_type" })?;
        if item_type.trim() == post_type {
            items.push(Item { index, kind: post_type, element });
        }
    }
    Ok(items)
}

pub fn is_image_url(url: &str) -> bool {
    lazy_static! {
        static ref IMAGE_REGEX: Regex = Regex::new(r"(?i)\.(gif|jpg|png)$").unwrap();
    }
    IMAGE_REGEX.is_match(url)
}

/// Image attachments of the export. Attachments of other types (pdf, mp3, ...) are skipped.
pub fn collect_images(tree: &Element) -> Result<Vec<AttachmentImage>, ExtractError> {
    let mut images = vec![];
    for item in items_of_type(tree, "attachment")? {
        let url = item.field("attachment_url")?;
        if !is_image_url(url) {
            debug!("Skipping attachment #{} - not an image: {}", item.index, url);
            continue;
        }

        images.push(AttachmentImage {
            id: item.field("post_id")?.to_string(),
            post_id: item.field("post_parent")?.to_string(),
            url: url.to_string(),
        });
    }
    Ok(images)
}

pub fn collect_posts(tree: &Element) -> Result<Vec<Post>, ExtractError> {
    let mut posts = vec![];
    for item in items_of_type(tree, "post")? {
        let id = item.field("post_id")?.to_string();
        let cover_image_id = item.cover_image_id()?;
        let slug = item.field("post_name")?.to_string();
        let title = item.raw_field("title")?.to_string();
        let pub_date = item.field("pubDate")?;
        let date = match rfc2822_to_iso(pub_date) {
            Ok(date) => date,
            Err(source) => {
                return Err(ExtractError::InvalidDate { post_id: id, value: pub_date.to_string(), source });
            }
        };
        let content = item.body()?.to_string();

        posts.push(Post {
            meta: PostMeta {
                id,
                cover_image_id,
                ..Default::default()
            },
            frontmatter: Frontmatter {
                slug,
                title,
                date,
                cover_image_filename: None,
            },
            content,
        });
    }
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use crate::export_tree::parse_tree;
    use crate::test_data::{EMPTY_EXPORT, EXPORT_DATA};

    use super::*;

    #[test]
    fn test_image_extension() {
        assert!(is_image_url("https://x.com/a.png"));
        assert!(is_image_url("https://x.com/a.JPG"));
        assert!(is_image_url("/up/a.Gif"));
        assert!(!is_image_url("https://x.com/a.bmp"));
        assert!(!is_image_url("https://x.com/a"));
        assert!(!is_image_url("https://x.com/a.jpeg"));
        assert!(!is_image_url("https://x.com/a.png?w=300"));
    }

    #[test]
    fn test_collect_images() {
        let tree = parse_tree(EXPORT_DATA).unwrap();
        let images = collect_images(&tree).unwrap();
        let ids: Vec<&str> = images.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["10", "11", "13"]);
        assert_eq!(images[1], AttachmentImage {
            id: "11".to_string(),
            post_id: "5".to_string(),
            url: "https://blog.example.com/wp-content/uploads/2019/01/b.JPG".to_string(),
        });
        assert_eq!(images[2].post_id, "99");
    }

    #[test]
    fn test_collect_posts() {
        let tree = parse_tree(EXPORT_DATA).unwrap();
        let posts = collect_posts(&tree).unwrap();
        assert_eq!(posts.len(), 2);

        let hello = &posts[0];
        assert_eq!(hello.meta.id, "5");
        assert_eq!(hello.meta.cover_image_id.as_deref(), Some("11"));
        assert!(hello.meta.image_urls.is_empty());
        assert_eq!(hello.frontmatter.slug, "hello-world");
        assert_eq!(hello.frontmatter.title, "Hello world");
        assert_eq!(hello.frontmatter.date, "2019-01-01T12:00:00.000Z");
        assert!(hello.content.starts_with("<p>Welcome to the blog.</p>"));
        assert!(hello.content.ends_with("b.jpg\" />"));

        let about = &posts[1];
        assert_eq!(about.meta.cover_image_id, None);
        assert_eq!(about.frontmatter.title, r#"About "me""#);
        assert_eq!(about.frontmatter.date, "2022-04-20T14:00:00.000Z");
        assert_eq!(about.content, "I write code.");
    }

    #[test]
    fn test_title_is_kept_raw() {
        let xml = "<rss><channel><item>
            <title>  Hello world </title>
            <pubDate>Tue, 01 Jan 2019 12:00:00 +0000</pubDate>
            <encoded>  body  </encoded>
            <post_id> 4 </post_id>
            <post_name> hello-world </post_name>
            <post_type>post</post_type>
        </item></channel></rss>";
        let tree = parse_tree(xml).unwrap();
        let posts = collect_posts(&tree).unwrap();
        assert_eq!(posts[0].frontmatter.title, "  Hello world ");
        assert_eq!(posts[0].frontmatter.slug, "hello-world");
        assert_eq!(posts[0].meta.id, "4");
        assert_eq!(posts[0].content, "body");
    }

    #[test]
    fn test_empty_export() {
        let tree = parse_tree(EMPTY_EXPORT).unwrap();
        assert!(collect_images(&tree).unwrap().is_empty());
        assert!(collect_posts(&tree).unwrap().is_empty());
    }

    #[test]
    fn test_missing_channel() {
        let tree = parse_tree("<rss></rss>").unwrap();
        assert!(matches!(collect_posts(&tree), Err(ExtractError::MissingChannel)));
    }

    #[test]
    fn test_structural_error() {
        let xml = "<rss><channel>
            <item><post_type>attachment</post_type><post_id>1</post_id><attachment_url>a.png</attachment_url></item>
        </channel></rss>";
        let tree = parse_tree(xml).unwrap();
        let err = collect_images(&tree).unwrap_err();
        assert!(matches!(err, ExtractError::MissingField { kind: "attachment", index: 0, field: "post_parent" }));

        let xml = "<rss><channel><item><title>x</title></item></channel></rss>";
        let tree = parse_tree(xml).unwrap();
        let err = collect_posts(&tree).unwrap_err();
        assert!(matches!(err, ExtractError::MissingField { kind: "item", index: 0, field: "post_type" }));
    }

    #[test]
    fn test_invalid_date() {
        let xml = "<rss><channel><item>
            <title>Draft</title>
            <pubDate>Mon, 30 Nov -0001 00:00:00 +0000</pubDate>
            <encoded></encoded>
            <post_id>3</post_id>
            <post_name>draft</post_name>
            <post_type>post</post_type>
        </item></channel></rss>";
        let tree = parse_tree(xml).unwrap();
        let err = collect_posts(&tree).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidDate { ref post_id, .. } if post_id == "3"));
    }
}
