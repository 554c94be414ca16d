use std::fmt;
use std::fmt::{Display, Formatter};

/// Image attachment of the export, already filtered by extension.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentImage {
    pub id: String,
    /// Id of the post owning this image. It may reference a post missing from the export.
    pub post_id: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostMeta {
    pub id: String,
    pub cover_image_id: Option<String>,
    pub image_urls: Vec<String>,
    pub cover_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    pub slug: String,
    pub title: String,
    /// ISO-8601 in UTC with milliseconds, e.g. 2019-01-01T12:00:00.000Z
    pub date: String,
    pub cover_image_filename: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Post {
    pub meta: PostMeta,
    pub frontmatter: Frontmatter,
    pub content: String,
}

impl Frontmatter {
    /// Key/value pairs in the order they are written to the document header
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        let mut entries = vec![
            ("slug", self.slug.as_str()),
            ("title", self.title.as_str()),
            ("date", self.date.as_str()),
        ];
        if let Some(ref file_name) = self.cover_image_filename {
            entries.push(("coverImageFilename", file_name.as_str()));
        }
        entries
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "id={}, slug={}, date={}, images={}\ntitle={}",
               self.meta.id,
               self.frontmatter.slug,
               self.frontmatter.date,
               self.meta.image_urls.len(),
               self.frontmatter.title,
        )
    }
}

/// Last path segment of an image url, used as the file name on disk
pub fn url_basename(url: &str) -> &str {
    match url.rfind('/') {
        Some(pos) => &url[pos + 1..],
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_basename() {
        assert_eq!(url_basename("https://blog.example.com/wp-content/uploads/2019/01/cat.jpg"), "cat.jpg");
        assert_eq!(url_basename("/uploads/dog.png"), "dog.png");
        assert_eq!(url_basename("a.png"), "a.png");
    }

    #[test]
    fn test_entries_order() {
        let mut fm = Frontmatter {
            slug: "hello-world".to_string(),
            title: "Hello".to_string(),
            date: "2019-01-01T12:00:00.000Z".to_string(),
            cover_image_filename: None,
        };
        let keys: Vec<&str> = fm.entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["slug", "title", "date"]);

        fm.cover_image_filename = Some("b.jpg".to_string());
        let keys: Vec<&str> = fm.entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["slug", "title", "date", "coverImageFilename"]);
    }
}
