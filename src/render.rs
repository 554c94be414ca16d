use std::borrow::Cow;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::model::Post;

pub const INDEX_FILE_NAME: &str = "index.md";
pub const IMAGES_DIR_NAME: &str = "images";

/// A post ready to be written: where it goes and the full markdown document
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPost {
    pub dir: PathBuf,
    pub index_path: PathBuf,
    pub images_dir: PathBuf,
    pub content: String,
}

/// Escapes a value to be used inside a double-quoted frontmatter string.
/// Plain values are returned untouched.
fn escape_value(value: &str) -> Cow<'_, str> {
    if !value.contains(&['"', '\\', '\n', '\r'][..]) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn render_header(post: &Post) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "---");
    for (key, value) in post.frontmatter.entries() {
        let _ = writeln!(&mut buf, "{}: \"{}\"", key, escape_value(value));
    }
    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf);
    buf
}

pub fn render_document(post: &Post) -> String {
    let mut buf = render_header(post);
    buf.push_str(&post.content);
    buf.push('\n');
    buf
}

pub fn render(post: &Post, output_dir: &Path) -> RenderedPost {
    let dir = output_dir.join(&post.frontmatter.slug);
    RenderedPost {
        index_path: dir.join(INDEX_FILE_NAME),
        images_dir: dir.join(IMAGES_DIR_NAME),
        dir,
        content: render_document(post),
    }
}
