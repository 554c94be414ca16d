use std::collections::HashSet;

use spdlog::warn;

use crate::model::Post;
use crate::text_utils::slug_from_title;

fn is_usable(slug: &str) -> bool {
    !slug.is_empty() && slug != "." && slug != ".." && !slug.contains(&['/', '\\'][..])
}

fn fallback_slug(post: &Post) -> String {
    let slug = slug_from_title(&post.frontmatter.title);
    if slug.is_empty() {
        format!("post-{}", post.meta.id)
    } else {
        slug
    }
}

/// Makes every slug usable as a directory name and unique in the export.
/// Posts keep export order: the first one keeps its slug, later ones get `-2`, `-3`...
pub fn assign_unique_slugs(posts: &mut [Post]) {
    let mut taken: HashSet<String> = HashSet::with_capacity(posts.len());

    for post in posts.iter_mut() {
        let mut base = post.frontmatter.slug.clone();
        if !is_usable(&base) {
            let fallback = fallback_slug(post);
            warn!("Post {} has an unusable slug '{}'. Using '{}'", post.meta.id, base, fallback);
            base = fallback;
        }

        let mut slug = base.clone();
        let mut counter = 2;
        while taken.contains(&slug) {
            slug = format!("{}-{}", base, counter);
            counter += 1;
        }

        if slug != base {
            warn!("Slug '{}' of post {} is already in use. Writing it to '{}'", base, post.meta.id, slug);
        }

        taken.insert(slug.clone());
        post.frontmatter.slug = slug;
    }
}
