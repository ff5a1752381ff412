//! URL slugs for links back to the post a revision list belongs to.

use crate::revision::PostType;
use crate::types::DbId;

/// Longest slug emitted in a question URL, in characters.
pub const MAX_SLUG_CHARS: usize = 50;

/// Generate a URL-safe slug from a post title.
///
/// Lowercases, replaces every non-alphanumeric character with a hyphen,
/// collapses consecutive hyphens, trims leading/trailing hyphens and
/// truncates to [`MAX_SLUG_CHARS`] on a word boundary where possible.
pub fn generate_slug(title: &str) -> String {
    let mut result = String::with_capacity(title.len());
    let mut prev_hyphen = true;
    for c in title.to_lowercase().chars() {
        if c.is_alphanumeric() {
            result.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            result.push('-');
            prev_hyphen = true;
        }
    }

    let mut slug = result.trim_matches('-').to_string();
    if slug.chars().count() > MAX_SLUG_CHARS {
        slug = slug.chars().take(MAX_SLUG_CHARS).collect();
        if let Some(cut) = slug.rfind('-') {
            slug.truncate(cut);
        }
    }
    slug
}

/// Site-relative URL of the page showing a post.
///
/// Questions link to their own page; answers link to their question with the
/// answer anchored. Other post kinds have no standalone page.
pub fn post_path(
    post_type: PostType,
    post_id: DbId,
    parent_id: Option<DbId>,
    title: &str,
) -> Option<String> {
    let slug = generate_slug(title);
    let base = |id: DbId| {
        if slug.is_empty() {
            format!("/{id}")
        } else {
            format!("/{id}/{slug}")
        }
    };

    match post_type {
        PostType::Question => Some(base(post_id)),
        PostType::Answer => {
            parent_id.map(|question_id| format!("{}?show={post_id}#a{post_id}", base(question_id)))
        }
        PostType::Comment | PostType::Other => None,
    }
}
