//! HTML sanitization for post bodies.
//!
//! Two modes: [`sanitize_body`] keeps a small allow-list of formatting markup
//! and is applied before a body is stored; [`preview_body`] strips everything
//! and truncates, for list views.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use ammonia::Builder;

/// Character ceiling for list previews.
pub const PREVIEW_LENGTH: usize = 200;

/// Appended to a preview that was cut short.
pub const PREVIEW_SUFFIX: &str = "...";

const ALLOWED_TAGS: [&str; 13] = [
    "h1",
    "h2",
    "b",
    "i",
    "u",
    "s",
    "p",
    "ul",
    "ol",
    "li",
    "blockquote",
    "a",
    "img",
];

const ALLOWED_SCHEMES: [&str; 2] = ["data", "http"];

// Elements whose text is dropped along with the tag.
const CONTENT_TAGS: [&str; 2] = ["script", "style"];

static PERSIST: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let tag_attributes = HashMap::from([
        ("a", HashSet::from(["href", "name", "target"])),
        ("img", HashSet::from(["src"])),
        ("li", HashSet::from(["class"])),
    ]);

    let mut builder = Builder::default();
    builder
        .tags(HashSet::from(ALLOWED_TAGS))
        .clean_content_tags(HashSet::from(CONTENT_TAGS))
        .generic_attributes(HashSet::new())
        .tag_attributes(tag_attributes)
        .url_schemes(HashSet::from(ALLOWED_SCHEMES))
        .link_rel(None);
    builder
});

static STRIP_ALL: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut builder = Builder::empty();
    builder.clean_content_tags(HashSet::from(CONTENT_TAGS));
    builder
});

/// Sanitize a body for storage.
///
/// Tags outside the allow-list are removed but their text is kept, except for
/// `script` and `style` whose content goes too.
pub fn sanitize_body(html: &str) -> String {
    PERSIST.clean(html).to_string()
}

/// Strip all markup and cut to [`PREVIEW_LENGTH`] characters.
///
/// The result is HTML-escaped text (`&` comes back as `&amp;`), so clients
/// render it as markup rather than escaping it again. The cut counts escaped
/// characters and may split an entity.
pub fn preview_body(html: &str) -> String {
    let text = STRIP_ALL.clean(html).to_string();

    if text.chars().count() <= PREVIEW_LENGTH {
        return text;
    }

    let mut preview: String = text.chars().take(PREVIEW_LENGTH).collect();
    preview.push_str(PREVIEW_SUFFIX);
    preview
}
