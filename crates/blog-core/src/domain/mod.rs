//! Domain entities - the core business objects.

mod pagination;
mod post;

pub use pagination::{DEFAULT_PAGE_SIZE, PageRequest, last_page};
pub use post::{Author, Post, PostFilter, PostPage, PostPatch, parse_post_id};
