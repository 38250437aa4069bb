//! Content module - front-matter documents, posts and the post index

mod frontmatter;
mod index;
pub mod loader;
mod post;

pub use frontmatter::{parse, Document, MetaValue, Metadata, RESERVED_LIST_KEY};
pub use index::{PostIndex, PostSummary};
pub(crate) use index::search_needle;
pub use loader::{ContentLoader, LoadError};
pub use post::Post;
