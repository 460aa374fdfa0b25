//! Domain entities - the core business objects.

mod author;
mod category;
mod post;
mod slug;
mod tag;

pub use author::Author;
pub use category::{Category, CategoryFacet};
pub use post::{Post, PostStatus};
pub use slug::slugify;
pub use tag::{Tag, TagFacet};
