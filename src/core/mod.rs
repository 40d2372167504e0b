pub mod agility;
pub mod markup;
pub mod page;
pub mod render;

pub use crate::domain::model::{ContentList, Post, PostFields, RenderedPost};
pub use crate::domain::ports::{ConfigProvider, ContentSource, Storage};
pub use crate::utils::error::Result;
