pub mod article;
pub mod key;

pub use article::{Article, Source};
pub use key::FetchKey;
