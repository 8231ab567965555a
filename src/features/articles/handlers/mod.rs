pub mod article_handler;

pub use article_handler::*;
