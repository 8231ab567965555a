pub mod category_service;
pub mod tree_builder;

pub use category_service::CategoryService;
