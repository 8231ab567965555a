pub mod article_dto;

pub use article_dto::{
    ArticleQueryParams, ArticleResponseDto, ArticleStatus, CreateArticleDto, UpdateArticleDto,
};
