//! Articles feature.
//!
//! Articles reference categories and tags by id only; those references are
//! not checked against the other stores.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/articles` | Filtered, paginated list |
//! | POST | `/api/articles` | Create article |
//! | GET | `/api/articles/{id}` | Get article |
//! | GET | `/api/articles/slug/{slug}` | Get article by slug |
//! | POST | `/api/articles/{id}/views` | Increment view count |
//! | PUT | `/api/articles/{id}` | Partial update |
//! | DELETE | `/api/articles/{id}` | Delete article |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;

pub use services::ArticleService;
pub use stores::ArticleStore;
