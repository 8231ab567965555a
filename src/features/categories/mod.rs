//! Category hierarchy feature.
//!
//! Categories are stored flat with an optional parent reference and served
//! either as a sorted list or as a nested tree.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/categories?tree=true` | Flat list or tree |
//! | POST | `/api/categories` | Create category |
//! | GET | `/api/categories/{id}` | Get category |
//! | PUT | `/api/categories/{id}` | Partial update |
//! | DELETE | `/api/categories/{id}` | Delete (no cascade) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;

pub use services::CategoryService;
pub use stores::CategoryStore;
