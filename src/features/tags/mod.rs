//! Tags feature.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/tags?search=` | List, or search by name |
//! | POST | `/api/tags` | Create tag |
//! | GET | `/api/tags/{id}` | Get tag |
//! | PUT | `/api/tags/{id}` | Partial update |
//! | DELETE | `/api/tags/{id}` | Delete tag |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;

pub use services::TagService;
pub use stores::TagStore;
