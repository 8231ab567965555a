//! Users feature.
//!
//! Emails are unique and compared case-insensitively. Credentials are not
//! stored here.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/users` | Paginated list |
//! | POST | `/api/users` | Create user |
//! | GET | `/api/users/{id}` | Get user |
//! | GET | `/api/users/email/{email}` | Get user by email |
//! | PUT | `/api/users/{id}` | Partial update, profile upsert |
//! | DELETE | `/api/users/{id}` | Delete user |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;

pub use services::UserService;
pub use stores::UserStore;
