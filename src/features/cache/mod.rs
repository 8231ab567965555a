//! Cache administration.
//!
//! Inspects and evicts entries of the shared in-process cache. Mounted
//! behind the Swagger basic auth when credentials are configured.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/cache/{prefix}/{key}` | Entry liveness and TTL |
//! | PUT | `/api/cache/{prefix}/{key}/ttl` | Reset entry TTL |
//! | DELETE | `/api/cache/{prefix}/{key}` | Evict one entry |
//! | DELETE | `/api/cache` | Evict everything |
//!
//! `prefix` is one of `article`, `user`, `category`, `tag`, `comment`.
//! Evicting `category/tree` forces the next tree read to rebuild.

pub mod dtos;
pub mod handlers;
pub mod routes;
