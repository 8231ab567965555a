pub mod articles;
pub mod cache;
pub mod categories;
pub mod tags;
pub mod users;
