pub mod clock;
pub mod constants;
pub mod store;
pub mod types;
pub mod validation;
