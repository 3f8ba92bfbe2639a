pub mod contributions;
pub mod error;
pub mod models;
pub mod rest;

pub use error::ApiError;
pub use models::*;
pub use rest::GithubClient;
