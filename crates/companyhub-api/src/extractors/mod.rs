//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod media_type;
pub mod path;
pub mod query;
pub mod version;

pub use auth::AuthUser;
pub use json::JsonBody;
pub use media_type::{AcceptMediaType, OutputFormat};
pub use query::QueryParams;
pub use version::ApiVersion;
