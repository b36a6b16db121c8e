//! Database entities

pub mod api_usage;

pub use api_usage::Entity as ApiUsage;
