pub mod config;
pub mod validation;

pub use config::{ProviderConfig, ProviderType};
pub use validation::{provider_type_slug, validate_provider, ValidationResult};
