pub mod prompt;
pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{GenerationParams, ProviderError, ScopeProvider};
pub use providers::GroqProvider;
pub use types::{
    EXPECTED_COMPONENTS, ITEMS_PER_COMPONENT, ScopeBrief, ScopeComponent, ScopeResponse,
    ShapeError,
};
