use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of scope components a well-formed reply must carry.
pub const EXPECTED_COMPONENTS: usize = 4;
/// Number of item strings each component must carry.
pub const ITEMS_PER_COMPONENT: usize = 4;

/// The three free-text inputs that make up a project brief.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScopeBrief {
    pub sector: String,
    pub location: String,
    pub required_scope: String,
}

impl ScopeBrief {
    pub fn new(sector: &str, location: &str, required_scope: &str) -> Self {
        Self {
            sector: sector.to_string(),
            location: location.to_string(),
            required_scope: required_scope.to_string(),
        }
    }

    /// True iff all three fields are non-empty after trimming.
    /// Generation must not be triggered for an incomplete brief.
    pub fn is_complete(&self) -> bool {
        !self.sector.trim().is_empty()
            && !self.location.trim().is_empty()
            && !self.required_scope.trim().is_empty()
    }
}

/// One of the four returned project-scope sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeComponent {
    pub title: String,
    pub overview: String,
    pub items: Vec<String>,
}

/// The parsed model reply: an ordered list of scope components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeResponse {
    pub components: Vec<ScopeComponent>,
}

/// A structural violation found while validating a parsed reply.
#[derive(Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// Wrong number of components (expected, got).
    ComponentCount(usize, usize),
    /// Wrong number of items in the component at this index (index, got).
    ItemCount(usize, usize),
    /// Empty title in the component at this index.
    EmptyTitle(usize),
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::ComponentCount(expected, got) => {
                write!(f, "expected {expected} components, got {got}")
            }
            ShapeError::ItemCount(index, got) => {
                write!(
                    f,
                    "component {index}: expected {ITEMS_PER_COMPONENT} items, got {got}"
                )
            }
            ShapeError::EmptyTitle(index) => write!(f, "component {index}: empty title"),
        }
    }
}

impl std::error::Error for ShapeError {}

impl ScopeResponse {
    /// Validates the reply shape before it is exposed to the rest of the app:
    /// exactly four components, each with a non-empty title and exactly four
    /// items. The renderer never has to guard against missing fields.
    pub fn validate(&self) -> Result<(), ShapeError> {
        if self.components.len() != EXPECTED_COMPONENTS {
            return Err(ShapeError::ComponentCount(
                EXPECTED_COMPONENTS,
                self.components.len(),
            ));
        }
        for (index, component) in self.components.iter().enumerate() {
            if component.title.trim().is_empty() {
                return Err(ShapeError::EmptyTitle(index));
            }
            if component.items.len() != ITEMS_PER_COMPONENT {
                return Err(ShapeError::ItemCount(index, component.items.len()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_scope;

    #[test]
    fn test_brief_complete_requires_all_fields() {
        let mut brief = ScopeBrief::new("education", "noida", "attract more SMBs");
        assert!(brief.is_complete());

        brief.location = String::new();
        assert!(!brief.is_complete());

        brief.location = "   ".to_string();
        assert!(!brief.is_complete());
    }

    #[test]
    fn test_validate_accepts_well_formed_reply() {
        assert_eq!(sample_scope().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_wrong_component_count() {
        let mut scope = sample_scope();
        scope.components.pop();
        assert_eq!(scope.validate(), Err(ShapeError::ComponentCount(4, 3)));
    }

    #[test]
    fn test_validate_rejects_wrong_item_count() {
        let mut scope = sample_scope();
        scope.components[2].items.push("extra task".to_string());
        assert_eq!(scope.validate(), Err(ShapeError::ItemCount(2, 5)));
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let mut scope = sample_scope();
        scope.components[1].title = "  ".to_string();
        assert_eq!(scope.validate(), Err(ShapeError::EmptyTitle(1)));
    }

    #[test]
    fn test_scope_response_deserializes_from_model_json() {
        let json = r#"{
            "components": [
                {"title": "A", "overview": "a.", "items": ["1","2","3","4"]},
                {"title": "B", "overview": "b.", "items": ["1","2","3","4"]},
                {"title": "C", "overview": "c.", "items": ["1","2","3","4"]},
                {"title": "D", "overview": "d.", "items": ["1","2","3","4"]}
            ]
        }"#;
        let scope: ScopeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(scope.validate(), Ok(()));
        assert_eq!(scope.components[0].title, "A");
    }
}
