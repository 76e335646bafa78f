//! Prompt assembly for scope generation.
//!
//! The instruction template is fixed; only the three brief fields vary.
//! The JSON structure sample at the end is load-bearing: combined with the
//! forced-JSON response mode it keeps the model's reply machine-parseable.

use crate::scope::types::ScopeBrief;

/// System directive sent as the first message of every request.
pub const SYSTEM_DIRECTIVE: &str = "You are a helpful assistant that generates \
    a list of components for a given project scope.";

/// Builds the user instruction embedding the three raw brief fields.
pub fn user_prompt(brief: &ScopeBrief) -> String {
    format!(
        "Generate a comprehensive project scope for a {sector} company located in {location}. \
The project aims to {required_scope}.

Please provide 4 main components of the project, each with:
- A descriptive title
- A brief overview (2-3 sentences) explaining its significance
- 4 detailed bullet points of specific tasks or considerations, including examples or case studies where applicable.

Format the response as a JSON object with this structure:
{{
\"components\": [
    {{
    \"title\": \"Component Name\",
    \"overview\": \"Brief overview of the component.\",
    \"items\": [\"task 1\", \"task 2\", \"task 3\", \"task 4\"]
    }}
]
}}",
        sector = brief.sector.trim(),
        location = brief.location.trim(),
        required_scope = brief.required_scope.trim(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_brief() -> ScopeBrief {
        ScopeBrief::new(
            "education",
            "noida",
            "attract more small to medium sized businesses for growth.",
        )
    }

    #[test]
    fn test_user_prompt_embeds_raw_brief_fields() {
        let prompt = user_prompt(&example_brief());
        assert!(prompt.contains("a education company located in noida"));
        assert!(prompt.contains("attract more small to medium sized businesses for growth."));
    }

    #[test]
    fn test_user_prompt_carries_schema_directive() {
        let prompt = user_prompt(&example_brief());
        assert!(prompt.contains("4 main components"));
        assert!(prompt.contains("\"components\": ["));
        assert!(prompt.contains("\"task 1\", \"task 2\", \"task 3\", \"task 4\""));
    }

    #[test]
    fn test_user_prompt_trims_fields() {
        let brief = ScopeBrief::new("  retail ", " dubai ", " grow online sales ");
        let prompt = user_prompt(&brief);
        assert!(prompt.contains("a retail company located in dubai"));
        assert!(prompt.contains("aims to grow online sales."));
    }

    #[test]
    fn test_user_prompt_leaves_no_placeholder_tokens() {
        let prompt = user_prompt(&example_brief());
        assert!(!prompt.contains("{sector}"));
        assert!(!prompt.contains("{location}"));
        assert!(!prompt.contains("{required_scope}"));
    }
}
