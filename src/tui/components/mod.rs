pub mod brief_form;
pub mod scope_card;
pub mod thinking;

pub use brief_form::{BriefForm, FORM_HEIGHT, FormEvent};
pub use scope_card::ScopeCard;
pub use thinking::ThinkingIndicator;
