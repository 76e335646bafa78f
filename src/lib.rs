//! Marvin library exports for testing

pub mod core;
pub mod reveal;
pub mod scope;
pub mod tui;

#[cfg(test)]
pub mod test_support;
