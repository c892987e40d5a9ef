//! Input handling module

pub mod glob_resolver;
pub mod kind;

pub use glob_resolver::resolve_patterns;
pub use kind::InputKind;
