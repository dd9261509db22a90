//! Oracle-specific translation: placeholders, bindings and error classification.

mod bindings;
mod classify;
mod placeholders;

pub use bindings::{prep_bindings, TranslatedBindings};
pub use classify::{ErrorCatalog, ErrorClass, ORACLE_FATAL_PREFIXES};
pub use placeholders::position_bindings;
