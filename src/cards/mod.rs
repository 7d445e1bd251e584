//! Card model: immutable templates, mutable instances, and the registry.

pub mod instance;
pub mod registry;
pub mod template;

pub use instance::CardInstance;
pub use registry::CardRegistry;
pub use template::{CardId, CardTemplate, CardType, Keyword};
