//! Card registry - template lookup by ID.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::template::{CardId, CardTemplate};

/// Stores card templates for lookup during a match.
///
/// Populated once at setup; the engine only reads from it afterwards.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CardRegistry {
    templates: FxHashMap<CardId, CardTemplate>,
}

impl CardRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template. Replaces any previous template with the same ID.
    pub fn register(&mut self, template: CardTemplate) {
        self.templates.insert(template.id, template);
    }

    /// Look up a template.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardTemplate> {
        self.templates.get(&id)
    }

    /// Does the registry contain a template?
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.templates.contains_key(&id)
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Is the registry empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate all templates.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.templates.values()
    }
}
