use std::sync::Arc;

use crate::core::colour_mapping::map::ColourScheme;
use crate::core::colour_mapping::schemes::{self, DEFAULT_SCHEME};

/// Name to scheme lookup.
///
/// Owned by whoever builds an engine and passed in explicitly, so tests can
/// register their own schemes without touching a global. Lookups of unknown
/// names through [`resolve`](Self::resolve) fall back to the default scheme.
#[derive(Clone)]
pub struct ColourSchemeRegistry {
    entries: Vec<(String, Arc<dyn ColourScheme>)>,
    default_name: String,
}

impl ColourSchemeRegistry {
    /// Creates a registry holding only `default_scheme`.
    pub fn new(default_name: impl Into<String>, default_scheme: impl ColourScheme + 'static) -> Self {
        let default_name = default_name.into();

        Self {
            entries: vec![(default_name.clone(), Arc::new(default_scheme))],
            default_name,
        }
    }

    /// Every built-in scheme, with "Fire Palette" as the default.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new(DEFAULT_SCHEME, schemes::fire_palette);

        for &(name, scheme) in &schemes::BUILTIN[1..] {
            registry.register(name, scheme);
        }

        registry
    }

    /// Adds a scheme, replacing any existing one of the same name in place.
    pub fn register(&mut self, name: impl Into<String>, scheme: impl ColourScheme + 'static) {
        let name = name.into();
        let scheme: Arc<dyn ColourScheme> = Arc::new(scheme);

        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = scheme,
            None => self.entries.push((name, scheme)),
        }
    }

    /// Makes an already registered scheme the fallback. Returns `false` for
    /// unknown names.
    pub fn set_default(&mut self, name: &str) -> bool {
        if !self.contains(name) {
            return false;
        }

        self.default_name = name.to_owned();
        true
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn ColourScheme>> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, scheme)| Arc::clone(scheme))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == name)
    }

    #[must_use]
    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// Looks up `name`, falling back to the default scheme when unknown.
    #[must_use]
    pub fn resolve(&self, name: &str) -> (&str, Arc<dyn ColourScheme>) {
        let entry = self
            .entries
            .iter()
            .find(|(existing, _)| existing == name)
            .or_else(|| self.entries.iter().find(|(existing, _)| *existing == self.default_name))
            .unwrap_or(&self.entries[0]);

        (entry.0.as_str(), Arc::clone(&entry.1))
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ColourSchemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for ColourSchemeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColourSchemeRegistry")
            .field("schemes", &self.names().collect::<Vec<_>>())
            .field("default_name", &self.default_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;

    fn solid(colour: Colour) -> impl Fn(u32, u32) -> Colour + Send + Sync {
        move |_, _| colour
    }

    #[test]
    fn builtin_lists_every_scheme_in_order() {
        let registry = ColourSchemeRegistry::builtin();
        let names: Vec<&str> = registry.names().collect();

        assert_eq!(names.len(), schemes::BUILTIN.len());
        assert_eq!(names[0], "Fire Palette");
        assert_eq!(names[1], "Hyperbolic Tessellation");
        assert_eq!(registry.default_name(), "Fire Palette");
    }

    #[test]
    fn get_unknown_name_is_none() {
        let registry = ColourSchemeRegistry::builtin();

        assert!(registry.get("No Such Scheme").is_none());
        assert!(registry.get("Ocean Depths").is_some());
    }

    #[test]
    fn resolve_falls_back_to_default() {
        let mut registry = ColourSchemeRegistry::new("Red", solid(Colour::new(255, 0, 0)));
        registry.register("Blue", solid(Colour::new(0, 0, 255)));

        let (name, scheme) = registry.resolve("Green");
        assert_eq!(name, "Red");
        assert_eq!(scheme.colour(1, 2), Colour::new(255, 0, 0));

        let (name, scheme) = registry.resolve("Blue");
        assert_eq!(name, "Blue");
        assert_eq!(scheme.colour(1, 2), Colour::new(0, 0, 255));
    }

    #[test]
    fn register_replaces_existing_name() {
        let mut registry = ColourSchemeRegistry::new("Only", solid(Colour::BLACK));
        registry.register("Only", solid(Colour::WHITE));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve("Only").1.colour(0, 1), Colour::WHITE);
    }

    #[test]
    fn set_default_requires_registered_name() {
        let mut registry = ColourSchemeRegistry::builtin();

        assert!(!registry.set_default("Nope"));
        assert!(registry.set_default("Ocean Depths"));
        assert_eq!(registry.resolve("Nope").0, "Ocean Depths");
    }

    #[test]
    fn independent_registries_do_not_share_state() {
        let mut a = ColourSchemeRegistry::builtin();
        let b = ColourSchemeRegistry::builtin();

        a.register("Custom", solid(Colour::WHITE));

        assert!(a.contains("Custom"));
        assert!(!b.contains("Custom"));
    }
}
