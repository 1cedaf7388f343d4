// Light/dark theme preference

use crate::store::Store;
use tracing::debug;

/// Persisted dark-mode flag; light (`false`) unless stored otherwise
pub struct Theme<S: Store<bool>> {
    dark: bool,
    store: S,
}

impl<S: Store<bool>> Theme<S> {
    pub fn load(store: S) -> Self {
        let dark = store.load();
        Self { dark, store }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Flip between light and dark, returning the new setting
    pub fn toggle(&mut self) -> bool {
        self.set_dark(!self.dark);
        self.dark
    }

    pub fn set_dark(&mut self, dark: bool) {
        self.dark = dark;
        debug!(dark, "Theme changed");
        self.store.save(&self.dark);
    }

    /// Human-facing name of the current mode
    pub fn label(&self) -> &'static str {
        if self.dark { "Dark mode" } else { "Light mode" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::rc::Rc;

    #[test]
    fn test_defaults_to_light() {
        let theme = Theme::load(MemoryStore::new(false));
        assert!(!theme.is_dark());
        assert_eq!(theme.label(), "Light mode");
    }

    #[test]
    fn test_toggle_persists() {
        let store = Rc::new(MemoryStore::new(false));
        let mut theme = Theme::load(store.clone());

        assert!(theme.toggle());
        assert!(store.snapshot());
        assert_eq!(theme.label(), "Dark mode");

        assert!(!theme.toggle());
        assert!(!store.snapshot());
        assert_eq!(store.save_count(), 2);
    }

    #[test]
    fn test_loads_stored_preference() {
        let theme = Theme::load(MemoryStore::new(true));
        assert!(theme.is_dark());
    }
}
