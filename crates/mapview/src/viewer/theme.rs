//! Colour theme preference.

use std::collections::HashMap;
use std::fmt;

/// Storage key of the persisted theme.
pub const THEME_KEY: &str = "theme";

/// Colour theme of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String key-value storage, the shape of a browser's `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Theme preference backed by a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct ThemeSettings<S> {
    store: S,
    theme: Theme,
}

impl<S: KeyValueStore> ThemeSettings<S> {
    /// Read the stored preference.
    ///
    /// A stored `"dark"` wins, a stored `"light"` wins, anything else falls
    /// back to the OS preference.
    pub fn load(store: S, prefers_dark: bool) -> Self {
        let setting = store.get(THEME_KEY);
        let dark = match setting.as_deref() {
            Some("dark") => true,
            Some("light") => false,
            _ => prefers_dark,
        };

        Self {
            store,
            theme: if dark { Theme::Dark } else { Theme::Light },
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and persist the new value.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.flipped();
        self.store.set(THEME_KEY, self.theme.as_str());
        self.theme
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
