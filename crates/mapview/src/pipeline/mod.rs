//! Host pipeline contract.
//!
//! The visualizer lives inside someone else's build pipeline. This module
//! describes what it needs from that host: a per-file `transform` hook, a
//! combined source map accessor, lifecycle hooks around the session and a
//! mutable, ordered plugin list.
//!
//! [`Pipeline`] is a small reference host that drives these hooks the way a
//! Vite-style plugin container does. Real hosts implement the same traits.

mod container;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

pub use container::{ChainContext, Pipeline};

/// Hook return type. Hosts decide how a failed hook is reported.
pub type HookResult<T> = anyhow::Result<T>;

/// Shared handle to a plugin, as stored in the host list.
pub type SharedPlugin = Arc<dyn Plugin>;

/// Plugin ordering key
///
/// The host orders plugins by phase (stable within a phase) before the
/// configuration hooks run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PluginPhase {
    /// Runs before normal plugins
    Pre = 0,

    /// Default phase
    #[default]
    Normal = 10,

    /// Runs after normal plugins
    Post = 20,
}

/// Per-request transform options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// The module is transformed for server-side rendering.
    pub ssr: bool,
}

impl TransformOptions {
    pub fn ssr() -> Self {
        Self { ssr: true }
    }

    pub fn web() -> Self {
        Self { ssr: false }
    }
}

/// Result of a transform hook or of a whole hook chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformOutput {
    pub code: String,
    pub map: Option<Value>,
}

impl TransformOutput {
    pub fn new(code: impl Into<String>, map: Option<Value>) -> Self {
        Self {
            code: code.into(),
            map,
        }
    }
}

/// Context handed to `transform` hooks.
pub trait TransformContext: Send + Sync {
    /// Source map describing every transform applied to the module so far,
    /// `Value::Null` when no earlier hook produced one.
    fn combined_sourcemap(&self) -> Value;
}

/// A pipeline plugin.
///
/// Every hook has a no-op default, so plugins only implement what they use.
#[async_trait]
pub trait Plugin: Send + Sync + fmt::Debug {
    /// Unique name used to find the plugin in the host list.
    fn name(&self) -> Cow<'static, str>;

    fn phase(&self) -> PluginPhase {
        PluginPhase::Normal
    }

    /// Called once before the plugin list is resolved.
    async fn config(&self) -> HookResult<()> {
        Ok(())
    }

    /// Called once with the resolved, phase-ordered plugin list.
    ///
    /// This is the only point where plugins may reorder the list; no
    /// transform has started yet.
    async fn config_resolved(&self, _plugins: &mut PluginList) -> HookResult<()> {
        Ok(())
    }

    /// Called for every module. `Ok(None)` leaves the code untouched.
    async fn transform(
        &self,
        _ctx: &dyn TransformContext,
        _code: &str,
        _id: &str,
        _options: TransformOptions,
    ) -> HookResult<Option<TransformOutput>> {
        Ok(None)
    }

    /// Called once after the last transform of the session.
    async fn build_end(&self) -> HookResult<()> {
        Ok(())
    }
}

/// Ordered list of plugins owned by the host.
#[derive(Clone, Default)]
pub struct PluginList {
    plugins: Vec<SharedPlugin>,
}

impl PluginList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedPlugin> {
        self.plugins.iter()
    }

    pub fn get(&self, index: usize) -> Option<&SharedPlugin> {
        self.plugins.get(index)
    }

    pub fn last(&self) -> Option<&SharedPlugin> {
        self.plugins.last()
    }

    /// Index of the first plugin named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.plugins.iter().position(|plugin| plugin.name() == name)
    }

    /// Number of plugins named `name`.
    pub fn count(&self, name: &str) -> usize {
        self.plugins
            .iter()
            .filter(|plugin| plugin.name() == name)
            .count()
    }

    /// Remove and return the plugin at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> SharedPlugin {
        self.plugins.remove(index)
    }

    pub fn push(&mut self, plugin: SharedPlugin) {
        self.plugins.push(plugin);
    }

    /// Plugin names in list order.
    pub fn names(&self) -> Vec<String> {
        self.plugins
            .iter()
            .map(|plugin| plugin.name().into_owned())
            .collect()
    }

    /// Stable sort by [`Plugin::phase`].
    pub fn sort_by_phase(&mut self) {
        self.plugins.sort_by_key(|plugin| plugin.phase());
    }
}

impl fmt::Debug for PluginList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl FromIterator<SharedPlugin> for PluginList {
    fn from_iter<I: IntoIterator<Item = SharedPlugin>>(iter: I) -> Self {
        Self {
            plugins: iter.into_iter().collect(),
        }
    }
}

impl Extend<SharedPlugin> for PluginList {
    fn extend<I: IntoIterator<Item = SharedPlugin>>(&mut self, iter: I) {
        self.plugins.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Named(&'static str, PluginPhase);

    #[async_trait]
    impl Plugin for Named {
        fn name(&self) -> Cow<'static, str> {
            self.0.into()
        }

        fn phase(&self) -> PluginPhase {
            self.1
        }
    }

    fn list(entries: &[(&'static str, PluginPhase)]) -> PluginList {
        entries
            .iter()
            .map(|(name, phase)| Arc::new(Named(*name, *phase)) as SharedPlugin)
            .collect()
    }

    #[test]
    fn test_phase_order() {
        assert!(PluginPhase::Pre < PluginPhase::Normal);
        assert!(PluginPhase::Normal < PluginPhase::Post);
        assert_eq!(PluginPhase::default(), PluginPhase::Normal);
    }

    #[test]
    fn test_sort_by_phase_is_stable() {
        let mut plugins = list(&[
            ("post-a", PluginPhase::Post),
            ("normal-a", PluginPhase::Normal),
            ("pre", PluginPhase::Pre),
            ("post-b", PluginPhase::Post),
            ("normal-b", PluginPhase::Normal),
        ]);
        plugins.sort_by_phase();
        assert_eq!(
            plugins.names(),
            ["pre", "normal-a", "normal-b", "post-a", "post-b"]
        );
    }

    #[test]
    fn test_position_and_count() {
        let plugins = list(&[
            ("a", PluginPhase::Normal),
            ("b", PluginPhase::Normal),
            ("a", PluginPhase::Normal),
        ]);
        assert_eq!(plugins.position("a"), Some(0));
        assert_eq!(plugins.position("b"), Some(1));
        assert_eq!(plugins.position("c"), None);
        assert_eq!(plugins.count("a"), 2);
        assert_eq!(plugins.count("c"), 0);
    }

    #[test]
    fn test_remove_and_push() {
        let mut plugins = list(&[("a", PluginPhase::Normal), ("b", PluginPhase::Normal)]);
        let first = plugins.remove(0);
        plugins.push(first);
        assert_eq!(plugins.names(), ["b", "a"]);
        assert_eq!(format!("{plugins:?}"), r#"["b", "a"]"#);
    }

    #[test]
    fn test_transform_options() {
        assert!(TransformOptions::ssr().ssr);
        assert!(!TransformOptions::web().ssr);
        assert_eq!(TransformOptions::default(), TransformOptions::web());
    }
}
