//! Reference plugin container.
//!
//! Drives plugins through one session:
//!
//! ```text
//! new (phase sort) → configure (config, config_resolved) → transform_request* → close (build_end)
//! ```
//!
//! `transform_request` takes `&self`, so any number of requests may be in
//! flight at once; the plugin list can only change inside `configure`.

use anyhow::Context;
use serde_json::Value;
use tracing::debug;

use super::{
    HookResult, PluginList, SharedPlugin, TransformContext, TransformOptions, TransformOutput,
};

/// Transform context of one hook chain.
///
/// Tracks the newest map returned by an earlier hook and reports it as the
/// combined map. Hosts that collapse map chains provide their own context.
#[derive(Debug, Clone, Default)]
pub struct ChainContext {
    latest_map: Option<Value>,
}

impl ChainContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, map: Value) {
        if !map.is_null() {
            self.latest_map = Some(map);
        }
    }

    fn into_map(self) -> Option<Value> {
        self.latest_map
    }
}

impl TransformContext for ChainContext {
    fn combined_sourcemap(&self) -> Value {
        self.latest_map.clone().unwrap_or(Value::Null)
    }
}

/// Session driver for a list of plugins.
#[derive(Debug, Default)]
pub struct Pipeline {
    plugins: PluginList,
}

impl Pipeline {
    /// Create a pipeline. Plugins are ordered by phase, keeping the given
    /// order within each phase.
    pub fn new(plugins: impl IntoIterator<Item = SharedPlugin>) -> Self {
        let mut plugins: PluginList = plugins.into_iter().collect();
        plugins.sort_by_phase();
        Self { plugins }
    }

    /// Current plugin order.
    pub fn plugins(&self) -> &PluginList {
        &self.plugins
    }

    /// Run `config` on every plugin, then `config_resolved` with mutable
    /// access to the plugin list.
    ///
    /// Any hook error aborts startup.
    pub async fn configure(&mut self) -> HookResult<()> {
        let snapshot: Vec<SharedPlugin> = self.plugins.iter().cloned().collect();

        for plugin in &snapshot {
            plugin
                .config()
                .await
                .with_context(|| format!("plugin '{}' failed in config", plugin.name()))?;
        }

        for plugin in &snapshot {
            plugin
                .config_resolved(&mut self.plugins)
                .await
                .with_context(|| format!("plugin '{}' failed in config_resolved", plugin.name()))?;
        }

        debug!(plugins = ?self.plugins, "pipeline configured");
        Ok(())
    }

    /// Run one module through the transform hook chain.
    ///
    /// Returns the final code and the map of the last hook that produced one.
    pub async fn transform_request(
        &self,
        id: &str,
        code: impl Into<String>,
        options: TransformOptions,
    ) -> HookResult<TransformOutput> {
        let mut ctx = ChainContext::new();
        let mut code = code.into();

        for plugin in self.plugins.iter() {
            let output = plugin
                .transform(&ctx, &code, id, options)
                .await
                .with_context(|| format!("plugin '{}' failed to transform {}", plugin.name(), id))?;

            if let Some(output) = output {
                code = output.code;
                if let Some(map) = output.map {
                    ctx.record(map);
                }
            }
        }

        Ok(TransformOutput {
            code,
            map: ctx.into_map(),
        })
    }

    /// Signal the end of the session with `build_end`.
    pub async fn close(&self) -> HookResult<()> {
        for plugin in self.plugins.iter() {
            plugin
                .build_end()
                .await
                .with_context(|| format!("plugin '{}' failed in build_end", plugin.name()))?;
        }
        Ok(())
    }
}
