//! Shared plugins and fixtures for pipeline tests.

#![allow(dead_code)]

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use mapview::{
    HookResult, Plugin, PluginPhase, SharedPlugin, SourceMapVisualizer, TransformContext,
    TransformOptions, TransformOutput, VisualizerOptions,
};
use serde_json::json;
use tokio::sync::Notify;

/// Replaces `from` with `to` and reports a map naming itself.
#[derive(Debug)]
pub struct Rewrite {
    pub name: &'static str,
    pub phase: PluginPhase,
    pub from: &'static str,
    pub to: &'static str,
}

#[async_trait]
impl Plugin for Rewrite {
    fn name(&self) -> Cow<'static, str> {
        self.name.into()
    }

    fn phase(&self) -> PluginPhase {
        self.phase
    }

    async fn transform(
        &self,
        _ctx: &dyn TransformContext,
        code: &str,
        id: &str,
        _options: TransformOptions,
    ) -> HookResult<Option<TransformOutput>> {
        let map = json!({
            "version": 3,
            "sources": [id],
            "names": [self.name],
            "mappings": "AAAA",
        });
        Ok(Some(TransformOutput::new(code.replace(self.from, self.to), Some(map))))
    }
}

pub fn rewrite(
    name: &'static str,
    phase: PluginPhase,
    from: &'static str,
    to: &'static str,
) -> SharedPlugin {
    Arc::new(Rewrite {
        name,
        phase,
        from,
        to,
    })
}

/// Holds each gated module until its gate is opened.
#[derive(Debug, Default)]
pub struct Gate {
    gates: HashMap<String, Arc<Notify>>,
}

impl Gate {
    pub fn new<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            gates: ids
                .into_iter()
                .map(|id| (id.to_string(), Arc::new(Notify::new())))
                .collect(),
        }
    }

    pub fn open(&self, id: &str) {
        if let Some(gate) = self.gates.get(id) {
            gate.notify_one();
        }
    }
}

#[async_trait]
impl Plugin for Gate {
    fn name(&self) -> Cow<'static, str> {
        "gate".into()
    }

    async fn transform(
        &self,
        _ctx: &dyn TransformContext,
        _code: &str,
        id: &str,
        _options: TransformOptions,
    ) -> HookResult<Option<TransformOutput>> {
        if let Some(gate) = self.gates.get(id) {
            gate.notified().await;
        }
        Ok(None)
    }
}

/// Visualizer writing into `out_dir`.
pub fn visualizer(out_dir: &Path) -> SourceMapVisualizer {
    SourceMapVisualizer::with_options(
        VisualizerOptions::default()
            .with_out_dir(out_dir)
            .silent(true),
    )
    .with_root(out_dir)
}
