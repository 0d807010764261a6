//! Capture store.
//!
//! Holds one [`CaptureResult`] per transform hook invocation for the length
//! of a session. Entries are appended in completion order and never changed
//! or removed; the same filename may appear several times (for example once
//! for SSR and once for the browser).
//!
//! Code and map are not kept: they are framed into the token right away and
//! can be recovered with [`CaptureResult::decode`].

use std::sync::Arc;

use mapview_codec::{CodecError, DecodedFrame};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A captured transform result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureResult {
    filename: String,
    token: String,
    ssr: bool,
}

impl CaptureResult {
    pub fn new(filename: impl Into<String>, token: impl Into<String>, ssr: bool) -> Self {
        Self {
            filename: filename.into(),
            token: token.into(),
            ssr,
        }
    }

    /// Display name of the module.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Visualizer token of the module's final code and map.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn ssr(&self) -> bool {
        self.ssr
    }

    /// `SSR` or `Web`, as shown in the report.
    pub fn mode_label(&self) -> &'static str {
        if self.ssr { "SSR" } else { "Web" }
    }

    /// Recover the captured code and map from the token.
    pub fn decode(&self) -> Result<DecodedFrame, CodecError> {
        mapview_codec::decode(&self.token)
    }
}

/// Append-only, shareable collection of captures.
///
/// Cloning yields another handle to the same store. Appends are serialized,
/// so concurrent hook invocations never lose an entry and the snapshot order
/// is the order in which `record` calls finished encoding.
#[derive(Debug, Clone, Default)]
pub struct CaptureStore {
    entries: Arc<Mutex<Vec<CaptureResult>>>,
}

impl CaptureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `code` and `map` and append the result.
    ///
    /// Encoding errors are returned to the caller and nothing is appended.
    pub fn record<M>(
        &self,
        filename: impl Into<String>,
        code: &str,
        map: &M,
        ssr: bool,
    ) -> Result<(), CodecError>
    where
        M: Serialize + ?Sized,
    {
        let token = mapview_codec::encode(code, map)?;
        let result = CaptureResult::new(filename, token, ssr);

        debug!(filename = %result.filename, ssr, token_len = result.token.len(), "captured transform result");

        self.entries.lock().push(result);
        Ok(())
    }

    /// Copy of the captures so far, in insertion order.
    pub fn snapshot(&self) -> Vec<CaptureResult> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
