//! Viewer state model.
//!
//! The report page is a small state machine driven by its URL. With an empty
//! hash it shows the file list; with a token in the hash it shows the
//! external visualizer in an iframe and can switch to a JSON view of the
//! decoded token. `assets/viewer.js` implements the same transitions in the
//! browser; this model is what the tests pin down.
//!
//! ```text
//!            hash set                 show_json()
//! FileList ───────────▶ Visualizer ◀────────────▶ Json
//!     ▲                     │        show_visualizer()
//!     └─────────────────────┘
//!          hash cleared
//! ```

mod theme;

use mapview_codec::{DecodedFrame, visualizer_link};

pub use theme::{KeyValueStore, MemoryStore, THEME_KEY, Theme, ThemeSettings};

/// The parts of the page URL the viewer reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    hash: String,
    filename: Option<String>,
}

impl Location {
    /// Parse an href such as `report.html?filename=%2Fsrc%2Fa.ts#MTJ...`.
    ///
    /// The hash is taken without its leading `#`. The `filename` query value
    /// is percent-decoded (`+` counts as a space); an undecodable value is
    /// kept as written.
    pub fn parse(href: &str) -> Self {
        let (before_hash, hash) = match href.split_once('#') {
            Some((before, hash)) => (before, hash),
            None => (href, ""),
        };

        let filename = before_hash
            .split_once('?')
            .and_then(|(_, query)| query_value(query, "filename"));

        Self {
            hash: hash.to_string(),
            filename,
        }
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// The token in the hash, if any.
    pub fn token(&self) -> Option<&str> {
        (!self.hash.is_empty()).then_some(self.hash.as_str())
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }
}

fn query_value(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(name, _)| *name == key)
        .map(|(_, value)| {
            let value = value.replace('+', " ");
            match urlencoding::decode(&value) {
                Ok(decoded) => decoded.into_owned(),
                Err(_) => value,
            }
        })
}

/// Which of the three mutually exclusive views is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    FileList,
    Visualizer,
    Json,
}

/// Contents of the JSON view.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonContent {
    Decoded(DecodedFrame),
    /// The hash did not decode; shown as is next to the error.
    Raw { hash: String, error: String },
}

impl JsonContent {
    fn from_token(token: &str) -> Self {
        match mapview_codec::decode(token) {
            Ok(frame) => JsonContent::Decoded(frame),
            Err(err) => JsonContent::Raw {
                hash: token.to_string(),
                error: err.to_string(),
            },
        }
    }

    /// The two text blocks of the view: code and pretty map, or raw hash and
    /// error message.
    pub fn blocks(&self) -> [String; 2] {
        match self {
            JsonContent::Decoded(frame) => [frame.code.clone(), frame.pretty_map()],
            JsonContent::Raw { hash, error } => [hash.clone(), error.clone()],
        }
    }
}

/// State of the report page.
#[derive(Debug, Clone)]
pub struct ViewerState<S> {
    location: Location,
    view: View,
    file_list_open: bool,
    json: Option<JsonContent>,
    theme: ThemeSettings<S>,
}

impl<S: KeyValueStore> ViewerState<S> {
    /// Initial state for a page load at `location`.
    pub fn load(location: Location, theme: ThemeSettings<S>) -> Self {
        let mut state = Self {
            location: Location::default(),
            view: View::FileList,
            file_list_open: true,
            json: None,
            theme,
        };
        state.on_hash_change(location);
        state
    }

    /// Re-derive the view from a new location. The theme is kept.
    pub fn on_hash_change(&mut self, location: Location) {
        match location.token() {
            Some(token) => {
                self.json = Some(JsonContent::from_token(token));
                self.view = View::Visualizer;
                self.file_list_open = false;
            }
            None => {
                self.json = None;
                self.view = View::FileList;
                self.file_list_open = true;
            }
        }
        self.location = location;
    }

    /// Switch to the JSON view. Only possible while a token is shown.
    pub fn show_json(&mut self) -> bool {
        self.switch(View::Json)
    }

    /// Switch back to the visualizer. Only possible while a token is shown.
    pub fn show_visualizer(&mut self) -> bool {
        self.switch(View::Visualizer)
    }

    fn switch(&mut self, view: View) -> bool {
        if self.view == View::FileList {
            return false;
        }
        self.view = view;
        true
    }

    pub fn toggle_file_list(&mut self) {
        self.file_list_open = !self.file_list_open;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Iframe source; `None` means hidden with an empty `src`.
    pub fn iframe_src(&self) -> Option<String> {
        self.location.token().map(visualizer_link)
    }

    pub fn iframe_visible(&self) -> bool {
        self.view == View::Visualizer
    }

    pub fn file_list_open(&self) -> bool {
        self.file_list_open
    }

    pub fn json_toggle_visible(&self) -> bool {
        self.view == View::Visualizer
    }

    pub fn visualizer_toggle_visible(&self) -> bool {
        self.view == View::Json
    }

    /// JSON view contents, present whenever a token is shown.
    pub fn json(&self) -> Option<&JsonContent> {
        self.json.as_ref()
    }

    /// Display name of the selected file, when the link carried one.
    pub fn filename(&self) -> Option<&str> {
        self.location.token().and(self.location.filename())
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }
}
