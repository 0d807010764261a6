//! HTML report rendering.
//!
//! [`render`] turns a capture snapshot into a standalone document. The page
//! loads its behaviour from `viewer.js` and its styles from `viewer.css`,
//! which [`ReportWriter`] places next to the report.
//!
//! Each row links twice to the same token:
//!
//! - `?filename=<name>#<token>` opens it inside the report (iframe and JSON view)
//! - `https://evanw.github.io/source-map-visualization#<token>` opens it directly

mod writer;

use mapview_codec::VISUALIZER_URL;
use minijinja::{AutoEscape, Environment, context};
use rust_embed::RustEmbed;
use serde::Serialize;

use crate::capture::CaptureResult;
use crate::{Error, Result};

pub use writer::ReportWriter;

/// Report template name inside the asset folder.
pub const REPORT_TEMPLATE: &str = "report.html.j2";

/// Client script shipped next to the report.
pub const VIEWER_SCRIPT: &str = "viewer.js";

/// Stylesheet shipped next to the report.
pub const VIEWER_STYLES: &str = "viewer.css";

#[derive(RustEmbed)]
#[folder = "assets/"]
struct ReportAssets;

#[derive(Serialize)]
struct ReportRow<'a> {
    filename: &'a str,
    token: &'a str,
    mode: &'static str,
}

/// Render the report document for `results`, one row per capture, in order.
///
/// The output only depends on `results`.
pub fn render(results: &[CaptureResult]) -> Result<String> {
    let env = environment()?;
    let template = env.get_template(REPORT_TEMPLATE)?;

    let rows: Vec<ReportRow<'_>> = results
        .iter()
        .map(|result| ReportRow {
            filename: result.filename(),
            token: result.token(),
            mode: result.mode_label(),
        })
        .collect();

    let html = template.render(context! {
        rows => rows,
        visualizer_url => VISUALIZER_URL,
        script => VIEWER_SCRIPT,
        stylesheet => VIEWER_STYLES
    })?;

    Ok(html)
}

/// Escape `&`, `<`, `>`, `'` and `"` for use in HTML text and attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&#39;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Static files the report needs at runtime, as `(file name, contents)`.
pub(crate) fn static_assets() -> Result<[(&'static str, Vec<u8>); 2]> {
    Ok([
        (VIEWER_SCRIPT, asset(VIEWER_SCRIPT)?),
        (VIEWER_STYLES, asset(VIEWER_STYLES)?),
    ])
}

fn asset(name: &str) -> Result<Vec<u8>> {
    ReportAssets::get(name)
        .map(|file| file.data.into_owned())
        .ok_or_else(|| Error::MissingAsset(name.to_string()))
}

fn environment() -> Result<Environment<'static>> {
    let source = String::from_utf8(asset(REPORT_TEMPLATE)?)
        .map_err(|_| Error::MissingAsset(REPORT_TEMPLATE.to_string()))?;

    let mut env = Environment::new();
    // Escaping is explicit in the template; tokens are base64 and go in verbatim.
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_filter("escape_html", |value: String| escape_html(&value));
    env.add_filter("urlencode_component", |value: String| {
        urlencoding::encode(&value).into_owned()
    });
    env.add_template_owned(REPORT_TEMPLATE, source)?;
    Ok(env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureStore;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn store_with(entries: &[(&str, &str, bool)]) -> CaptureStore {
        let store = CaptureStore::new();
        for (filename, code, ssr) in entries {
            store
                .record(*filename, code, &json!({ "version": 3, "sources": [filename] }), *ssr)
                .unwrap();
        }
        store
    }

    fn rows(html: &str) -> Vec<&str> {
        html.split("<tr class=\"capture\">").skip(1).collect()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("/src/main.ts"), "/src/main.ts");
    }

    #[test]
    fn test_same_file_in_both_modes_renders_two_rows() {
        let store = store_with(&[("a.ts", "server()", true), ("a.ts", "client()", false)]);
        let snapshot = store.snapshot();
        let html = render(&snapshot).unwrap();

        let rows = rows(&html);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("SSR"));
        assert!(!rows[0].contains("Web"));
        assert!(rows[1].contains("Web"));
        assert!(!rows[1].contains("SSR"));

        assert_ne!(snapshot[0].token(), snapshot[1].token());
        assert!(rows[0].contains(&format!("#{}\"", snapshot[0].token())));
        assert!(rows[1].contains(&format!("#{}\"", snapshot[1].token())));
    }

    #[test]
    fn test_rows_link_to_visualizer_and_inline_view() {
        let store = store_with(&[("/src/main.ts", "x", false)]);
        let snapshot = store.snapshot();
        let token = snapshot[0].token();
        let html = render(&snapshot).unwrap();

        assert!(html.contains(&format!(
            "href=\"https://evanw.github.io/source-map-visualization#{token}\""
        )));
        assert!(html.contains(&format!("href=\"?filename=%2Fsrc%2Fmain.ts#{token}\"")));
    }

    #[test]
    fn test_filenames_are_escaped() {
        let store = CaptureStore::new();
        store
            .record("<script>alert('x')</script>&\".ts", "", &Value::Null, false)
            .unwrap();
        let html = render(&store.snapshot()).unwrap();

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;&amp;&quot;.ts"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let store = store_with(&[("a.ts", "a", true), ("b.ts", "b", false)]);
        let snapshot = store.snapshot();
        assert_eq!(render(&snapshot).unwrap(), render(&snapshot).unwrap());
    }

    #[test]
    fn test_rows_follow_snapshot_order() {
        let store = store_with(&[("b.ts", "", false), ("a.ts", "", false), ("c.ts", "", false)]);
        let html = render(&store.snapshot()).unwrap();
        let b = html.find(">b.ts<").unwrap();
        let a = html.find(">a.ts<").unwrap();
        let c = html.find(">c.ts<").unwrap();
        assert!(b < a && a < c);
    }

    #[test]
    fn test_empty_report_references_assets() {
        let html = render(&[]).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(rows(&html).is_empty());
        assert!(html.contains("src=\"viewer.js\""));
        assert!(html.contains("href=\"viewer.css\""));
        assert!(html.contains("id=\"source-map-visualizer\""));
        assert!(html.contains("id=\"json-visualizer\""));
    }

    #[test]
    fn test_static_assets_are_embedded() {
        let assets = static_assets().unwrap();
        assert_eq!(assets[0].0, "viewer.js");
        assert!(!assets[0].1.is_empty());
        assert_eq!(assets[1].0, "viewer.css");
        assert!(!assets[1].1.is_empty());
    }
}
