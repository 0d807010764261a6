//! Static server for report directories.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Redirect;
use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::debug;

use crate::error::{CliError, Result};
use crate::ui;

#[derive(Clone)]
struct ServerState {
    report: Arc<String>,
}

/// Router serving `dir`, with `/` redirecting to the report.
pub fn router(dir: PathBuf, filename: &str) -> Router {
    let state = ServerState {
        report: Arc::new(format!("/{}", filename)),
    };

    Router::new()
        .route("/", get(index))
        .fallback_service(ServeDir::new(dir))
        .with_state(state)
}

/// Serve `dir` on localhost until Ctrl-C.
pub async fn serve(dir: PathBuf, filename: String, port: u16) -> Result<()> {
    let app = router(dir.clone(), &filename);

    let addr: SocketAddr = ([127, 0, 0, 1], port).into();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| CliError::Server(format!("cannot bind {addr}: {err}")))?;

    ui::info(&format!(
        "Serving {} at http://{}:{}/{}",
        dir.display(),
        addr.ip(),
        addr.port(),
        filename
    ));

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            debug!("shutting down report server");
        })
        .await
        .map_err(|err| CliError::Server(err.to_string()))
}

async fn index(State(state): State<ServerState>) -> Redirect {
    Redirect::temporary(&state.report)
}
