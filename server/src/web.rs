//! Interactive web front end
//!
//! Serves an embedded HTML page plus a JSON search API. The engine
//! (embedding model + embedded corpus) is a process-wide resource owned
//! by this layer: it is initialized on the first search request, reused
//! by every later request without further synchronization (the index is
//! immutable), and never torn down. A failed initialization is reported
//! to that request and retried on the next one.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tower_http::trace::TraceLayer;

use anyhow::Context;
use cinesearch_core::{EmbeddingEngine, MovieSearch};

/// Result count bounds enforced by the front end
const MIN_RESULTS: usize = 1;
const MAX_RESULTS: usize = 20;
const DEFAULT_RESULTS: usize = 5;

/// Web front end configuration
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    pub dataset: PathBuf,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 4000,
            dataset: PathBuf::from("dataset.csv"),
        }
    }
}

#[derive(Clone)]
struct AppState {
    config: Arc<WebConfig>,
    engine: Arc<OnceCell<Arc<MovieSearch<EmbeddingEngine>>>>,
}

impl AppState {
    /// The shared engine, built on first use
    async fn engine(&self) -> anyhow::Result<Arc<MovieSearch<EmbeddingEngine>>> {
        self.engine
            .get_or_try_init(|| async {
                let dataset = self.config.dataset.clone();
                tokio::task::spawn_blocking(move || {
                    tracing::info!("building search engine from {}", dataset.display());
                    let embedder = EmbeddingEngine::new().context("loading embedding model")?;
                    let mut search = MovieSearch::new(embedder);
                    search
                        .load_csv(&dataset)
                        .with_context(|| format!("loading corpus from {}", dataset.display()))?;
                    Ok(Arc::new(search))
                })
                .await
                .context("engine initialization task failed")?
            })
            .await
            .cloned()
    }
}

/// Axum server wrapping the search engine
pub struct WebServer {
    config: WebConfig,
}

impl WebServer {
    pub fn new(config: WebConfig) -> Self {
        Self { config }
    }

    fn router(&self) -> Router {
        let state = AppState {
            config: Arc::new(self.config.clone()),
            engine: Arc::new(OnceCell::new()),
        };

        Router::new()
            .route("/", get(index))
            .route("/api/search", get(api_search))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Bind and serve until the process is terminated
    pub async fn run(&self) -> std::io::Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("listening on http://{addr}");
        axum::serve(listener, self.router()).await
    }
}

#[derive(Deserialize)]
struct SearchParams {
    q: String,
    k: Option<usize>,
}

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<ResultItem>,
}

#[derive(Serialize)]
struct ResultItem {
    title: String,
    summary: String,
    score: f32,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Clamp the requested result count into the front end's bounds
fn clamp_result_count(k: Option<usize>) -> usize {
    k.unwrap_or(DEFAULT_RESULTS).clamp(MIN_RESULTS, MAX_RESULTS)
}

async fn api_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = params.q.trim().to_string();
    if query.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "query must not be empty".into(),
            }),
        ));
    }
    let k = clamp_result_count(params.k);

    let engine = state.engine().await.map_err(internal_error)?;

    let results = tokio::task::spawn_blocking(move || engine.search(&query, k))
        .await
        .map_err(|e| internal_error(anyhow::anyhow!("search task failed: {e}")))?
        .map_err(|e| internal_error(e.into()))?;

    Ok(Json(SearchResponse {
        results: results
            .into_iter()
            .map(|r| ResultItem {
                title: r.document.title,
                summary: r.document.summary,
                score: r.score,
            })
            .collect(),
    }))
}

fn internal_error(err: anyhow::Error) -> ApiError {
    tracing::error!("{err:#}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("{err:#}"),
        }),
    )
}

async fn index() -> Html<&'static str> {
    Html(INDEX_TEMPLATE)
}

const INDEX_TEMPLATE: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Semantic Movie Search</title>
  <style>
    :root {
      --bg: #f8fafc;
      --card: #ffffff;
      --primary: #2563eb;
      --text: #1e293b;
      --muted: #64748b;
      --border: rgba(0,0,0,0.08);
      --danger: #ef4444;
    }
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      font-family: system-ui, -apple-system, sans-serif;
      background: var(--bg);
      color: var(--text);
      max-width: 760px;
      margin: 0 auto;
      padding: 32px 16px;
    }
    h1 { font-size: 24px; margin-bottom: 4px; }
    .hint { color: var(--muted); font-size: 14px; margin-bottom: 24px; }
    form { display: flex; gap: 8px; margin-bottom: 24px; }
    input[type="text"] {
      flex: 3;
      padding: 10px 12px;
      border: 1px solid var(--border);
      border-radius: 8px;
      font-size: 15px;
    }
    input[type="number"] {
      flex: 1;
      min-width: 72px;
      padding: 10px 12px;
      border: 1px solid var(--border);
      border-radius: 8px;
      font-size: 15px;
    }
    button {
      padding: 10px 20px;
      border: none;
      border-radius: 8px;
      background: var(--primary);
      color: white;
      font-size: 15px;
      font-weight: 600;
      cursor: pointer;
    }
    button:disabled { opacity: 0.6; cursor: wait; }
    .error {
      display: none;
      background: rgba(239, 68, 68, 0.08);
      border: 1px solid var(--danger);
      color: var(--danger);
      border-radius: 8px;
      padding: 12px 16px;
      margin-bottom: 16px;
      white-space: pre-wrap;
    }
    .result {
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 10px;
      padding: 16px;
      margin-bottom: 12px;
      display: flex;
      gap: 16px;
      justify-content: space-between;
    }
    .result h3 { font-size: 17px; margin-bottom: 6px; }
    .result p { color: var(--muted); font-size: 14px; line-height: 1.5; }
    .score {
      align-self: flex-start;
      white-space: nowrap;
      font-weight: 700;
      color: var(--primary);
      font-size: 18px;
    }
    .score small { display: block; font-weight: 400; color: var(--muted); font-size: 11px; }
  </style>
</head>
<body>
  <h1>Semantic Movie Search</h1>
  <p class="hint">On the first search the server loads the embedding model and indexes the corpus; please be patient.</p>

  <form id="search-form">
    <input type="text" id="query" placeholder="E.g., movies about love" autofocus>
    <input type="number" id="count" min="1" max="20" value="5" title="Number of results">
    <button type="submit" id="submit">Search</button>
  </form>

  <div class="error" id="error"></div>
  <div id="results"></div>

  <script>
    const form = document.getElementById('search-form');
    const errorBox = document.getElementById('error');
    const resultsBox = document.getElementById('results');
    const submit = document.getElementById('submit');

    function escapeHtml(text) {
      const div = document.createElement('div');
      div.textContent = text;
      return div.innerHTML;
    }

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      const query = document.getElementById('query').value.trim();
      const count = document.getElementById('count').value || 5;
      if (!query) return;

      submit.disabled = true;
      errorBox.style.display = 'none';

      try {
        const resp = await fetch(`/api/search?q=${encodeURIComponent(query)}&k=${count}`);
        const data = await resp.json();
        if (!resp.ok) {
          throw new Error(data.error || `request failed (${resp.status})`);
        }
        resultsBox.innerHTML = data.results.map(r => `
          <div class="result">
            <div>
              <h3>${escapeHtml(r.title)}</h3>
              <p>${escapeHtml(r.summary)}</p>
            </div>
            <div class="score">${(r.score * 100).toFixed(2)}%<small>Relevance</small></div>
          </div>`).join('');
      } catch (e) {
        resultsBox.innerHTML = '';
        errorBox.textContent = 'Error running the search. ' + e.message;
        errorBox.style.display = 'block';
      } finally {
        submit.disabled = false;
      }
    });
  </script>
</body>
</html>
"##;
