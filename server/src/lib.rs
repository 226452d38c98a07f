use anyhow::Result;
use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Form, Json, Router,
};
use engine::Snapshot;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub mod html;
pub mod tmdb;

/// Shown whenever the snapshot failed to load; the process keeps serving.
const UNAVAILABLE_MSG: &str = "Recommendations are unavailable right now. Try again later.";

pub struct ServerConfig {
    pub snapshot_path: String,
    pub tmdb_api_key: Option<String>,
}

/// The snapshot handle is published here exactly once, before the router is
/// handed to axum, and never swapped afterwards; concurrent requests share
/// it read-only. `None` means the load failed and we serve fallback-only.
#[derive(Clone)]
pub struct AppState {
    pub snapshot: Option<Arc<Snapshot>>,
    pub tmdb: tmdb::Client,
}

#[derive(Deserialize)]
pub struct RecommendParams {
    pub title: String,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Ranked by the content-similarity snapshot.
    Similarity,
    /// Title unknown locally; TMDB genre fallback answered.
    Genre,
    /// No snapshot loaded.
    Unavailable,
}

#[derive(Serialize)]
pub struct RecommendResponse {
    pub query: String,
    pub source: Source,
    pub recommendations: Vec<String>,
}

pub fn build_app(config: ServerConfig) -> Result<Router> {
    let snapshot = match Snapshot::load(&config.snapshot_path) {
        Ok(snap) => {
            tracing::info!(
                path = %config.snapshot_path,
                movies = snap.corpus.len(),
                "snapshot loaded"
            );
            Some(Arc::new(snap))
        }
        Err(err) => {
            tracing::warn!(
                path = %config.snapshot_path,
                error = %err,
                "snapshot load failed; serving in fallback-only mode"
            );
            None
        }
    };
    let state = AppState { snapshot, tmdb: tmdb::Client::new(config.tmdb_api_key)? };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/", get(home_handler).post(search_form_handler))
        .route("/recommend", get(recommend_handler))
        .with_state(state)
        .layer(cors);
    Ok(app)
}

/// One query, resolved in order: no snapshot -> unavailable message;
/// similarity hit -> ranked titles; unknown title -> TMDB genre fallback,
/// invoked exactly once. Always yields a non-crashing result list.
async fn recommendations_for(state: &AppState, title: &str) -> (Source, Vec<String>) {
    let snapshot = match &state.snapshot {
        Some(snap) => snap,
        None => return (Source::Unavailable, vec![UNAVAILABLE_MSG.to_string()]),
    };
    match snapshot.recommend(title) {
        Some(titles) => (Source::Similarity, titles),
        None => (Source::Genre, state.tmdb.recommend_by_genre(title).await),
    }
}

pub async fn recommend_handler(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> Json<RecommendResponse> {
    let (source, recommendations) = recommendations_for(&state, &params.title).await;
    Json(RecommendResponse { query: params.title, source, recommendations })
}

pub async fn home_handler() -> Html<String> {
    Html(html::render_page(None, &[]))
}

#[derive(Deserialize)]
pub struct TitleForm {
    pub title: String,
}

pub async fn search_form_handler(
    State(state): State<AppState>,
    Form(form): Form<TitleForm>,
) -> Html<String> {
    let (_, recommendations) = recommendations_for(&state, &form.title).await;
    Html(html::render_page(Some(&form.title), &recommendations))
}
