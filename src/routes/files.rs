use axum::{
    body::Body,
    extract::{Query, Request, State},
    response::Response,
    Json,
};
use serde::Deserialize;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::{
    catalog,
    error::{validation, AppResult},
    state::AppState,
    types::{ActionResponse, CategoryFilter, FileAction, FileRecord, Folder, SortKey},
};

#[derive(Debug, Default, Deserialize)]
pub struct ScanQuery {
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

/// `GET /scan`: one page of a folder listing.
///
/// Unknown folders fall back to Downloads and unknown sort keys to date; an
/// unknown category matches nothing.
pub async fn scan(State(state): State<AppState>, Query(query): Query<ScanQuery>) -> AppResult<Json<Vec<FileRecord>>> {
    let folder = query.folder.as_deref().and_then(|f| f.parse().ok()).unwrap_or(Folder::Downloads);
    let sort_by = query.sort_by.as_deref().and_then(|s| s.parse().ok()).unwrap_or(SortKey::Date);
    let limit = query.limit.unwrap_or(state.config.listing.default_page_limit);
    validation::validate_page_limit(limit, state.config.listing.max_page_limit)?;
    let offset = query.offset.unwrap_or(0);

    let category = match query.category.as_deref().map(str::parse::<CategoryFilter>) {
        None => CategoryFilter::All,
        Some(Ok(category)) => category,
        Some(Err(e)) => {
            tracing::debug!("{}; returning empty page", e);
            return Ok(Json(Vec::new()));
        }
    };

    let root = state.folder_root(folder);
    if !root.exists() {
        tracing::debug!(folder = %folder, root = %root.display(), "folder does not exist");
        return Ok(Json(Vec::new()));
    }

    let (records, cache_hit) = state.scans.records(&root).await?;
    let page = catalog::list_page(&records, sort_by, category, limit, offset);
    state.metrics.record_page(page.len(), cache_hit);
    tracing::debug!(
        folder = %folder,
        sort_by = %sort_by,
        category = %category,
        limit,
        offset,
        returned = page.len(),
        "served listing page"
    );
    Ok(Json(page))
}

#[derive(Debug, Deserialize)]
pub struct ReadQuery {
    pub path: String,
}

/// `GET /read?path=`: the raw file, with range support for media streaming.
pub async fn read_file(
    State(state): State<AppState>,
    Query(query): Query<ReadQuery>,
    request: Request,
) -> AppResult<Response> {
    let path = state.authorize_path(&query.path)?;
    state.metrics.inc_files_read();
    let response = match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    Ok(response.map(Body::new))
}

/// `POST /open`: launches the file with the host's default application.
pub async fn open_file(State(state): State<AppState>, Json(action): Json<FileAction>) -> AppResult<Json<ActionResponse>> {
    let path = state.authorize_path(&action.path)?;
    let host = state.host.clone();
    let target = path.clone();
    if let Err(e) = tokio::task::spawn_blocking(move || host.open(&target)).await? {
        state.metrics.inc_action_failures();
        return Err(e.into());
    }
    state.metrics.inc_files_opened();
    tracing::info!("Opened {}", path.display());
    Ok(Json(ActionResponse::new("opened", action.path)))
}

/// `POST /delete`: moves the file to the trash.
pub async fn delete_file(
    State(state): State<AppState>,
    Json(action): Json<FileAction>,
) -> AppResult<Json<ActionResponse>> {
    let path = state.authorize_path(&action.path)?;
    let host = state.host.clone();
    let target = path.clone();
    if let Err(e) = tokio::task::spawn_blocking(move || host.trash(&target)).await? {
        state.metrics.inc_action_failures();
        return Err(e.into());
    }
    state.scans.invalidate_containing(&path).await;
    state.metrics.inc_files_trashed();
    tracing::info!("Moved {} to trash", path.display());
    Ok(Json(ActionResponse::new("trashed", action.path)))
}
