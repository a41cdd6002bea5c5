use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::filter::Filter;
use crate::server::AppState;
use crate::{analyze, Error};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Deserialize)]
pub struct NaturalQueryParams {
    pub query: Option<String>,
}

/// Raw query params for `GET /strings`; parsed by hand so invalid input
/// yields a clean 400 and `filters_applied` can echo what the client sent.
#[derive(Deserialize, Default)]
pub struct ListParams {
    pub is_palindrome: Option<String>,
    pub min_length: Option<String>,
    pub max_length: Option<String>,
    pub word_count: Option<String>,
    pub contains_character: Option<String>,
}

fn parse_param<T: std::str::FromStr>(
    raw: &Option<String>,
    name: &str,
) -> Result<Option<T>, ApiError> {
    match raw {
        None => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| api_error(StatusCode::BAD_REQUEST, &format!("invalid {}", name))),
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

/// Translate a store failure; domain conditions are handled at each call
/// site, so anything reaching here is an infrastructure fault.
fn storage_error(err: Error) -> ApiError {
    tracing::error!("storage failure: {}", err);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "storage error")
}

/// POST /strings - analyze and persist one string
pub async fn create_string(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<crate::Value>), ApiError> {
    let field = body
        .get("value")
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, r#"missing "value" field"#))?;
    let text = field.as_str().ok_or_else(|| {
        api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#""value" must be a string"#,
        )
    })?;
    let text = text.trim();
    if text.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            r#""value" must not be empty"#,
        ));
    }

    let value = analyze(text);
    match state.store.save(value.clone()) {
        Ok(()) => {
            tracing::debug!("stored {} ({} chars)", value.id, value.properties.length);
            Ok((StatusCode::CREATED, Json(value)))
        }
        Err(Error::AlreadyExists) => Err(api_error(
            StatusCode::CONFLICT,
            "string already exists",
        )),
        Err(e) => Err(storage_error(e)),
    }
}

/// GET /strings/{value} - lookup by text, falling back to hash id
pub async fn get_string(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
) -> Result<Json<crate::Value>, ApiError> {
    if let Some(value) = state.store.get_by_value(&raw).map_err(storage_error)? {
        return Ok(Json(value));
    }
    if let Some(value) = state.store.get_by_hash(&raw).map_err(storage_error)? {
        return Ok(Json(value));
    }
    Err(api_error(StatusCode::NOT_FOUND, "string not found"))
}

/// GET /strings - list with optional explicit filters
pub async fn list_strings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let filter = Filter {
        is_palindrome: parse_param(&params.is_palindrome, "is_palindrome")?,
        min_length: parse_param(&params.min_length, "min_length")?,
        max_length: parse_param(&params.max_length, "max_length")?,
        word_count: parse_param(&params.word_count, "word_count")?,
        contains_character: params.contains_character.clone(),
    };

    let matched: Vec<_> = state
        .store
        .get_all()
        .map_err(storage_error)?
        .into_iter()
        .filter(|v| filter.matches(v))
        .collect();

    Ok(Json(serde_json::json!({
        "data": matched,
        "count": matched.len(),
        "filters_applied": {
            "is_palindrome": params.is_palindrome.unwrap_or_default(),
            "min_length": params.min_length.unwrap_or_default(),
            "max_length": params.max_length.unwrap_or_default(),
            "word_count": params.word_count.unwrap_or_default(),
            "contains_character": params.contains_character.unwrap_or_default(),
        },
    })))
}

/// GET /strings/filter-by-natural-language - heuristic free-text filtering
pub async fn natural_filter(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NaturalQueryParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let query = params
        .query
        .filter(|q| !q.is_empty())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "missing query param"))?;

    let filter = Filter::from_natural_query(&query);
    if filter.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "unable to parse natural language query",
        ));
    }

    let matched: Vec<_> = state
        .store
        .get_all()
        .map_err(storage_error)?
        .into_iter()
        .filter(|v| filter.matches(v))
        .collect();

    Ok(Json(serde_json::json!({
        "data": matched,
        "count": matched.len(),
        "interpreted_query": {
            "original": query,
            "parsed_filters": filter,
        },
    })))
}

/// DELETE /strings/{value} - remove by text
pub async fn delete_string(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
) -> Result<StatusCode, ApiError> {
    match state.store.delete_by_value(&raw) {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(Error::NotFound) => Err(api_error(StatusCode::NOT_FOUND, "string not found")),
        Err(e) => Err(storage_error(e)),
    }
}
