use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse, GetUrlResponse};
use crate::state::AppState;
use crate::validate::validate_url;
use axum::extract::{Path, State};
use axum::Json;
use tinylink_core::ShortCode;
use tinylink_redirector::RedirectorError;

pub async fn create_url_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateUrlRequest>,
) -> Result<Json<CreateUrlResponse>> {
    validate_url(&request.original_url)?;

    let code = state.shortener().shorten(&request.original_url).await?;

    Ok(Json(CreateUrlResponse {
        short_url: code.to_url(state.base_url()),
        short_code: code.to_string(),
        original_url: request.original_url,
    }))
}

pub async fn get_url_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<GetUrlResponse>> {
    let code = parse_short_code(short_code)?;
    let original_url = state.redirector().resolve(&code).await?;

    Ok(Json(GetUrlResponse {
        short_code: code.to_string(),
        original_url,
    }))
}

/// A malformed code can never have been issued, so it is simply not found.
pub(crate) fn parse_short_code(raw: String) -> Result<ShortCode> {
    match ShortCode::new(raw.as_str()) {
        Ok(code) => Ok(code),
        Err(_) => Err(AppError::Redirector(RedirectorError::NotFound(raw))),
    }
}
