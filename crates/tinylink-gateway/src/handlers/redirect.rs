use crate::error::Result;
use crate::handlers::url::parse_short_code;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::Redirect;

/// GET /{short_code}
///
/// Answers with 307 Temporary Redirect so clients keep asking us, and with
/// 404 when the code is unknown.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect> {
    let code = parse_short_code(short_code)?;
    let original_url = state.redirector().resolve(&code).await?;

    Ok(Redirect::temporary(&original_url))
}
