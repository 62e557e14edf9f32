use crate::error::AppError;
use crate::models::{TokenQueryParams, TokenResponse};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use token_feed::query;
use types::token::TokenSection;

/// GET /api/tokens/{section}
///
/// Snapshot of one section with the query spec applied. Unknown
/// section names are the one genuinely client-visible error.
pub async fn by_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
    Query(params): Query<TokenQueryParams>,
) -> Result<Json<TokenResponse>, AppError> {
    let section: TokenSection = section
        .parse()
        .map_err(|_| AppError::NotFound(format!("unknown token section: {section}")))?;

    let tokens = query::apply(state.store.section(section), &params.into_spec());
    Ok(Json(TokenResponse::new(tokens)))
}

/// GET /api/tokens/all
///
/// All sections unioned in fixed order (new → final → migrated), then
/// the query spec applied to the combined snapshot.
pub async fn all_tokens(
    State(state): State<AppState>,
    Query(params): Query<TokenQueryParams>,
) -> Json<TokenResponse> {
    let tokens = query::apply(state.store.all(), &params.into_spec());
    Json(TokenResponse::new(tokens))
}
