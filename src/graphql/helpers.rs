use async_graphql::{Context, ErrorExtensions, ID};

use crate::{app_state::AppState, auth::extract_claims_from_context, errors::AppError};

/// Owner id of the authenticated caller.
pub fn caller_id(ctx: &Context<'_>) -> async_graphql::Result<String> {
    extract_claims_from_context(ctx)
        .map(|claims| claims.user_id().to_string())
        .map_err(|e| e.extend())
}

pub fn app_state<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a AppState> {
    ctx.data::<AppState>()
}

/// Ids are opaque strings assigned by the generation flow.
pub fn parse_id(id: &ID) -> async_graphql::Result<String> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::ValidationError("Id must not be empty".to_string()).extend());
    }
    Ok(id.to_string())
}
