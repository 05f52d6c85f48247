use async_graphql::Context;

use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::domain::QuizAttempt,
};

/// The single ownership check for quiz mutations.
pub fn require_owner(user_id: &str, resource_owner: &str) -> AppResult<()> {
    if user_id != resource_owner {
        return Err(AppError::Forbidden(
            "You can only modify your own quizzes".to_string(),
        ));
    }
    Ok(())
}

pub fn can_view_attempt(user_id: &str, attempt: &QuizAttempt) -> bool {
    attempt.owner_id == user_id
}

pub fn extract_claims_from_context(ctx: &Context<'_>) -> AppResult<Claims> {
    ctx.data::<Claims>()
        .cloned()
        .map_err(|_| AppError::Unauthorized("Authentication required".to_string()))
}
