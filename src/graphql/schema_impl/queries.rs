use async_graphql::{Context, Object, ResultExt, ID};

use crate::{
    graphql::helpers::{app_state, caller_id, parse_id},
    models::dto::response::{MyQuizzesResponse, QuizAttemptReview, QuizForTaking},
    services::history::HistoryReport,
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// A quiz without its answer key.
    async fn quiz_for_taking(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<QuizForTaking> {
        let state = app_state(ctx)?;
        let viewer = caller_id(ctx)?;
        let id = parse_id(&id)?;

        state.quiz_service.get_quiz_for_taking(&viewer, &id).await.extend()
    }

    async fn my_quizzes(&self, ctx: &Context<'_>) -> async_graphql::Result<MyQuizzesResponse> {
        let state = app_state(ctx)?;
        let owner = caller_id(ctx)?;

        state.quiz_service.list_owner_quizzes(&owner).await.extend()
    }

    async fn quiz_attempt(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<QuizAttemptReview> {
        let state = app_state(ctx)?;
        let viewer = caller_id(ctx)?;
        let id = parse_id(&id)?;

        state.attempt_service.get_attempt(&viewer, &id).await.extend()
    }

    async fn history(&self, ctx: &Context<'_>) -> async_graphql::Result<HistoryReport> {
        let state = app_state(ctx)?;
        let owner = caller_id(ctx)?;

        state.attempt_service.history(&owner).await.extend()
    }
}
