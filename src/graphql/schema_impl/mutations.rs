use async_graphql::{Context, Object, ResultExt, ID};

use crate::{
    graphql::helpers::{app_state, caller_id, parse_id},
    models::dto::{
        request::{RenameQuizInput, SubmitQuizAttemptInput},
        response::{DeleteQuizResponse, QuizAttemptResponse, QuizSummary},
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn submit_quiz_attempt(
        &self,
        ctx: &Context<'_>,
        input: SubmitQuizAttemptInput,
    ) -> async_graphql::Result<QuizAttemptResponse> {
        let state = app_state(ctx)?;
        let owner = caller_id(ctx)?;
        let answers = input.to_answer_set().extend()?;

        state
            .attempt_service
            .submit(&owner, input.quiz_id.trim(), answers)
            .await
            .extend()
    }

    async fn rename_quiz(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: RenameQuizInput,
    ) -> async_graphql::Result<QuizSummary> {
        let state = app_state(ctx)?;
        let owner = caller_id(ctx)?;
        let id = parse_id(&id)?;

        state.quiz_service.rename_quiz(&owner, &id, input).await.extend()
    }

    async fn set_quiz_pinned(
        &self,
        ctx: &Context<'_>,
        id: ID,
        pinned: bool,
    ) -> async_graphql::Result<QuizSummary> {
        let state = app_state(ctx)?;
        let owner = caller_id(ctx)?;
        let id = parse_id(&id)?;

        state.quiz_service.set_pinned(&owner, &id, pinned).await.extend()
    }

    async fn delete_quiz(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<DeleteQuizResponse> {
        let state = app_state(ctx)?;
        let owner = caller_id(ctx)?;
        let id = parse_id(&id)?;

        state.quiz_service.delete_quiz(&owner, &id).await.extend()
    }
}
