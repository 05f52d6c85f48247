use actix_web::{delete, get, http::header::CONTENT_TYPE, patch, post, put, web, HttpRequest, HttpResponse};
use futures::StreamExt;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        quiz_dto::generated_quiz_schema,
        request::{CreateQuizParams, PinQuizInput, QuizUpload, RenameQuizInput, SubmitAnswersRequest},
        response::QuizSummary,
    },
};

/// Reads at most `limit + 1` bytes so an oversized body still reaches upload
/// validation and gets a categorized error instead of actix's overflow reply.
pub(crate) async fn read_capped(mut payload: web::Payload, limit: usize) -> Result<Vec<u8>, AppError> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| AppError::ValidationError(format!("Failed to read upload: {}", e)))?;
        let room = limit + 1 - body.len();
        if chunk.len() >= room {
            body.extend_from_slice(&chunk[..room]);
            break;
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.to_vec())
}

/// Body is the raw PDF; `question_count` and `file_name` come in the query string.
#[post("/quizzes")]
async fn create_quiz(
    state: web::Data<AppState>,
    req: HttpRequest,
    params: web::Query<CreateQuizParams>,
    payload: web::Payload,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let params = params.into_inner();
    let upload = QuizUpload {
        file_name: params.file_name,
        content_type: req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        bytes: read_capped(payload, state.config.max_upload_bytes).await?,
        question_count: params.question_count,
    };

    let quiz = state.quiz_service.create_from_upload(auth.id(), upload).await?;
    Ok(HttpResponse::Created().json(QuizSummary::from_quiz(&quiz, &state.config.public_base_url)))
}

#[get("/quizzes")]
async fn list_my_quizzes(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state.quiz_service.list_owner_quizzes(auth.id()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/quizzes/{id}")]
async fn get_quiz_for_taking(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz_for_taking(auth.id(), &id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[patch("/quizzes/{id}/title")]
async fn rename_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<RenameQuizInput>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .rename_quiz(auth.id(), &id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[put("/quizzes/{id}/pin")]
async fn pin_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<PinQuizInput>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .set_pinned(auth.id(), &id, request.pinned)
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[delete("/quizzes/{id}")]
async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state.quiz_service.delete_quiz(auth.id(), &id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/quizzes/{id}/attempts")]
async fn submit_attempt(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitAnswersRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state
        .attempt_service
        .submit(auth.id(), &id, request.into_inner().answers)
        .await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/schema/generated-quiz")]
async fn generated_quiz_json_schema() -> HttpResponse {
    HttpResponse::Ok().json(generated_quiz_schema())
}
