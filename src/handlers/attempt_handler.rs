use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, auth::AuthenticatedUser, errors::AppError};

#[get("/attempts/{id}")]
async fn get_attempt(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let review = state.attempt_service.get_attempt(auth.id(), &id).await?;
    Ok(HttpResponse::Ok().json(review))
}

#[get("/history")]
async fn get_history(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let report = state.attempt_service.history(auth.id()).await?;
    Ok(HttpResponse::Ok().json(report))
}
