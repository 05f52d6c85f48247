pub mod attempt_handler;
pub mod graphql_handler;
pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

use crate::{auth::AuthMiddleware, errors::AppError};

pub use health_handler::{health_check, health_check_ready};

/// Bearer-protected REST routes under `/api`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .wrap(AuthMiddleware)
            .service(quiz_handler::create_quiz)
            .service(quiz_handler::list_my_quizzes)
            .service(quiz_handler::get_quiz_for_taking)
            .service(quiz_handler::rename_quiz)
            .service(quiz_handler::pin_quiz)
            .service(quiz_handler::delete_quiz)
            .service(quiz_handler::submit_attempt)
            .service(quiz_handler::generated_quiz_json_schema)
            .service(attempt_handler::get_attempt)
            .service(attempt_handler::get_history),
    );
}

/// `/graphql` behind bearer auth, `/graphiql` open.
pub fn configure_graphql(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/graphql")
            .wrap(AuthMiddleware)
            .route(web::post().to(graphql_handler::graphql)),
    )
    .service(web::resource("/graphiql").route(web::get().to(graphql_handler::graphiql)));
}

/// Malformed JSON bodies and query strings answer with the JSON error body.
pub fn extractor_configs(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid request body: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid query string: {}", err)).into()
    }));
}

/// Health checks, then the GraphQL and REST surfaces.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(extractor_configs)
        .service(health_check)
        .service(health_check_ready)
        .configure(configure_graphql)
        .configure(configure_api);
}
