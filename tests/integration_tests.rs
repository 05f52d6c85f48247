mod common;

use actix_web::{http::StatusCode, test, web, App};
use quizify_server::{
    auth::JwtService, graphql::create_schema, handlers, middleware::RequestIdMiddleware,
    repositories::QuizRepository,
};
use secrecy::SecretString;
use serde_json::{json, Value};

use common::{harness, quiz_with_questions, Harness, JWT_SECRET};

fn token_for(user_id: &str) -> String {
    JwtService::new(&SecretString::from(JWT_SECRET.to_string()), 1)
        .create_token(user_id, &format!("{}@example.com", user_id))
        .unwrap()
}

macro_rules! init_app {
    ($h:expr) => {{
        let state = $h.state.clone();
        let schema = create_schema(state.clone());
        let jwt = JwtService::new(&SecretString::from(JWT_SECRET.to_string()), 1);
        test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .app_data(web::Data::new(schema))
                .app_data(web::Data::new(jwt))
                .wrap(RequestIdMiddleware)
                .configure(handlers::configure),
        )
        .await
    }};
}

async fn seed_quiz(h: &Harness, id: &str, owner: &str) {
    h.quizzes
        .create(quiz_with_questions(id, owner, "Seeded", 5))
        .await
        .unwrap();
}

#[actix_web::test]
async fn test_health_is_public() {
    let h = harness(1024);
    let app = init_app!(h);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
}

#[actix_web::test]
async fn test_readiness_without_database_is_unavailable() {
    let h = harness(1024);
    let app = init_app!(h);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["dependencies"]["mongodb"], "not_configured");
}

#[actix_web::test]
async fn test_api_requires_bearer_token() {
    let h = harness(1024);
    let app = init_app!(h);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/history").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["category"], "auth");
    assert_eq!(body["code"], 401);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/history")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_upload_take_and_review_flow() {
    let h = harness(1024);
    let app = init_app!(h);
    let owner = token_for("owner");

    let req = test::TestRequest::post()
        .uri("/api/quizzes?question_count=3&file_name=notes.pdf")
        .insert_header(("Authorization", format!("Bearer {}", owner)))
        .insert_header(("Content-Type", "application/pdf"))
        .set_payload(&b"%PDF-1.7 test"[..])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let quiz_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["question_count"], 3);
    assert_eq!(
        created["share_url"],
        format!("https://quizify.test/quiz/{}", quiz_id)
    );

    let taker = token_for("taker");
    let req = test::TestRequest::get()
        .uri(&format!("/api/quizzes/{}", quiz_id))
        .insert_header(("Authorization", format!("Bearer {}", taker)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let taking: Value = test::read_body_json(resp).await;
    assert_eq!(taking["questions"].as_array().unwrap().len(), 3);
    assert!(taking["questions"][0].get("correct_answer_index").is_none());

    // stub key: q1 -> 1, q2 -> 0, q3 -> 1
    let req = test::TestRequest::post()
        .uri(&format!("/api/quizzes/{}/attempts", quiz_id))
        .insert_header(("Authorization", format!("Bearer {}", taker)))
        .set_json(json!({ "answers": { "q1": 1, "q2": 0, "q3": 0 } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let attempt: Value = test::read_body_json(resp).await;
    assert_eq!(attempt["correct"], 2);
    assert_eq!(attempt["incorrect"], 1);
    assert_eq!(attempt["score"], 67);
    assert_eq!(attempt["band"], "fair");
    assert_eq!(attempt["band_label"], "Fair");
    let attempt_id = attempt["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/attempts/{}", attempt_id))
        .insert_header(("Authorization", format!("Bearer {}", taker)))
        .to_request();
    let review: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(review["questions"][2]["selected_option_index"], 0);
    assert_eq!(review["questions"][2]["is_correct"], false);

    let req = test::TestRequest::get()
        .uri(&format!("/api/attempts/{}", attempt_id))
        .insert_header(("Authorization", format!("Bearer {}", owner)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/history")
        .insert_header(("Authorization", format!("Bearer {}", taker)))
        .to_request();
    let history: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(history["summary"]["total_quizzes_taken"], 1);
    assert_eq!(history["summary"]["overall_accuracy"], 67);
    assert_eq!(history["chart"][0]["label"], "Quiz from notes.pdf");
}

#[actix_web::test]
async fn test_upload_errors_carry_categories() {
    let h = harness(16);
    let app = init_app!(h);
    let token = token_for("owner");

    let req = test::TestRequest::post()
        .uri("/api/quizzes?question_count=3")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .insert_header(("Content-Type", "text/plain"))
        .set_payload("hello")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["category"], "file");

    let req = test::TestRequest::post()
        .uri("/api/quizzes?question_count=3")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .insert_header(("Content-Type", "application/pdf"))
        .set_payload(vec![b'x'; 17])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["category"], "payload");

    let req = test::TestRequest::post()
        .uri("/api/quizzes?question_count=zero")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .insert_header(("Content-Type", "application/pdf"))
        .set_payload("%PDF")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_large_upload_gets_payload_category() {
    let h = harness(16);
    let app = init_app!(h);

    for size in [18, 1024, 64 * 1024] {
        let req = test::TestRequest::post()
            .uri("/api/quizzes?question_count=3&file_name=big.pdf")
            .insert_header(("Authorization", format!("Bearer {}", token_for("owner"))))
            .insert_header(("Content-Type", "application/pdf"))
            .set_payload(vec![b'x'; size])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE, "size {}", size);
        assert_eq!(
            resp.headers().get("content-type").and_then(|v| v.to_str().ok()),
            Some("application/json")
        );

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 413);
        assert_eq!(body["category"], "payload");
        assert_eq!(body["error"], "Payload too large: File exceeds the 16 bytes limit");
    }
    assert!(h.quizzes.list_by_owner("owner").await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_malformed_json_body_gets_general_category() {
    let h = harness(1024);
    seed_quiz(&h, "quiz-1", "owner").await;
    let app = init_app!(h);
    let token = token_for("owner");

    let req = test::TestRequest::post()
        .uri("/api/quizzes/quiz-1/attempts")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "answers": { "q1": "one" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 400);
    assert_eq!(body["category"], "general");
    assert!(h.attempts.all().await.is_empty());

    let req = test::TestRequest::put()
        .uri("/api/quizzes/quiz-1/pin")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"pinned\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["category"], "general");
}

#[actix_web::test]
async fn test_blank_rename_by_non_owner_is_forbidden() {
    let h = harness(1024);
    seed_quiz(&h, "quiz-1", "owner").await;
    let app = init_app!(h);

    let req = test::TestRequest::patch()
        .uri("/api/quizzes/quiz-1/title")
        .insert_header(("Authorization", format!("Bearer {}", token_for("intruder"))))
        .set_json(json!({ "title": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_owner_management_over_rest() {
    let h = harness(1024);
    seed_quiz(&h, "quiz-1", "owner").await;
    let app = init_app!(h);
    let owner = token_for("owner");
    let intruder = token_for("intruder");

    let req = test::TestRequest::patch()
        .uri("/api/quizzes/quiz-1/title")
        .insert_header(("Authorization", format!("Bearer {}", intruder)))
        .set_json(json!({ "title": "Mine now" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri("/api/quizzes/quiz-1/pin")
        .insert_header(("Authorization", format!("Bearer {}", owner)))
        .set_json(json!({ "pinned": true }))
        .to_request();
    let pinned: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(pinned["is_pinned"], true);

    let req = test::TestRequest::get()
        .uri("/api/quizzes")
        .insert_header(("Authorization", format!("Bearer {}", owner)))
        .to_request();
    let listing: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listing["pinned"][0]["id"], "quiz-1");
    assert_eq!(listing["others"].as_array().unwrap().len(), 0);

    let req = test::TestRequest::delete()
        .uri("/api/quizzes/quiz-1")
        .insert_header(("Authorization", format!("Bearer {}", owner)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/quizzes/quiz-1")
        .insert_header(("Authorization", format!("Bearer {}", owner)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_generated_quiz_schema_endpoint() {
    let h = harness(1024);
    let app = init_app!(h);

    let req = test::TestRequest::get()
        .uri("/api/schema/generated-quiz")
        .insert_header(("Authorization", format!("Bearer {}", token_for("dev"))))
        .to_request();
    let schema: Value = test::call_and_read_body_json(&app, req).await;
    assert!(schema.to_string().contains("correctAnswerIndex"));
}

#[actix_web::test]
async fn test_graphql_submit_and_history() {
    let h = harness(1024);
    seed_quiz(&h, "quiz-1", "author").await;
    let app = init_app!(h);
    let token = token_for("student");

    let submit = json!({
        "query": "mutation Submit($input: SubmitQuizAttemptInput!) { submitQuizAttempt(input: $input) { correct total score band } }",
        "variables": {
            "input": {
                "quizId": "quiz-1",
                "answers": [
                    { "questionId": "q1", "selectedOptionIndex": 0 },
                    { "questionId": "q2", "selectedOptionIndex": 0 },
                    { "questionId": "q3", "selectedOptionIndex": 0 },
                    { "questionId": "q4", "selectedOptionIndex": 1 },
                    { "questionId": "q5", "selectedOptionIndex": 1 }
                ]
            }
        }
    });
    let req = test::TestRequest::post()
        .uri("/graphql")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(submit)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["submitQuizAttempt"]["score"], 60);
    assert_eq!(body["data"]["submitQuizAttempt"]["band"], "FAIR");

    let req = test::TestRequest::post()
        .uri("/graphql")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "query": "{ history { summary { totalQuizzesTaken averageScore overallAccuracy } chart { label score } } }" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["history"]["summary"]["totalQuizzesTaken"], 1);
    assert_eq!(body["data"]["history"]["summary"]["averageScore"], 60);
    assert_eq!(body["data"]["history"]["chart"][0]["label"], "Seeded");
}

#[actix_web::test]
async fn test_graphql_errors_carry_code_and_category() {
    let h = harness(1024);
    seed_quiz(&h, "quiz-1", "owner").await;
    let app = init_app!(h);

    let req = test::TestRequest::post()
        .uri("/graphql")
        .insert_header(("Authorization", format!("Bearer {}", token_for("intruder"))))
        .set_json(json!({ "query": "mutation { deleteQuiz(id: \"quiz-1\") { quizId } }" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let extensions = &body["errors"][0]["extensions"];
    assert_eq!(extensions["code"], "FORBIDDEN");
    assert_eq!(extensions["category"], "auth");
    assert!(h.quizzes.find_by_id("quiz-1").await.unwrap().is_some());
}

#[actix_web::test]
async fn test_graphql_requires_token_but_playground_is_open() {
    let h = harness(1024);
    let app = init_app!(h);

    let req = test::TestRequest::post()
        .uri("/graphql")
        .set_json(json!({ "query": "{ myQuizzes { pinned { id } } }" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/graphiql").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
