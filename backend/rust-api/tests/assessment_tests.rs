use axum::http::StatusCode;

mod common;

use common::answers;

#[tokio::test]
async fn questions_are_public() {
    let app = common::create_test_app().await;

    let (status, body) = app.get("/api/v1/assessment/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    let questions = body.as_array().unwrap();
    assert_eq!(questions.len(), 10);
    assert!(questions[0]["visual_answer"].is_string());
}

#[tokio::test]
async fn submit_classifies_and_persists() {
    let app = common::create_test_app().await;
    let token = app.register("quinn@example.com", "quinn").await;

    let submission = answers(&[
        "kinesthetic",
        "auditory",
        "kinesthetic",
        "visual",
        "kinesthetic",
        "kinesthetic",
        "auditory",
        "kinesthetic",
        "visual",
        "kinesthetic",
    ]);
    let (status, body) = app
        .post("/api/v1/assessment/submit", Some(&token), submission)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["learning_style"], "kinesthetic");
    assert_eq!(body["scores"]["kinesthetic"], 6);
    assert_eq!(body["scores"]["visual"], 2);
    assert!((body["confidence"].as_f64().unwrap() - 0.6).abs() < 1e-9);

    let (status, me) = app.get("/api/v1/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["learning_style"], "kinesthetic");
    assert_eq!(me["assessment_completed"], true);

    let (status, result) = app.get("/api/v1/assessment/result", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result, body);
}

#[tokio::test]
async fn tie_goes_to_first_style() {
    let app = common::create_test_app().await;
    let token = app.register("tie@example.com", "tie_user").await;

    let submission = answers(&[
        "auditory",
        "auditory",
        "auditory",
        "auditory",
        "visual",
        "visual",
        "visual",
        "visual",
        "kinesthetic",
        "kinesthetic",
    ]);
    let (status, body) = app
        .post("/api/v1/assessment/submit", Some(&token), submission)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["learning_style"], "visual");
    assert!((body["confidence"].as_f64().unwrap() - 0.4).abs() < 1e-9);
}

#[tokio::test]
async fn wrong_answer_count_is_rejected_without_side_effects() {
    let app = common::create_test_app().await;
    let token = app.login("alex@example.com").await;

    let (status, body) = app
        .post(
            "/api/v1/assessment/submit",
            Some(&token),
            answers(&["auditory"; 9]),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Assessment must have exactly 10 answers, got 9");

    let (_, me) = app.get("/api/v1/auth/me", Some(&token)).await;
    assert_eq!(me["learning_style"], "visual");
    assert_eq!(me["assessment_score"]["visual"], 7);
}

#[tokio::test]
async fn unknown_label_is_rejected_by_name() {
    let app = common::create_test_app().await;
    let token = app.login("mike@example.com").await;

    let mut labels = ["visual"; 10];
    labels[9] = "telepathic";
    let (status, body) = app
        .post("/api/v1/assessment/submit", Some(&token), answers(&labels))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid answer: telepathic");

    let (_, me) = app.get("/api/v1/auth/me", Some(&token)).await;
    assert_eq!(me["learning_style"], "kinesthetic");
}

#[tokio::test]
async fn result_before_assessment_is_not_found() {
    let app = common::create_test_app().await;
    let token = app.register("fresh@example.com", "fresh").await;

    let (status, _) = app.get("/api/v1/assessment/result", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn seeded_result_recomputes_confidence() {
    let app = common::create_test_app().await;
    let token = app.login("sarah@example.com").await;

    let (status, body) = app.get("/api/v1/assessment/result", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["learning_style"], "auditory");
    assert!((body["confidence"].as_f64().unwrap() - 0.7).abs() < 1e-9);
}

#[tokio::test]
async fn result_follows_profile_style_change() {
    let app = common::create_test_app().await;
    let token = app.register("remi@example.com", "remi").await;

    let (status, _) = app
        .post(
            "/api/v1/assessment/submit",
            Some(&token),
            answers(&["visual"; 10]),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .put(
            "/api/v1/users/me",
            Some(&token),
            serde_json::json!({ "learning_style": "kinesthetic" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, result) = app.get("/api/v1/assessment/result", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["learning_style"], "kinesthetic");
    assert_eq!(result["scores"]["visual"], 10);
    assert_eq!(result["confidence"], 1.0);

    let (_, adaptive) = app.get("/api/v1/content/1/adaptive", Some(&token)).await;
    assert_eq!(adaptive["recommended_format"], "interactive");
    assert_eq!(
        adaptive["personalization_reason"],
        "Recommended based on your kinesthetic learning preference"
    );
}

#[tokio::test]
async fn reset_clears_assessment() {
    let app = common::create_test_app().await;
    let token = app.login("mike@example.com").await;

    let (status, _) = app
        .post(
            "/api/v1/assessment/reset",
            Some(&token),
            serde_json::json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get("/api/v1/assessment/result", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, me) = app.get("/api/v1/auth/me", Some(&token)).await;
    assert!(me["learning_style"].is_null());
    assert_eq!(me["assessment_completed"], false);
}

#[tokio::test]
async fn submit_requires_authentication() {
    let app = common::create_test_app().await;

    let (status, _) = app
        .post("/api/v1/assessment/submit", None, answers(&["visual"; 10]))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
