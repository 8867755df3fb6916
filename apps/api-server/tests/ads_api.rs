//! End-to-end tests over the real routes, backed by an in-memory SQLite database.

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use api_server::AppState;
use api_server::handlers::configure_routes;
use api_server::observability::RequestIdMiddleware;
use petboard_infra::{DatabaseConfig, JwtConfig};

async fn test_state() -> AppState {
    let jwt = JwtConfig {
        secret: "integration-test-secret".to_string(),
        ..Default::default()
    };
    AppState::new(&DatabaseConfig::in_memory(), true, jwt)
        .await
        .expect("in-memory database")
}

macro_rules! spawn_app {
    () => {{
        let state = test_state().await;
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new(state.tokens.clone()))
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await
    }};
}

/// Sends a request and returns the status with the decoded JSON body.
macro_rules! send {
    ($app:expr, $req:expr) => {{
        let res = test::call_service(&$app, $req.to_request()).await;
        let status = res.status();
        let body = test::read_body(res).await;
        let json: Value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).expect("json body")
        };
        (status, json)
    }};
}

/// Registers `email` and returns the login response.
macro_rules! sign_in {
    ($app:expr, $email:expr) => {{
        let (status, _) = send!(
            $app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(json!({ "email": $email, "password": "correct-horse", "name": "Owner" }))
        );
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send!(
            $app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(json!({ "email": $email, "password": "correct-horse" }))
        );
        assert_eq!(status, StatusCode::OK);
        body
    }};
}

macro_rules! post_ad {
    ($app:expr, $token:expr, $body:expr) => {{
        send!(
            $app,
            test::TestRequest::post()
                .uri("/ads")
                .insert_header((AUTHORIZATION, format!("Bearer {}", $token)))
                .set_json($body)
        )
    }};
}

fn ad_body(location: &str, geo: &str, time: &str) -> Value {
    json!({
        "status": "lost",
        "type": "dog",
        "breed": "husky",
        "color": "grey",
        "location": location,
        "geoLocation": geo,
        "time": time,
        "name": "Ivan",
        "phone": "+79990000000",
        "extras": { "reward": 5000 },
    })
}

fn ad_ids(body: &Value) -> Vec<i64> {
    body["ads"]
        .as_array()
        .expect("ads array")
        .iter()
        .map(|ad| ad["id"].as_i64().expect("id"))
        .collect()
}

#[actix_web::test]
async fn test_health_carries_request_id() {
    let app = spawn_app!();

    let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/health")
            .insert_header(("X-Request-ID", "trace-me"))
            .to_request(),
    )
    .await;
    assert_eq!(
        res.headers().get("x-request-id").unwrap().to_str().unwrap(),
        "trace-me"
    );
}

#[actix_web::test]
async fn test_submitted_ad_is_listed_first() {
    let app = spawn_app!();
    let auth = sign_in!(app, "owner@example.com");
    let token = auth["access_token"].as_str().unwrap();

    let (status, first) = post_ad!(app, token, ad_body("Kazan, Kremlin", "55.79,49.10", "05.03.2024 18:30:00"));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["success"], true);

    let (_, second) = post_ad!(app, token, ad_body("Kazan, Bauman st.", "55.78,49.12", "06.03.2024 09:00:00"));
    let second_id = second["ad_id"].as_i64().unwrap();
    assert!(second_id > first["ad_id"].as_i64().unwrap());

    let (status, body) = send!(app, test::TestRequest::get().uri("/ads?region=kazan"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(ad_ids(&body)[0], second_id);
    assert_eq!(ad_ids(&body).len(), 2);

    let listed = &body["ads"][0];
    assert_eq!(listed["type"], "dog");
    assert_eq!(listed["time"], "06.03.2024 09:00:00");
    assert_eq!(listed["geoLocation"], "55.78,49.12");
    assert_eq!(listed["name"], "Ivan");
    assert_eq!(listed["extras"]["reward"], 5000);
}

#[actix_web::test]
async fn test_invalid_time_stores_nothing() {
    let app = spawn_app!();
    let auth = sign_in!(app, "owner@example.com");
    let token = auth["access_token"].as_str().unwrap();

    let (status, body) = post_ad!(app, token, ad_body("Moscow", "55.75,37.61", "31.02.2024 10:00:00"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "invalid time format");
    assert!(body.get("ad_id").is_none());

    let (_, body) = send!(app, test::TestRequest::get().uri("/ads?region=moscow"));
    assert!(ad_ids(&body).is_empty());
}

#[actix_web::test]
async fn test_malformed_geoloc_is_rejected() {
    let app = spawn_app!();

    let (status, body) = send!(app, test::TestRequest::get().uri("/ads?geoloc=not-a-number"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "invalid geoloc format");
    assert!(ad_ids(&body).is_empty());
}

#[actix_web::test]
async fn test_unparseable_radius_keeps_envelope() {
    let app = spawn_app!();

    for uri in ["/ads?geoloc=55.75,37.61&radius=abc", "/ads?geoloc=55.75,37.61&radius=-5"] {
        let (status, body) = send!(app, test::TestRequest::get().uri(uri));
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false, "{uri}");
        assert_eq!(body["message"], "invalid query parameters", "{uri}");
        assert!(ad_ids(&body).is_empty(), "{uri}");
    }
}

#[actix_web::test]
async fn test_incomplete_ad_body_keeps_envelope() {
    let app = spawn_app!();
    let auth = sign_in!(app, "owner@example.com");
    let token = auth["access_token"].as_str().unwrap();

    let (status, body) = post_ad!(app, token, json!({ "status": "lost", "type": "dog" }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "invalid request body");
    assert!(body.get("ad_id").is_none());
}

#[actix_web::test]
async fn test_listing_is_capped_at_fifty_newest() {
    let app = spawn_app!();
    let auth = sign_in!(app, "owner@example.com");
    let token = auth["access_token"].as_str().unwrap();

    let mut posted = Vec::new();
    for _ in 0..51 {
        let (status, body) = post_ad!(app, token, ad_body("Tver", "56.86,35.90", "05.03.2024 18:30:00"));
        assert_eq!(status, StatusCode::CREATED);
        posted.push(body["ad_id"].as_i64().unwrap());
    }

    let (status, body) = send!(app, test::TestRequest::get().uri("/ads?region=tver"));
    assert_eq!(status, StatusCode::OK);

    let expected: Vec<i64> = posted.iter().rev().take(50).copied().collect();
    assert_eq!(ad_ids(&body), expected);
}

#[actix_web::test]
async fn test_any_location_without_region_is_empty() {
    let app = spawn_app!();
    let auth = sign_in!(app, "owner@example.com");
    let token = auth["access_token"].as_str().unwrap();
    post_ad!(app, token, ad_body("Moscow", "55.75,37.61", "05.03.2024 18:30:00"));

    let (status, body) = send!(app, test::TestRequest::get().uri("/ads?geoloc=any&status=lost"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(ad_ids(&body).is_empty());
}

#[actix_web::test]
async fn test_radius_search_skips_far_and_unlocated_ads() {
    let app = spawn_app!();
    let auth = sign_in!(app, "owner@example.com");
    let token = auth["access_token"].as_str().unwrap();

    let (_, near) = post_ad!(app, token, ad_body("Moscow, Arbat", "55.752,37.592", "05.03.2024 18:30:00"));
    post_ad!(app, token, ad_body("St Petersburg", "59.93,30.33", "05.03.2024 18:30:00"));
    post_ad!(app, token, ad_body("Moscow, somewhere", "", "05.03.2024 18:30:00"));
    post_ad!(app, token, ad_body("Moscow, typo", "55.75;37.61", "05.03.2024 18:30:00"));

    let (status, body) = send!(
        app,
        test::TestRequest::get().uri("/ads?geoloc=55.75,37.61&radius=10")
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ad_ids(&body), vec![near["ad_id"].as_i64().unwrap()]);
}

#[actix_web::test]
async fn test_attribute_filters_narrow_results() {
    let app = spawn_app!();
    let auth = sign_in!(app, "owner@example.com");
    let token = auth["access_token"].as_str().unwrap();

    let (_, dog) = post_ad!(app, token, ad_body("Kazan", "55.79,49.10", "05.03.2024 18:30:00"));
    let mut cat = ad_body("Kazan", "55.79,49.10", "05.03.2024 18:30:00");
    cat["type"] = json!("cat");
    cat["status"] = json!("found");
    post_ad!(app, token, cat);

    let (_, body) = send!(app, test::TestRequest::get().uri("/ads?region=kazan&type=dog&status=lost"));
    assert_eq!(ad_ids(&body), vec![dog["ad_id"].as_i64().unwrap()]);

    let (_, body) = send!(app, test::TestRequest::get().uri("/ads?region=kazan&type=dog&status=found"));
    assert!(ad_ids(&body).is_empty());
}

#[actix_web::test]
async fn test_submission_requires_access_token() {
    let app = spawn_app!();

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/ads")
            .set_json(ad_body("Moscow", "55.75,37.61", "05.03.2024 18:30:00"))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let auth = sign_in!(app, "owner@example.com");
    let refresh = auth["refresh_token"].as_str().unwrap();
    let (status, _) = post_ad!(app, refresh, ad_body("Moscow", "55.75,37.61", "05.03.2024 18:30:00"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post_ad!(app, "garbage", ad_body("Moscow", "55.75,37.61", "05.03.2024 18:30:00"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_refresh_flow() {
    let app = spawn_app!();
    let auth = sign_in!(app, "owner@example.com");
    assert_eq!(auth["token_type"], "Bearer");
    assert_eq!(auth["expires_in"], 300);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/refresh")
            .set_json(json!({ "refresh_token": auth["access_token"] }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, renewed) = send!(
        app,
        test::TestRequest::post()
            .uri("/refresh")
            .set_json(json!({ "refresh_token": auth["refresh_token"] }))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, me) = send!(
        app,
        test::TestRequest::get().uri("/me").insert_header((
            AUTHORIZATION,
            format!("Bearer {}", renewed["access_token"].as_str().unwrap())
        ))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "owner@example.com");
    assert_eq!(me["name"], "Owner");
}

#[actix_web::test]
async fn test_registration_errors() {
    let app = spawn_app!();
    sign_in!(app, "owner@example.com");

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/register")
            .set_json(json!({ "email": "owner@example.com", "password": "another-password" }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/register")
            .set_json(json!({ "email": "not-an-email", "password": "short" }))
    );
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["title"], "Validation Failed");

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": "owner@example.com", "password": "wrong-password" }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
