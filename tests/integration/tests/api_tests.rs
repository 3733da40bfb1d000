//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::io::Cursor;

use chrono::{TimeZone, Utc};
use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer, API,
};
use reqwest::{multipart, StatusCode};
use serde_json::{json, Value};

async fn server() -> TestServer {
    TestServer::start().await.expect("Failed to start server")
}

fn png_part(name: &str) -> multipart::Part {
    multipart::Part::bytes(TINY_PNG.to_vec())
        .file_name(name.to_string())
        .mime_str("image/png")
        .unwrap()
}

async fn feed_for(server: &TestServer, query: &str, event_id: i64) -> Vec<OccurrenceResponse> {
    let response = server
        .get(&format!("{API}/events/feed?{query}"), None)
        .await
        .unwrap();
    let feed: Vec<OccurrenceResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    feed.into_iter().filter(|o| o.orig_id == event_id).collect()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let response = server.get("/health", None).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");

    let response = server.get("/health/ready", None).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["database"], true);
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_login_refresh() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (request, registered) = register_user(&server).await.unwrap();
    assert_eq!(registered.user.username, request.username);
    assert!(!registered.user.is_admin);

    let login = LoginRequest {
        email: request.email.to_uppercase(),
        password: request.password.clone(),
    };
    let response = server.post(&format!("{API}/auth/login"), None, &login).await.unwrap();
    let logged_in: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(logged_in.user.id, registered.user.id);

    let response = server
        .post(
            &format!("{API}/auth/refresh"),
            None,
            &json!({ "refresh_token": logged_in.refresh_token }),
        )
        .await
        .unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .get(&format!("{API}/users/@me"), Some(&refreshed.access_token))
        .await
        .unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.email, request.email);
}

#[tokio::test]
async fn test_auth_failures() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (request, _) = register_user(&server).await.unwrap();

    // duplicate email
    let mut duplicate = RegisterRequest::unique();
    duplicate.email = request.email.clone();
    let response = server
        .post(&format!("{API}/auth/register"), None, &duplicate)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // wrong password
    let response = server
        .post(
            &format!("{API}/auth/login"),
            None,
            &LoginRequest {
                email: request.email.clone(),
                password: "Not-The-Password-1".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // no token
    let response = server.get(&format!("{API}/users/@me"), None).await.unwrap();
    let body: Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body["error"]["code"], "MISSING_AUTHORIZATION");

    // malformed email fails field validation
    let mut invalid = RegisterRequest::unique();
    invalid.email = "not-an-email".to_string();
    let response = server
        .post(&format!("{API}/auth/register"), None, &invalid)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(body["error"]["details"]["email"].is_array());
}

// ============================================================================
// Event Tests
// ============================================================================

#[tokio::test]
async fn test_create_event_reports_field_errors() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (_, auth) = register_user(&server).await.unwrap();

    let start = Utc.with_ymd_and_hms(2024, 6, 2, 10, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
    let mut body = event_body("", start, end);
    body["targeted_communities"] = json!(["atlantis"]);

    let response = server
        .post(&format!("{API}/events"), Some(&auth.access_token), &body)
        .await
        .unwrap();
    let error: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    let details = &error["error"]["details"];
    assert!(details["title"].is_array());
    assert!(details["end_time"].is_array());
    assert!(details["targeted_communities"].is_array());
}

#[tokio::test]
async fn test_multi_day_event_feed() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (_, auth) = register_user(&server).await.unwrap();

    let body = event_body(
        "Three day festival",
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 6, 3, 10, 0, 0).unwrap(),
    );
    let event = create_event(&server, &auth.access_token, &body).await.unwrap();

    let occurrences = feed_for(&server, "start=2024-05-01&end=2024-07-01", event.id).await;
    let ids: Vec<&str> = occurrences.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            format!("{}-2024-06-01", event.id),
            format!("{}-2024-06-02", event.id),
            format!("{}-2024-06-03", event.id),
        ]
    );
    assert!(occurrences.iter().all(|o| o.start.ends_with("09:00:00")));
    assert!(occurrences.iter().all(|o| o.end.ends_with("10:00:00")));
}

#[tokio::test]
async fn test_region_feed_filter() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (_, auth) = register_user(&server).await.unwrap();

    let response = server.get(&format!("{API}/calendar/filters"), None).await.unwrap();
    let filters: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let token = filters["region"]["value"].as_str().unwrap().to_string();

    let mut body = future_event_body("Citywide meetup");
    body["targeted_communities"] = json!([token]);
    let event = create_event(&server, &auth.access_token, &body).await.unwrap();
    assert_eq!(event.community_ids.len(), 6);

    let in_region = feed_for(&server, &format!("community={token}"), event.id).await;
    assert_eq!(in_region.len(), 1);

    let sector = event.community_ids[2];
    let in_sector = feed_for(&server, &format!("community={sector}"), event.id).await;
    assert_eq!(in_sector.len(), 1);
}

#[tokio::test]
async fn test_participation_flow() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (_, owner) = register_user(&server).await.unwrap();
    let (_, member) = register_user(&server).await.unwrap();
    let event = create_event(&server, &owner.access_token, &future_event_body("Picnic"))
        .await
        .unwrap();
    let path = format!("{API}/events/{}/participate", event.id);

    // missing event is reported before missing authentication
    let response = server
        .post(&format!("{API}/events/999999999/participate"), None, &json!({"action": "join"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.post(&path, None, &json!({"action": "join"})).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    for _ in 0..2 {
        let response = server
            .post(&path, Some(&member.access_token), &json!({"action": "join"}))
            .await
            .unwrap();
        let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(body, json!({"joined": true, "participants": 1}));
    }

    let response = server
        .get(&format!("{API}/events/{}", event.id), Some(&member.access_token))
        .await
        .unwrap();
    let detail: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail["joined"], true);
    assert_eq!(detail["can_edit"], false);

    let response = server
        .post(&path, Some(&member.access_token), &json!({"action": "leave"}))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body, json!({"joined": false, "participants": 0}));
}

#[tokio::test]
async fn test_edit_and_soft_delete() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (_, owner) = register_user(&server).await.unwrap();
    let (_, stranger) = register_user(&server).await.unwrap();
    let event = create_event(&server, &owner.access_token, &future_event_body("Workshop"))
        .await
        .unwrap();
    let path = format!("{API}/events/{}", event.id);

    let response = server
        .patch(&path, &stranger.access_token, &json!({"title": "Hijacked"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch(&path, &owner.access_token, &json!({"title": "Workshop (moved)"}))
        .await
        .unwrap();
    let edited: EventResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.title, "Workshop (moved)");

    let response = server.delete(&path, &stranger.access_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete(&path, &owner.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path, Some(&owner.access_token)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .patch(&path, &owner.access_token, &json!({"title": "Back"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    assert!(feed_for(&server, "", event.id).await.is_empty());
}

// ============================================================================
// Attendance Tests
// ============================================================================

#[tokio::test]
async fn test_attendance() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (_, owner) = register_user(&server).await.unwrap();
    let (_, member) = register_user(&server).await.unwrap();
    let (_, outsider) = register_user(&server).await.unwrap();

    let upcoming = create_event(&server, &owner.access_token, &future_event_body("Later"))
        .await
        .unwrap();
    let response = server
        .put(
            &format!("{API}/events/{}/attendance", upcoming.id),
            &owner.access_token,
            &json!({"user_ids": []}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let ended = create_event(&server, &owner.access_token, &past_event_body("Earlier"))
        .await
        .unwrap();
    server
        .post(
            &format!("{API}/events/{}/participate", ended.id),
            Some(&member.access_token),
            &json!({"action": "join"}),
        )
        .await
        .unwrap();

    let path = format!("{API}/events/{}/attendance", ended.id);
    let response = server
        .put(
            &path,
            &owner.access_token,
            &json!({"user_ids": [member.user.id, outsider.user.id]}),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["attendee_ids"], json!([member.user.id]));

    let response = server
        .put(&path, &member.access_token, &json!({"user_ids": []}))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Gallery Tests
// ============================================================================

#[tokio::test]
async fn test_gallery_upload_download_delete() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (_, owner) = register_user(&server).await.unwrap();
    let (_, stranger) = register_user(&server).await.unwrap();
    let event = create_event(&server, &owner.access_token, &future_event_body("Photo walk"))
        .await
        .unwrap();
    let images_path = format!("{API}/events/{}/images", event.id);

    let form = multipart::Form::new()
        .part("images", png_part("one.png"))
        .part("images", png_part("two.png"));
    let response = server
        .post_multipart(&images_path, &owner.access_token, form)
        .await
        .unwrap();
    let uploaded: Vec<ImageResponse> = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(uploaded.len(), 2);

    // stored files are served under the media URL
    let response = server.get(&uploaded[0].url, None).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.bytes().await.unwrap().as_ref(), TINY_PNG);

    let not_image = multipart::Form::new().part(
        "images",
        multipart::Part::bytes(b"%PDF-1.4".to_vec())
            .file_name("notes.pdf")
            .mime_str("application/pdf")
            .unwrap(),
    );
    let response = server
        .post_multipart(&images_path, &owner.access_token, not_image)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let ids: Vec<i64> = uploaded.iter().map(|i| i.id).collect();
    let response = server
        .post(&format!("{images_path}/download"), None, &json!({"image_ids": ids}))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/zip");
    let archive = zip::ZipArchive::new(Cursor::new(response.bytes().await.unwrap())).unwrap();
    assert_eq!(archive.len(), 2);

    let response = server
        .post(
            &format!("{images_path}/delete"),
            Some(&stranger.access_token),
            &json!({"image_ids": ids}),
        )
        .await
        .unwrap();
    let result: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result["deleted"], json!([]));
    assert_eq!(result["skipped"].as_array().unwrap().len(), 2);

    let response = server
        .post(
            &format!("{images_path}/delete"),
            Some(&owner.access_token),
            &json!({"image_ids": ids}),
        )
        .await
        .unwrap();
    let result: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result["deleted"].as_array().unwrap().len(), 2);

    let response = server.get(&images_path, None).await.unwrap();
    let remaining: Vec<ImageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(remaining.is_empty());
}

// ============================================================================
// Profile and Lookup Tests
// ============================================================================

#[tokio::test]
async fn test_profile_defaults() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (_, auth) = register_user(&server).await.unwrap();
    let path = format!("{API}/users/@me/profile");

    let response = server.get(&path, Some(&auth.access_token)).await.unwrap();
    let profile: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile["country_id"], Value::Null);

    let response = server
        .patch(&path, &auth.access_token, &json!({"country_id": 987654321}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_lookup_admin_gating() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (_, member) = register_user(&server).await.unwrap();
    let admin = register_admin(&server).await.unwrap();
    let name = format!("Testland {}", unique_suffix());

    let response = server
        .post(
            &format!("{API}/admin/countries"),
            Some(&member.access_token),
            &json!({"name": name}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post(
            &format!("{API}/admin/countries"),
            Some(&admin.access_token),
            &json!({"name": name}),
        )
        .await
        .unwrap();
    let country: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(country["name"], name.as_str());

    let response = server
        .post(
            &format!("{API}/admin/countries"),
            Some(&admin.access_token),
            &json!({"name": name}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server.get(&format!("{API}/countries"), None).await.unwrap();
    let countries: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(countries.iter().any(|c| c["name"] == name.as_str()));
}
