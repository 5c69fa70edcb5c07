//! # Post Handler Tests

use crate::handlers::test_support::{CallCounts, TestApp};
use crate::middleware::mw_req_stamp::REQUEST_ID_HEADER;
use axum::http::{Method, StatusCode};
use jsonwebtoken::{encode, EncodingKey, Header};
use lib_auth::Claims;
use serde_json::json;

/// App with one signed-up user; returns the app, the user's id and a token.
async fn app_with_author() -> (TestApp, i64, String) {
    let app = TestApp::new().await;
    let user = app.signup("a", "a@x.com", "pw").await;
    let id = user["id"].as_i64().unwrap();
    let token = app.login("a@x.com", "pw").await;
    (app, id, token)
}

fn expired_token(secret: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        id: 1,
        email: "a@x.com".to_string(),
        iat: now - 3 * 3600,
        exp: now - 2 * 3600,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

// region: --- Reads

#[tokio::test]
async fn test_list_posts_public() {
    let (app, author, token) = app_with_author().await;
    app.create_post(&token, "one", "first", author).await;
    app.create_post(&token, "two", "second", author).await;

    let res = app.get("/posts").await;

    assert_eq!(res.status, StatusCode::OK);
    let posts = res.body.as_array().expect("array of posts");
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["title"], "one");
    assert_eq!(posts[1]["title"], "two");
}

#[tokio::test]
async fn test_get_post() {
    let (app, author, token) = app_with_author().await;
    let post = app.create_post(&token, "t", "c", author).await;
    let id = post["id"].as_i64().unwrap();

    let res = app.get(&format!("/posts/{}", id)).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body,
        json!({ "id": id, "title": "t", "content": "c", "authorId": author })
    );
}

#[tokio::test]
async fn test_get_post_not_found() {
    let app = TestApp::new().await;

    let res = app.get("/posts/990").await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.error(), "Post not found");
}

#[tokio::test]
async fn test_get_post_invalid_id() {
    let app = TestApp::new().await;

    let res = app.get("/posts/abc").await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "Invalid post id");
    assert_eq!(app.posts.calls.total(), 0);
}

// endregion: --- Reads

// region: --- Authorization gate

#[tokio::test]
async fn test_create_post_without_token() {
    let app = TestApp::new().await;

    let res = app
        .request(
            Method::POST,
            "/posts",
            Some(json!({ "title": "t", "content": "c", "authorId": 1 })),
            None,
        )
        .await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["code"], "Unauthorized");
    assert_eq!(app.posts.calls.total(), 0);
}

#[tokio::test]
async fn test_create_post_with_expired_token() {
    let app = TestApp::new().await;
    let token = expired_token(&app.config.jwt_secret);

    let res = app
        .request(
            Method::POST,
            "/posts",
            Some(json!({ "title": "t", "content": "c", "authorId": 1 })),
            Some(&token),
        )
        .await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.posts.calls.total(), 0);
}

#[tokio::test]
async fn test_create_post_with_foreign_token() {
    let app = TestApp::new().await;
    let token = lib_auth::encode_jwt(
        1,
        "a@x.com".to_string(),
        "another-secret-that-is-also-32-characters-long",
        1,
    )
    .unwrap();

    let res = app
        .request(
            Method::POST,
            "/posts",
            Some(json!({ "title": "t", "content": "c", "authorId": 1 })),
            Some(&token),
        )
        .await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.posts.calls.total(), 0);
}

#[tokio::test]
async fn test_update_and_delete_require_token() {
    let (app, author, token) = app_with_author().await;
    let post = app.create_post(&token, "t", "c", author).await;
    let uri = format!("/posts/{}", post["id"]);

    let put = app
        .request(Method::PUT, &uri, Some(json!({ "title": "x" })), None)
        .await;
    let delete = app.request(Method::DELETE, &uri, None, Some("garbage")).await;

    assert_eq!(put.status, StatusCode::UNAUTHORIZED);
    assert_eq!(delete.status, StatusCode::UNAUTHORIZED);
    assert_eq!(CallCounts::get(&app.posts.calls.update), 0);
    assert_eq!(CallCounts::get(&app.posts.calls.delete), 0);
}

// endregion: --- Authorization gate

// region: --- Create

#[tokio::test]
async fn test_create_post_string_author_id() {
    let (app, author, token) = app_with_author().await;

    let res = app
        .request(
            Method::POST,
            "/posts",
            Some(json!({ "title": "t", "content": "c", "authorId": author.to_string() })),
            Some(&token),
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["post"]["authorId"], author);
}

#[tokio::test]
async fn test_create_post_validation() {
    let (app, _, token) = app_with_author().await;

    let cases = [
        (json!({ "content": "c", "authorId": 1 }), "title is required"),
        (json!({ "title": "", "content": "c", "authorId": 1 }), "title cannot be empty"),
        (json!({ "title": "t", "authorId": 1 }), "content is required"),
        (json!({ "title": "t", "content": "c" }), "authorId is required"),
        (
            json!({ "title": "t", "content": "c", "authorId": "abc" }),
            "authorId must be an integer",
        ),
        (
            json!({ "title": "t".repeat(256), "content": "c", "authorId": 1 }),
            "title must be at most 255 characters",
        ),
    ];

    for (body, expected) in cases {
        let res = app.request(Method::POST, "/posts", Some(body), Some(&token)).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "expected 400 for {}", expected);
        assert_eq!(res.error(), expected);
    }
    assert_eq!(CallCounts::get(&app.posts.calls.create), 0);
}

// endregion: --- Create

// region: --- Update / Delete

#[tokio::test]
async fn test_update_post_partial() {
    let (app, author, token) = app_with_author().await;
    let post = app.create_post(&token, "t", "c", author).await;
    let uri = format!("/posts/{}", post["id"]);

    let res = app
        .request(Method::PUT, &uri, Some(json!({ "content": "edited" })), Some(&token))
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Post updated successfully");
    assert_eq!(res.body["post"]["title"], "t");
    assert_eq!(res.body["post"]["content"], "edited");
    assert_eq!(res.body["post"]["authorId"], author);
}

#[tokio::test]
async fn test_update_post_rejects_null() {
    let (app, author, token) = app_with_author().await;
    let post = app.create_post(&token, "t", "c", author).await;
    let uri = format!("/posts/{}", post["id"]);

    let res = app
        .request(Method::PUT, &uri, Some(json!({ "title": null })), Some(&token))
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "title cannot be null");
    assert_eq!(CallCounts::get(&app.posts.calls.update), 0);
}

#[tokio::test]
async fn test_update_post_not_found() {
    let (app, _, token) = app_with_author().await;

    let res = app
        .request(Method::PUT, "/posts/990", Some(json!({ "title": "x" })), Some(&token))
        .await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.error(), "Post not found");
    assert_eq!(app.posts.calls.mutations(), 0);
}

#[tokio::test]
async fn test_delete_post_twice() {
    let (app, author, token) = app_with_author().await;
    let post = app.create_post(&token, "t", "c", author).await;
    let id = post["id"].as_i64().unwrap();
    let uri = format!("/posts/{}", id);

    let first = app.request(Method::DELETE, &uri, None, Some(&token)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, json!({ "message": "Post deleted successfully", "id": id }));

    let second = app.request(Method::DELETE, &uri, None, Some(&token)).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);
    assert_eq!(second.error(), "Post not found");
    assert_eq!(CallCounts::get(&app.posts.calls.delete), 1);
}

#[tokio::test]
async fn test_concurrent_deletes_one_wins() {
    let (app, author, token) = app_with_author().await;
    let post = app.create_post(&token, "t", "c", author).await;
    let uri = format!("/posts/{}", post["id"]);

    let (first, second) = tokio::join!(
        app.request(Method::DELETE, &uri, None, Some(&token)),
        app.request(Method::DELETE, &uri, None, Some(&token)),
    );

    let mut statuses = [first.status, second.status];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::NOT_FOUND]);
}

#[tokio::test]
async fn test_delete_post_invalid_id() {
    let (app, _, token) = app_with_author().await;

    let res = app.request(Method::DELETE, "/posts/x1", None, Some(&token)).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "Invalid post id");
    assert_eq!(app.posts.calls.total(), 0);
}

// endregion: --- Update / Delete

// region: --- Router

#[tokio::test]
async fn test_request_id_header() {
    let app = TestApp::new().await;

    let ok = app.get("/posts").await;
    let not_found = app.get("/posts/990").await;

    assert!(ok.headers.contains_key(REQUEST_ID_HEADER));
    assert!(not_found.headers.contains_key(REQUEST_ID_HEADER));
    assert_ne!(ok.headers[REQUEST_ID_HEADER], not_found.headers[REQUEST_ID_HEADER]);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new().await;

    let res = app.get("/comments").await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.error(), "Route not found");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let res = app.get("/health").await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!("OK"));
}

// endregion: --- Router
