mod common;

use axum::http::StatusCode;
use roommeet::db;
use sqlx::SqlitePool;

use common::{body_text, location, session_cookie, TestApp, PASSWORD};

#[sqlx::test]
async fn login_succeeds_case_insensitively(pool: SqlitePool) {
    let app = TestApp::new(pool);
    app.register("alice").await;

    let response = app
        .post("/login/?return_url=/create-room/", &format!("username=ALICE&password={PASSWORD}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/create-room/");

    let cookie = session_cookie(&response);
    let response = app.get("/create-room/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test]
async fn bad_credentials_share_one_message(pool: SqlitePool) {
    let app = TestApp::new(pool);
    app.register("alice").await;

    for form in ["username=alice&password=wrong-password", "username=nobody&password=whatever1"] {
        let response = app.post("/login/", form, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Username or password is incorrect"));
    }
}

#[sqlx::test]
async fn logged_in_users_skip_login_and_register(pool: SqlitePool) {
    let app = TestApp::new(pool);
    let alice = app.register("alice").await;

    for uri in ["/login/", "/register/"] {
        let response = app.get(uri, Some(&alice)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
    }
}

#[sqlx::test]
async fn logout_ends_the_session(pool: SqlitePool) {
    let app = TestApp::new(pool);
    let alice = app.register("alice").await;

    let response = app.get("/logout/", Some(&alice)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = app.get("/create-room/", Some(&alice)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/login/"));
}

#[sqlx::test]
async fn registration_errors_are_reported(pool: SqlitePool) {
    let app = TestApp::new(pool);
    app.register("alice").await;

    for form in [
        format!("username=Alice&password1={PASSWORD}&password2={PASSWORD}"),
        format!("username=bob&password1={PASSWORD}&password2=different-horse"),
        "username=bob&password1=short&password2=short".to_owned(),
    ] {
        let response = app.post("/register/", &form, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{form}");
        assert!(body_text(response).await.contains("An error occurred during registration"));
    }

    assert!(db::users::find_by_username(&app.pool, "bob").await.unwrap().is_none());
}

#[sqlx::test]
async fn edit_user_updates_own_profile(pool: SqlitePool) {
    let app = TestApp::new(pool);
    let alice = app.register("alice").await;
    let alice_id = app.user_id("alice").await;

    let response = app.get(&format!("/edit-user/{alice_id}"), Some(&alice)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("value=\"alice\""));

    let response = app
        .post(
            &format!("/edit-user/{alice_id}"),
            "username=alicia&email=alicia%40example.com&bio=hello&avatar=",
            Some(&alice),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/profile/{alice_id}"));

    let user = db::users::find(&app.pool, alice_id).await.unwrap().unwrap();
    assert_eq!(user.username, "alicia");
    assert_eq!(user.email, "alicia@example.com");
    assert_eq!(user.bio, "hello");
}

#[sqlx::test]
async fn edit_user_redisplays_invalid_form(pool: SqlitePool) {
    let app = TestApp::new(pool);
    let alice = app.register("alice").await;
    app.register("bob").await;
    let alice_id = app.user_id("alice").await;

    for form in [
        "username=alice&email=not-an-email&bio=&avatar=",
        "username=bob&email=&bio=&avatar=",
    ] {
        let response = app.post(&format!("/edit-user/{alice_id}"), form, Some(&alice)).await;
        assert_eq!(response.status(), StatusCode::OK, "{form}");
    }

    let user = db::users::find(&app.pool, alice_id).await.unwrap().unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "");
}

#[sqlx::test]
async fn profile_shows_hosted_rooms(pool: SqlitePool) {
    let app = TestApp::new(pool);
    let alice = app.register("alice").await;
    app.create_room(&alice, "Games", "Chess").await;
    app.create_room(&alice, "Music", "Jazz").await;
    let alice_id = app.user_id("alice").await;

    let body = body_text(app.get(&format!("/profile/{alice_id}?q=game"), None).await).await;
    assert!(body.contains("@alice"));
    assert!(body.contains("Chess"));
    assert!(!body.contains(">Jazz<"));
}
