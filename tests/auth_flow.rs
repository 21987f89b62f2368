mod common;

use axum::http::StatusCode;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use activity_hub::{
    auth::providers::local::INVALID_CREDENTIALS,
    db::entities::{food_photo, food_review, note, photo, pokemon_review, session, todo, user},
    error::AppError,
    routes::response::SIGN_IN_TO_CONTINUE,
    services::{
        ServiceContext,
        auth_service::{ACCOUNT_DELETED, CONFIRM_DELETE},
        user_service::EMAIL_TAKEN,
    },
};
use common::{PASSWORD, TestApp, body_text, location, row_ids, session_cookie};

#[tokio::test]
async fn landing_page_offers_sign_in_and_sign_up() {
    let app = TestApp::spawn().await;

    let res = app.get("/", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains(r#"action="/auth/sign-in""#));
    assert!(body.contains(r#"action="/auth/sign-up""#));
    assert!(!body.contains("Signed in as"));
}

#[tokio::test]
async fn sign_up_starts_a_session() {
    let app = TestApp::spawn().await;
    let cookie = app.sign_up("Alice@Example.com ").await;
    assert!(cookie.starts_with("activity_session="));

    let body = body_text(app.get("/", Some(&cookie)).await).await;
    assert!(body.contains("Signed in as alice@example.com"));
    assert!(body.contains(r#"href="/todos""#));
}

#[tokio::test]
async fn duplicate_sign_up_is_rejected() {
    let app = TestApp::spawn().await;
    app.sign_up("bob@example.com").await;

    let res = app
        .post(
            "/auth/sign-up",
            &[("email", "bob@example.com"), ("password", PASSWORD)],
            None,
        )
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert!(location(&res).starts_with("/?error="));
    assert!(session_cookie(&res).is_none());
}

#[tokio::test]
async fn wrong_password_does_not_sign_in() {
    let app = TestApp::spawn().await;
    app.sign_up("carol@example.com").await;

    let res = app
        .post(
            "/auth/sign-in",
            &[("email", "carol@example.com"), ("password", "not it at all")],
            None,
        )
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert!(session_cookie(&res).is_none());

    let body = body_text(app.get(&location(&res), None).await).await;
    assert!(body.contains(INVALID_CREDENTIALS));
}

#[tokio::test]
async fn sign_in_then_sign_out() {
    let app = TestApp::spawn().await;
    app.sign_up("dave@example.com").await;

    let res = app
        .post(
            "/auth/sign-in",
            &[("email", "dave@example.com"), ("password", PASSWORD)],
            None,
        )
        .await;
    assert_eq!(location(&res), "/?notice=Signed%20in.");
    let cookie = session_cookie(&res).unwrap();
    assert_eq!(app.get("/todos", Some(&cookie)).await.status(), StatusCode::OK);

    let res = app.post("/auth/sign-out", &[], Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(session_cookie(&res).as_deref(), Some("activity_session="));

    // the old token is revoked server side, not just forgotten by the browser
    let res = app.get("/todos", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");
}

#[tokio::test]
async fn protected_pages_redirect_anonymous_visitors() {
    let app = TestApp::spawn().await;

    for page in ["/todos", "/drive", "/food", "/pokemon", "/notes"] {
        let res = app.get(page, None).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "{page}");
        assert_eq!(location(&res), "/", "{page}");
    }
}

#[tokio::test]
async fn anonymous_actions_are_unauthorized() {
    let app = TestApp::spawn().await;

    let res = app.post("/todos/create", &[("title", "Sneaky")], None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(body_text(res).await.contains(SIGN_IN_TO_CONTINUE));

    let res = app
        .post("/notes/delete", &[("id", "6b1f8a53-0000-4000-8000-000000000000")], None)
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn account_deletion_needs_confirmation() {
    let app = TestApp::spawn().await;
    let cookie = app.sign_up("erin@example.com").await;

    let res = app.post("/auth/delete-account", &[], Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert!(session_cookie(&res).is_none());
    let body = body_text(app.get(&location(&res), Some(&cookie)).await).await;
    assert!(body.contains(CONFIRM_DELETE));
    assert!(body.contains("Signed in as erin@example.com"));
}

async fn owned_counts(app: &TestApp, owner: Uuid) -> [u64; 7] {
    let db = &app.db;
    [
        todo::Entity::find().filter(todo::Column::UserId.eq(owner)).count(db).await.unwrap(),
        photo::Entity::find().filter(photo::Column::UserId.eq(owner)).count(db).await.unwrap(),
        food_photo::Entity::find()
            .filter(food_photo::Column::UserId.eq(owner))
            .count(db)
            .await
            .unwrap(),
        food_review::Entity::find()
            .filter(food_review::Column::UserId.eq(owner))
            .count(db)
            .await
            .unwrap(),
        pokemon_review::Entity::find()
            .filter(pokemon_review::Column::UserId.eq(owner))
            .count(db)
            .await
            .unwrap(),
        note::Entity::find().filter(note::Column::UserId.eq(owner)).count(db).await.unwrap(),
        session::Entity::find()
            .filter(session::Column::UserId.eq(owner))
            .count(db)
            .await
            .unwrap(),
    ]
}

#[tokio::test]
async fn deleting_an_account_removes_everything() {
    let app = TestApp::spawn().await;
    let cookie = app.sign_up("frank@example.com").await;
    let owner = user::Entity::find()
        .filter(user::Column::Email.eq("frank@example.com"))
        .one(&app.db)
        .await
        .unwrap()
        .expect("user row exists after sign up")
        .id;

    app.post("/todos/create", &[("title", "Water plants")], Some(&cookie))
        .await;
    app.post(
        "/drive/create",
        &[("name", "Garden"), ("url", "https://img.example.com/garden.jpg")],
        Some(&cookie),
    )
    .await;
    let res = app
        .post(
            "/food/create",
            &[("name", "Soup"), ("url", "https://img.example.com/soup.jpg")],
            Some(&cookie),
        )
        .await;
    let dish_id = row_ids(&app.follow(&res, &cookie).await).remove(0);
    app.post(
        "/food/reviews/create",
        &[("food_id", &dish_id), ("rating", "4"), ("content", "Hearty")],
        Some(&cookie),
    )
    .await;
    app.post(
        "/pokemon/reviews/create",
        &[("pokemon", "Oddish"), ("title", "Cute"), ("rating", "3"), ("content", "Walks at night")],
        Some(&cookie),
    )
    .await;
    app.post("/notes/create", &[("title", "Ideas")], Some(&cookie))
        .await;
    assert_eq!(owned_counts(&app, owner).await, [1, 1, 1, 1, 1, 1, 1]);

    let res = app
        .post("/auth/delete-account", &[("confirmed", "true")], Some(&cookie))
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(session_cookie(&res).as_deref(), Some("activity_session="));
    let body = body_text(app.get(&location(&res), None).await).await;
    assert!(body.contains(ACCOUNT_DELETED));

    assert_eq!(owned_counts(&app, owner).await, [0; 7]);
    assert!(user::Entity::find_by_id(owner).one(&app.db).await.unwrap().is_none());

    assert_eq!(app.get("/todos", Some(&cookie)).await.status(), StatusCode::SEE_OTHER);
    let res = app
        .post(
            "/auth/sign-in",
            &[("email", "frank@example.com"), ("password", PASSWORD)],
            None,
        )
        .await;
    assert!(session_cookie(&res).is_none());
}

#[tokio::test]
async fn unknown_paths_render_an_html_404() {
    let app = TestApp::spawn().await;

    let res = app.get("/no/such/page", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let content_type = res.headers()[axum::http::header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    assert!(body_text(res).await.contains("404"));
}

#[tokio::test]
async fn stylesheet_is_served() {
    let app = TestApp::spawn().await;

    let res = app.get("/static/styles.css", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains(".flash"));
}

#[tokio::test]
async fn insert_losing_an_email_race_is_a_conflict() {
    let app = TestApp::spawn().await;
    let users = ServiceContext::new(&app.db).user();

    users
        .create_user("racer@example.com", "hash")
        .await
        .expect("first insert should succeed");
    let err = users
        .create_user("racer@example.com", "hash")
        .await
        .expect_err("second insert hits the unique index");

    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.message(), EMAIL_TAKEN);
    let count = user::Entity::find()
        .filter(user::Column::Email.eq("racer@example.com"))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(count, 1);
}
