#![allow(dead_code)]

use axum::{
    Router,
    body::{self, Body},
    http::{Request, Response, StatusCode, header},
};
use sea_orm::DatabaseConnection;
use tower::ServiceExt; // for `oneshot`

use activity_hub::{
    auth::bootstrap::build_providers,
    config::{AppConfig, AuthConfig, DatabaseConfig, PokedexConfig},
    db::connection,
    page_cache::PageCache,
    routes::app,
    services::{ServiceContext, pokedex_service::PokedexClient},
    state::AppState,
};

pub const PASSWORD: &str = "correct horse";

/// A fully wired app on a private in-memory SQLite database.
pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

impl TestApp {
    pub async fn spawn() -> Self {
        // nothing listens on the discard port, so lookups come back unavailable
        Self::with_pokedex("http://127.0.0.1:9/api/v2").await
    }

    pub async fn with_pokedex(base_url: &str) -> Self {
        let cfg = AppConfig {
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                min_idle: 1,
            },
            auth: Some(AuthConfig::with_secret("integration-test-secret")),
            pokedex: PokedexConfig {
                base_url: base_url.to_string(),
                timeout_secs: 2,
            },
            ..AppConfig::default()
        };

        let db = connection::connect(&cfg.database).await.unwrap();
        let pages = PageCache::new();
        let services = ServiceContext::with_pages(&db, pages.clone());
        let providers = build_providers(cfg.auth().unwrap(), &services).unwrap();
        let pokedex = PokedexClient::new(&cfg.pokedex).unwrap();
        let state = AppState::new(cfg, db.clone(), providers, pages, pokedex);

        Self {
            router: app(state),
            db,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Response<Body> {
        let body = fields
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap()
    }

    /// Signs up and returns the `name=value` session cookie.
    pub async fn sign_up(&self, email: &str) -> String {
        let res = self
            .post(
                "/auth/sign-up",
                &[("email", email), ("password", PASSWORD)],
                None,
            )
            .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/");
        session_cookie(&res).expect("sign up sets the session cookie")
    }

    /// Follows a 303 from an action and returns the page it lands on.
    pub async fn follow(&self, res: &Response<Body>, cookie: &str) -> String {
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let page = self.get(&location(res), Some(cookie)).await;
        assert_eq!(page.status(), StatusCode::OK);
        body_text(page).await
    }
}

pub fn location(res: &Response<Body>) -> String {
    res.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string()
}

pub fn session_cookie(res: &Response<Body>) -> Option<String> {
    res.headers()
        .get(header::SET_COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .next()
        .map(str::to_string)
}

pub async fn body_text(res: Response<Body>) -> String {
    let bytes = body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Values of every hidden `id` input in the page, in document order.
pub fn row_ids(html: &str) -> Vec<String> {
    let marker = r#"name="id" value=""#;
    let mut ids: Vec<String> = html
        .split(marker)
        .skip(1)
        .filter_map(|chunk| chunk.split('"').next())
        .map(str::to_string)
        .collect();
    ids.dedup();
    ids
}
