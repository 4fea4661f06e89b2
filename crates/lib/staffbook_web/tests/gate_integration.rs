//! Integration tests — drive the router with `tower::ServiceExt`.
//!
//! The redirect-before-store properties run against a lazy pool that
//! never opens a connection, proving the gate answers before the store
//! is consulted. The full registration flow needs PostgreSQL and runs
//! only when `DATABASE_URL` is exported; it skips otherwise.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use sqlx::postgres::PgPoolOptions;
use staffbook_web::config::AppConfig;
use staffbook_web::{AppState, router};
use tower::ServiceExt;

fn test_config(database_url: &str) -> AppConfig {
    AppConfig::build(
        "127.0.0.1:0".into(),
        database_url.into(),
        "integration-test-secret".into(),
        false,
    )
    .expect("test config")
}

/// State over a pool that never connects. Any query would fail, so a
/// passing test proves the store was never reached.
fn lazy_state() -> AppState {
    let url = "postgres://localhost:5432/staffbook_never_connected";
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy(url)
        .expect("lazy pool");
    AppState::new(pool, test_config(url))
}

const VALID_FORM_BODY: &str = "first=Jiyeon&last=Park&first_kana=J&last_kana=P\
     &birth=1992-04-01&phonenumber=08012345678&gender=female&position=manager\
     &upper_department=ICT&lower_department=G2&career_start_date=2015-04-01";

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request")
}

fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

fn location(resp: &axum::response::Response) -> &str {
    resp.headers()[header::LOCATION]
        .to_str()
        .expect("location header")
}

#[tokio::test]
async fn get_registration_without_session_redirects_to_login() {
    let app = router(lazy_state());
    let resp = app.oneshot(get("/user/new", None)).await.expect("response");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}

#[tokio::test]
async fn post_registration_without_session_redirects_to_login() {
    let app = router(lazy_state());
    let resp = app
        .oneshot(post_form("/user/new", VALID_FORM_BODY, None))
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}

#[tokio::test]
async fn tampered_session_cookie_is_unauthenticated() {
    let app = router(lazy_state());
    let cookie = "__session=bm90IGEgcmVhbCBzZXNzaW9uIGNvb2tpZQ==";
    let resp = app
        .oneshot(get("/user/new", Some(cookie)))
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}

#[tokio::test]
async fn login_page_renders_without_store() {
    let app = router(lazy_state());
    let resp = app.oneshot(get("/login", None)).await.expect("response");
    assert_eq!(resp.status(), StatusCode::OK);
}

/// Full gate flow against PostgreSQL: register, load the form, submit
/// the profile, observe the one-time semantics and the categorical
/// codes. Requires `DATABASE_URL`; skips when absent.
#[tokio::test]
async fn registration_flow_against_database() {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping registration_flow_against_database");
        return;
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("connect");
    staffbook_web::migrate(&pool).await.expect("migrate");

    let app = router(AppState::new(pool.clone(), test_config(&url)));

    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let email = format!("it-{nanos}@example.com");

    // Sign up: starts a session and lands on the registration form.
    let body = format!("email={email}&password=password123");
    let resp = app
        .clone()
        .oneshot(post_form("/register", &body, None))
        .await
        .expect("register");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/user/new");

    let set_cookie = resp.headers()[header::SET_COOKIE]
        .to_str()
        .expect("set-cookie")
        .to_string();
    let cookie = set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    // The form renders while no profile exists.
    let resp = app
        .clone()
        .oneshot(get("/user/new", Some(&cookie)))
        .await
        .expect("form");
    assert_eq!(resp.status(), StatusCode::OK);

    // Submit the profile with the urlencoded example values.
    let form = "first=Jiyeon&last=Park&first_kana=J&last_kana=P\
         &birth=1992-04-01&phonenumber=08012345678&gender=female&position=manager\
         &upper_department=ICT%EB%B3%B8%EB%B6%80&lower_department=%EC%A0%9C2%EA%B7%B8%EB%A3%B9\
         &career_start_date=2015-04-01";
    let resp = app
        .clone()
        .oneshot(post_form("/user/new", form, Some(&cookie)))
        .await
        .expect("submit");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    // The stored row carries the stable codes and the verbatim strings.
    let login_id: i64 = sqlx::query_scalar(
        "SELECT login_id FROM login_info WHERE email = $1 AND is_deleted = FALSE",
    )
    .bind(&email)
    .fetch_one(&pool)
    .await
    .expect("login row");

    let (gender_id, position_id, upper, lower): (i32, i32, String, String) = sqlx::query_as(
        "SELECT gender_id, position_id, upper_department, lower_department \
         FROM user_info WHERE login_id = $1 AND is_deleted = FALSE",
    )
    .bind(login_id)
    .fetch_one(&pool)
    .await
    .expect("profile row");
    assert_eq!(gender_id, 2);
    assert_eq!(position_id, 30);
    assert_eq!(upper, "ICT본부");
    assert_eq!(lower, "제2그룹");

    // Registration is one-time: both methods now redirect home.
    let resp = app
        .clone()
        .oneshot(get("/user/new", Some(&cookie)))
        .await
        .expect("revisit");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let resp = app
        .clone()
        .oneshot(post_form("/user/new", form, Some(&cookie)))
        .await
        .expect("resubmit");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM user_info WHERE login_id = $1")
            .bind(login_id)
            .fetch_one(&pool)
            .await
            .expect("count");
    assert_eq!(count, 1, "second submission must not insert");

    // A live email cannot register twice.
    let resp = app
        .clone()
        .oneshot(post_form("/register", &body, None))
        .await
        .expect("duplicate register");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Soft-deleting the login frees the email for reuse.
    sqlx::query("UPDATE login_info SET is_deleted = TRUE WHERE login_id = $1")
        .bind(login_id)
        .execute(&pool)
        .await
        .expect("soft delete");
    let resp = app
        .clone()
        .oneshot(post_form("/register", &body, None))
        .await
        .expect("re-register after soft delete");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/user/new");

    pool.close().await;
}
