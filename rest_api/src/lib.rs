// rest_api/src/lib.rs

//! HTTP surface of the provider directory: the public directory pages, the
//! contact form, authentication, and the admin back-office behind the role
//! gate.

use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod state;

pub use crate::config::{load_rest_api_config, RestApiConfig};
pub use error::{ApiError, RestApiError};
pub use state::AppState;

use handlers::{admin, auth, messages, preferences, public};

/// Installs the global subscriber. `RUST_LOG` wins over the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second call (tests, embedding) keeps the first subscriber.
    let _ = fmt().with_env_filter(filter).try_init();
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_origin(Any);

    let admin = Router::new()
        .route("/dashboard", get(admin::dashboard_handler))
        .route("/messages", get(messages::list_messages))
        .route("/messages/:id", get(messages::get_message).delete(messages::delete_message))
        .route("/messages/:id/reply", post(messages::reply_message))
        .route("/messages/:id/archive", post(messages::archive_message))
        .route("/:kind", get(admin::list_listings).post(admin::create_listing))
        .route("/:kind/:id", put(admin::update_listing).delete(admin::delete_listing))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_admin));

    Router::new()
        .route("/api/v1/health", get(handlers::health_check_handler))
        .route("/api/v1/version", get(handlers::version_handler))
        .route("/api/v1/directory/:kind", get(public::list_directory))
        .route("/api/v1/categories", get(public::list_categories))
        .route("/api/v1/contact", post(public::submit_contact))
        .route("/api/v1/auth/sign-in", post(auth::sign_in))
        .route("/api/v1/auth/sign-up", post(auth::sign_up))
        .route("/api/v1/auth/sign-out", post(auth::sign_out))
        .route("/api/v1/auth/session", get(auth::current_session))
        .route(
            "/api/v1/preferences/theme",
            get(preferences::get_theme).put(preferences::set_theme),
        )
        .nest("/api/v1/admin", admin)
        .with_state(state)
        .layer(cors)
}

/// Serves until `shutdown_rx` fires or its sender is dropped.
pub async fn start_server(config: RestApiConfig, shutdown_rx: oneshot::Receiver<()>) -> Result<()> {
    let app_state = AppState::from_config(&config)
        .await
        .context("Failed to initialise application state")?;
    let context = app_state.context.clone();
    let app = build_router(app_state);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind to address: {}", addr))?;
    info!("REST API server listening on {}", addr);

    let shutdown_signal = async {
        let _ = shutdown_rx.await;
        info!("Received shutdown signal.");
    };
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("REST API server failed to start or run")?;

    context.shutdown();
    info!("REST API server stopped.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use models::{Collection, GatewayError, RecordId};
    use security::{AuthError, ProviderSessions, SessionSource, Subject, ACCESS_DENIED};
    use serde_json::{json, Value};
    use std::path::Path;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use storage_gateway::{AuthGateway, InMemoryAuth, InMemoryGateway, Operation, SessionEvent};
    use tokio::sync::watch;
    use tower::ServiceExt;

    struct Fixture {
        app: Router,
        state: AppState,
        gateway: Arc<InMemoryGateway>,
        admin_token: String,
        editor_token: String,
    }

    async fn fixture() -> Fixture {
        fixture_with(|auth| Arc::new(ProviderSessions::new(auth)) as Arc<dyn SessionSource>).await
    }

    async fn fixture_with(sessions: impl FnOnce(Arc<InMemoryAuth>) -> Arc<dyn SessionSource>) -> Fixture {
        let gateway = Arc::new(InMemoryGateway::new());
        let auth = Arc::new(InMemoryAuth::new(b"router-test-signing-secret".to_vec(), 3600));
        let admin_id = auth.register("admin@example.com", "admin-pass").await.unwrap();
        let editor_id = auth.register("editor@example.com", "editor-pass").await.unwrap();
        gateway
            .seed(
                Collection::Profiles,
                vec![
                    json!({ "id": admin_id.as_str(), "role": "admin" }),
                    json!({ "id": editor_id.as_str(), "role": "editor" }),
                ],
            )
            .await;
        gateway
            .seed(
                Collection::Doctors,
                vec![
                    json!({ "name": "Asha Rao", "specialty": "Cardiology", "city": "Pune" }),
                    json!({ "name": "Bimal Shah", "specialty": "Dermatology", "city": "Surat" }),
                    json!({ "name": "Asha Mehta", "specialty": "Pediatrics", "city": "Mumbai" }),
                ],
            )
            .await;
        gateway
            .seed(
                Collection::Hospitals,
                vec![
                    json!({ "name": "Apollo", "specialties": ["Cardiology"], "emergency_services": true }),
                    json!({ "name": "Fortis", "specialties": ["Cardiology"], "emergency_services": false }),
                    json!({ "name": "Manipal", "specialties": ["Oncology"], "emergency_services": true }),
                    json!({ "name": "Ruby", "specialties": ["Neurology"], "emergency_services": false }),
                    json!({ "name": "Sahyadri", "specialties": null, "emergency_services": true }),
                ],
            )
            .await;
        gateway
            .seed(Collection::MedicalShops, vec![json!({ "name": "Corner Pharmacy", "city": "Pune" })])
            .await;

        let admin_token = auth
            .sign_in_with_password("admin@example.com", "admin-pass")
            .await
            .unwrap()
            .access_token;
        let editor_token = auth
            .sign_in_with_password("editor@example.com", "editor-pass")
            .await
            .unwrap()
            .access_token;

        let sessions = sessions(auth.clone());
        let state = AppState::new(gateway.clone(), auth, sessions);
        Fixture {
            app: build_router(state.clone()),
            state,
            gateway,
            admin_token,
            editor_token,
        }
    }

    async fn call(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn doctor_form(name: &str) -> Value {
        json!({
            "name": name,
            "specialty": "ENT",
            "address": "1 Main St",
            "city": "Pune",
            "state": "MH",
            "phone": "555-0100",
            "email": "doctor@example.com",
        })
    }

    /// Signs the caller out after its first lookup and waits until the
    /// context has seen the event, then answers with the pre-sign-out subject.
    struct SignOutDuringLookup {
        auth: Arc<InMemoryAuth>,
        inner: ProviderSessions,
        changes: Mutex<Option<watch::Receiver<Option<SessionEvent>>>>,
        fired: AtomicBool,
    }

    #[axum::async_trait]
    impl SessionSource for SignOutDuringLookup {
        async fn current(&self, access_token: &str) -> Result<Option<Subject>, AuthError> {
            let subject = self.inner.current(access_token).await?;
            if !self.fired.swap(true, Ordering::SeqCst) {
                let changes = self.changes.lock().unwrap().take();
                self.auth.sign_out(access_token).await.map_err(AuthError::Provider)?;
                if let Some(mut changes) = changes {
                    changes.changed().await.unwrap();
                }
            }
            Ok(subject)
        }
    }

    fn names(body: &Value) -> Vec<String> {
        body["data"]["records"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let f = fixture().await;
        let (status, body) = call(&f.app, "GET", "/api/v1/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn directory_search_is_case_insensitive_and_sorted() {
        let f = fixture().await;
        let (status, body) = call(&f.app, "GET", "/api/v1/directory/doctors?q=asha", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body), vec!["Asha Mehta", "Asha Rao"]);
        assert_eq!(body["data"]["total"], 3);
        assert_eq!(body["data"]["fallback"], false);
    }

    #[tokio::test]
    async fn hospital_facets_combine_with_and() {
        let f = fixture().await;
        let (status, body) = call(
            &f.app,
            "GET",
            "/api/v1/directory/hospitals?specialty=cardiology&emergency=true",
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body), vec!["Apollo"]);
        assert_eq!(body["data"]["total"], 5);
    }

    #[tokio::test]
    async fn unknown_facet_is_a_validation_error() {
        let f = fixture().await;
        let (status, body) = call(&f.app, "GET", "/api/v1/directory/hospitals?colour=red", None, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["fields"]["colour"].is_string());
    }

    #[tokio::test]
    async fn unknown_kind_is_not_found() {
        let f = fixture().await;
        let (status, _) = call(&f.app, "GET", "/api/v1/directory/dentists", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unreachable_backend_serves_sample_listings_with_an_error() {
        let f = fixture().await;
        f.gateway.set_unavailable(Some(GatewayError::Network("connection refused".into())));
        let (status, body) = call(&f.app, "GET", "/api/v1/directory/hospitals", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["fallback"], true);
        assert_eq!(
            body["data"]["records"].as_array().unwrap().len(),
            directory::fallback::hospitals().len()
        );
        let notifications = body["notifications"].as_array().unwrap();
        assert!(notifications.iter().any(|n| n["level"] == "error"));
    }

    #[tokio::test]
    async fn admin_routes_redirect_anonymous_visitors() {
        let f = fixture().await;
        let (status, body) = call(&f.app, "GET", "/api/v1/admin/doctors", None, None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["redirect"], "/");
        assert_eq!(body["notifications"][0]["message"], ACCESS_DENIED);
    }

    #[tokio::test]
    async fn non_admin_role_never_reaches_the_handler() {
        let f = fixture().await;
        let form = json!({ "name": "Dr. New" });
        let (status, body) = call(&f.app, "POST", "/api/v1/admin/doctors", Some(&f.editor_token), Some(form)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["redirect"], "/");
        assert_eq!(f.gateway.write_count(), 0);
    }

    #[tokio::test]
    async fn invalid_form_is_rejected_before_any_write() {
        let f = fixture().await;
        let form = json!({
            "name": "Dr. New",
            "specialty": "ENT",
            "address": "1 Main St",
            "city": "Pune",
            "state": "MH",
            "phone": "555-0100",
            "email": "",
        });
        let (status, body) = call(&f.app, "POST", "/api/v1/admin/doctors", Some(&f.admin_token), Some(form)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["fields"]["email"].is_string());
        assert_eq!(f.gateway.call_count(Operation::Insert), 0);
    }

    #[tokio::test]
    async fn admin_create_reconciles_the_store() {
        let f = fixture().await;
        let (status, _) = call(&f.app, "GET", "/api/v1/admin/doctors", Some(&f.admin_token), None).await;
        assert_eq!(status, StatusCode::OK);

        let form = json!({
            "name": "Dr. New",
            "specialty": "ENT",
            "address": "1 Main St",
            "city": "Pune",
            "state": "MH",
            "phone": "555-0100",
            "email": "new@example.com",
            "experience_years": "7",
        });
        let (status, body) = call(&f.app, "POST", "/api/v1/admin/doctors", Some(&f.admin_token), Some(form)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["data"]["id"].is_string());
        assert_eq!(body["notifications"][0]["message"], "Doctor added successfully");
        assert_eq!(f.state.admin.doctors.read().await.len(), 4);
        assert_eq!(f.gateway.call_count(Operation::Insert), 1);
    }

    #[tokio::test]
    async fn failed_delete_leaves_the_store_unchanged() {
        let f = fixture().await;
        let (_, body) = call(&f.app, "GET", "/api/v1/admin/medical-shops", Some(&f.admin_token), None).await;
        let id = body["data"]["records"][0]["id"].as_str().unwrap().to_string();

        f.gateway.fail_next(Operation::Delete, GatewayError::Network("timeout".into()));
        let uri = format!("/api/v1/admin/medical-shops/{id}");
        let (status, body) = call(&f.app, "DELETE", &uri, Some(&f.admin_token), None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["notifications"][0]["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to delete medical shop"));
        assert_eq!(f.state.admin.shops.read().await.len(), 1);
    }

    #[tokio::test]
    async fn sign_in_then_session_reports_admin() {
        let f = fixture().await;
        let credentials = json!({ "email": "admin@example.com", "password": "admin-pass" });
        let (status, body) = call(&f.app, "POST", "/api/v1/auth/sign-in", None, Some(credentials)).await;
        assert_eq!(status, StatusCode::OK);
        let token = body["data"]["access_token"].as_str().unwrap().to_string();

        let (status, body) = call(&f.app, "GET", "/api/v1/auth/session", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["authenticated"], true);
        assert_eq!(body["data"]["is_admin"], true);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let f = fixture().await;
        let credentials = json!({ "email": "admin@example.com", "password": "nope" });
        let (status, body) = call(&f.app, "POST", "/api/v1/auth/sign-in", None, Some(credentials)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn sign_up_creates_a_plain_user_profile() {
        let f = fixture().await;
        let form = json!({ "email": "new@example.com", "password": "secret-pass", "full_name": "New Person" });
        let (status, body) = call(&f.app, "POST", "/api/v1/auth/sign-up", None, Some(form)).await;
        assert_eq!(status, StatusCode::CREATED);
        let token = body["data"]["session"]["access_token"].as_str().unwrap().to_string();

        let (status, _) = call(&f.app, "GET", "/api/v1/admin/dashboard", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let profiles = f.gateway.rows(Collection::Profiles).await;
        assert!(profiles.iter().any(|p| p["email"] == "new@example.com" && p["role"] == "user"));
    }

    #[tokio::test]
    async fn contact_message_lands_in_the_admin_inbox() {
        let f = fixture().await;
        let message = json!({
            "name": "Ravi",
            "email": "ravi@example.com",
            "subject": "Timings",
            "message": "Is the lab open on holidays?",
        });
        let (status, body) = call(&f.app, "POST", "/api/v1/contact", None, Some(message)).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = call(&f.app, "GET", "/api/v1/admin/messages?status=new", Some(&f.admin_token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["messages"][0]["id"], id.as_str());

        let (status, body) = call(&f.app, "GET", &format!("/api/v1/admin/messages/{id}"), Some(&f.admin_token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "read");
    }

    #[tokio::test]
    async fn contact_form_requires_a_valid_email() {
        let f = fixture().await;
        let message = json!({ "name": "Ravi", "email": "not-an-email", "message": "Hi" });
        let (status, body) = call(&f.app, "POST", "/api/v1/contact", None, Some(message)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"]["email"], "Enter a valid email address");
    }

    #[tokio::test]
    async fn dashboard_counts_listings_and_messages() {
        let f = fixture().await;
        let (status, body) = call(&f.app, "GET", "/api/v1/admin/dashboard", Some(&f.admin_token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["listings"]["doctors"], 3);
        assert_eq!(body["data"]["listings"]["hospitals"], 5);
        assert_eq!(body["data"]["messages"]["new"], 2);
    }

    #[tokio::test]
    async fn signed_out_token_loses_admin_access_with_local_verification() {
        let mut config = load_rest_api_config(Some(Path::new("/nonexistent/rest_api_config.yaml"))).unwrap();
        config.auth.jwt_secret = Some("0123456789abcdef-router".into());
        let state = AppState::from_config(&config).await.unwrap();
        let app = build_router(state);

        let credentials = json!({ "email": config.demo.admin_email, "password": config.demo.admin_password });
        let (status, body) = call(&app, "POST", "/api/v1/auth/sign-in", None, Some(credentials)).await;
        assert_eq!(status, StatusCode::OK);
        let token = body["data"]["access_token"].as_str().unwrap().to_string();

        let (status, _) = call(&app, "GET", "/api/v1/admin/dashboard", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = call(&app, "POST", "/api/v1/auth/sign-out", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(&app, "GET", "/api/v1/admin/dashboard", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["redirect"], "/");
    }

    #[tokio::test]
    async fn session_change_during_the_check_is_rechecked() {
        let source_slot: Arc<Mutex<Option<Arc<SignOutDuringLookup>>>> = Arc::new(Mutex::new(None));
        let slot = source_slot.clone();
        let f = fixture_with(move |auth| {
            let source = Arc::new(SignOutDuringLookup {
                inner: ProviderSessions::new(auth.clone()),
                auth,
                changes: Mutex::new(None),
                fired: AtomicBool::new(false),
            });
            *slot.lock().unwrap() = Some(source.clone());
            source as Arc<dyn SessionSource>
        })
        .await;
        let source = source_slot.lock().unwrap().take().unwrap();
        *source.changes.lock().unwrap() = Some(f.state.context.session_changes());

        let (status, body) = call(&f.app, "GET", "/api/v1/admin/dashboard", Some(&f.admin_token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["notifications"][0]["message"], ACCESS_DENIED);
    }

    #[tokio::test]
    async fn theme_preference_round_trips_through_the_context() {
        let f = fixture().await;
        let (status, body) = call(&f.app, "GET", "/api/v1/preferences/theme", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["theme"], "system");

        let (status, _) = call(&f.app, "PUT", "/api/v1/preferences/theme", None, Some(json!({ "theme": "Dark" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(f.state.context.theme(), directory::Theme::Dark);

        let (status, body) = call(&f.app, "PUT", "/api/v1/preferences/theme", None, Some(json!({ "theme": "sepia" }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["fields"]["theme"].is_string());
        assert_eq!(f.state.context.theme(), directory::Theme::Dark);
    }

    #[tokio::test]
    async fn missing_sign_in_field_uses_the_error_envelope() {
        let f = fixture().await;
        let credentials = json!({ "email": "admin@example.com" });
        let (status, body) = call(&f.app, "POST", "/api/v1/auth/sign-in", None, Some(credentials)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().contains("password"));
        assert_eq!(body["notifications"][0]["level"], "error");
    }

    #[tokio::test]
    async fn malformed_json_body_is_a_bad_request() {
        let f = fixture().await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/admin/doctors")
            .header("authorization", format!("Bearer {}", f.admin_token))
            .header("content-type", "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();
        let response = f.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "error");
        assert_eq!(f.gateway.write_count(), 0);
    }

    #[tokio::test]
    async fn admin_update_reconciles_the_store() {
        let f = fixture().await;
        let (_, body) = call(&f.app, "GET", "/api/v1/admin/doctors?q=rao", Some(&f.admin_token), None).await;
        let id = body["data"]["records"][0]["id"].as_str().unwrap().to_string();

        let uri = format!("/api/v1/admin/doctors/{id}");
        let (status, body) = call(&f.app, "PUT", &uri, Some(&f.admin_token), Some(doctor_form("Asha Rao-Kulkarni"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Asha Rao-Kulkarni");
        assert_eq!(body["notifications"][0]["message"], "Doctor updated successfully");

        let store = f.state.admin.doctors.read().await;
        assert_eq!(store.len(), 3);
        let record_id = RecordId::new(id).unwrap();
        assert_eq!(store.get(&record_id).map(|d| d.name.as_str()), Some("Asha Rao-Kulkarni"));
    }

    #[tokio::test]
    async fn admin_update_of_unknown_id_is_not_found() {
        let f = fixture().await;
        let (status, _) = call(&f.app, "GET", "/api/v1/admin/doctors", Some(&f.admin_token), None).await;
        assert_eq!(status, StatusCode::OK);

        let uri = "/api/v1/admin/doctors/00000000-0000-0000-0000-000000000000";
        let (status, body) = call(&f.app, "PUT", uri, Some(&f.admin_token), Some(doctor_form("Nobody"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["notifications"][0]["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to update doctor"));
        assert_eq!(f.state.admin.doctors.read().await.len(), 3);
    }
}
