use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use unispace_shared::contact::ContactLinks;
use unispace_shared::{Role, User};
use unispace_store::seed;
use unispace_store::{Space, SpaceDraft, SpaceRegistry, SpaceUpdate};

use crate::config::ServerConfig;
use crate::error::ServerError;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Mutex<SpaceRegistry>>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(registry: SpaceRegistry, config: ServerConfig) -> Self {
        Self {
            registry: Arc::new(Mutex::new(registry)),
            config: Arc::new(config),
        }
    }

    // Handlers never hold the guard across an await.
    fn registry(&self) -> Result<MutexGuard<'_, SpaceRegistry>, ServerError> {
        self.registry
            .lock()
            .map_err(|e| ServerError::Internal(format!("Lock poisoned: {e}")))
    }

    fn admin_registry(&self) -> Result<MutexGuard<'_, SpaceRegistry>, ServerError> {
        let registry = self.registry()?;
        let is_admin = registry.current_user().map(User::is_admin);
        match is_admin {
            None => Err(ServerError::Forbidden("No user signed in".into())),
            Some(false) => Err(ServerError::Forbidden("Admin role required".into())),
            Some(true) => Ok(registry),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/info", get(server_info))
        .route(
            "/session",
            get(get_session).post(set_session).delete(clear_session),
        )
        .route("/session/demo/:role", post(demo_session))
        .route("/spaces", get(list_spaces).post(create_space))
        .route("/spaces/:id", get(get_space).patch(update_space))
        .route("/spaces/:id/delete", post(delete_space))
        .route("/spaces/:id/restore", post(restore_space))
        .route("/spaces/:id/qr", get(space_qr))
        .route("/spaces/:id/contact", get(space_contact))
        .route("/trash", get(list_trash))
        .route("/trash/:id", delete(purge_space))
        .route("/scan", post(scan))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ServerInfoResponse {
    name: String,
    version: &'static str,
    active_spaces: usize,
    deleted_spaces: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QrResponse {
    space_id: String,
    qr_code: String,
}

#[derive(Deserialize)]
struct ScanRequest {
    code: String,
}

#[derive(Serialize)]
struct ScanResponse {
    space: Space,
    contact: ContactLinks,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn server_info(State(state): State<AppState>) -> Result<Json<ServerInfoResponse>, ServerError> {
    let (active, deleted) = state.registry()?.counts();
    Ok(Json(ServerInfoResponse {
        name: state.config.instance_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        active_spaces: active,
        deleted_spaces: deleted,
    }))
}

// ─── Session ───

async fn get_session(State(state): State<AppState>) -> Result<Json<Option<User>>, ServerError> {
    let registry = state.registry()?;
    Ok(Json(registry.current_user().cloned()))
}

async fn set_session(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> Result<Json<User>, ServerError> {
    state.registry()?.set_current_user(user.clone());
    Ok(Json(user))
}

/// Sign in as one of the demo accounts offered on the login screen.
async fn demo_session(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> Result<Json<User>, ServerError> {
    let user = match role.parse::<Role>()? {
        Role::Admin => seed::demo_admin(),
        Role::User => seed::demo_student(),
    };
    state.registry()?.set_current_user(user.clone());
    Ok(Json(user))
}

async fn clear_session(State(state): State<AppState>) -> Result<StatusCode, ServerError> {
    state.registry()?.clear_current_user();
    Ok(StatusCode::NO_CONTENT)
}

// ─── Spaces ───

async fn list_spaces(State(state): State<AppState>) -> Result<Json<Vec<Space>>, ServerError> {
    let registry = state.registry()?;
    Ok(Json(registry.spaces().to_vec()))
}

async fn create_space(
    State(state): State<AppState>,
    Json(draft): Json<SpaceDraft>,
) -> Result<(StatusCode, Json<Space>), ServerError> {
    let space = state.admin_registry()?.create_space(draft)?;
    info!(space_id = %space.id, "Space created via API");
    Ok((StatusCode::CREATED, Json(space)))
}

/// Active first, then the recycle bin, so an admin can edit a space that is
/// waiting to be restored.
async fn get_space(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Space>, ServerError> {
    let registry = state.registry()?;
    let space = registry.space_by_id(&id).cloned();
    space.map(Json).ok_or(ServerError::NotFound(id))
}

async fn update_space(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<SpaceUpdate>,
) -> Result<Json<Space>, ServerError> {
    let mut registry = state.admin_registry()?;
    update.validate()?;
    let updated = registry.update_space(&id, &update);
    updated.map(Json).ok_or(ServerError::NotFound(id))
}

async fn delete_space(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServerError> {
    if !state.admin_registry()?.delete_space(&id) {
        return Err(ServerError::NotFound(id));
    }
    Ok(Json(serde_json::json!({ "deleted": true })))
}

async fn restore_space(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServerError> {
    if !state.admin_registry()?.restore_space(&id) {
        return Err(ServerError::NotFound(id));
    }
    Ok(Json(serde_json::json!({ "restored": true })))
}

async fn space_qr(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QrResponse>, ServerError> {
    let registry = state.registry()?;
    let space = registry
        .space_by_id(&id)
        .ok_or_else(|| ServerError::NotFound(id.clone()))?;

    Ok(Json(QrResponse {
        space_id: space.id.to_string(),
        qr_code: space.qr_code.clone(),
    }))
}

async fn space_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContactLinks>, ServerError> {
    let registry = state.registry()?;
    let contact = registry.active_space_by_id(&id).map(Space::contact_links);
    contact.map(Json).ok_or(ServerError::NotFound(id))
}

// ─── Recycle bin ───

async fn list_trash(State(state): State<AppState>) -> Result<Json<Vec<Space>>, ServerError> {
    let registry = state.admin_registry()?;
    Ok(Json(registry.deleted_spaces().to_vec()))
}

async fn purge_space(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServerError> {
    if !state.admin_registry()?.permanently_delete_space(&id) {
        return Err(ServerError::NotFound(id));
    }
    Ok(Json(serde_json::json!({ "purged": true })))
}

// ─── QR scan ───

async fn scan(
    State(state): State<AppState>,
    Json(req): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, ServerError> {
    let registry = state.registry()?;
    let space = registry.resolve_qr(&req.code)?;

    Ok(Json(ScanResponse {
        contact: space.contact_links(),
        space: space.clone(),
    }))
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use unispace_store::seed::{demo_admin, demo_student};

    fn app_with(registry: SpaceRegistry) -> (Router, AppState) {
        let state = AppState::new(registry, ServerConfig::default());
        (build_router(state.clone()), state)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn draft_json(name: &str) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "number": "B-204",
            "manager": { "name": "Ana Lima", "email": "a.lima@university.edu" },
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app_with(SpaceRegistry::new());
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_admin_lifecycle() {
        let (app, state) = app_with(SpaceRegistry::with_demo_data());

        let (status, created) =
            send(&app, Method::POST, "/spaces", Some(draft_json("Robotics Lab"))).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["isDeleted"], false);

        let (status, updated) = send(
            &app,
            Method::PATCH,
            &format!("/spaces/{id}"),
            Some(serde_json::json!({ "number": "B-205" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["number"], "B-205");
        assert_eq!(updated["name"], "Robotics Lab");

        let (status, _) = send(&app, Method::POST, &format!("/spaces/{id}/delete"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, trash) = send(&app, Method::GET, "/trash", None).await;
        assert_eq!(trash[0]["id"], id.as_str());
        assert_eq!(trash[0]["isDeleted"], true);

        // still reachable for the edit view
        let (status, _) = send(&app, Method::GET, &format!("/spaces/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, Method::POST, &format!("/spaces/{id}/restore"), None).await;
        assert_eq!(status, StatusCode::OK);

        // active spaces cannot be purged directly
        let (status, _) = send(&app, Method::DELETE, &format!("/trash/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        send(&app, Method::POST, &format!("/spaces/{id}/delete"), None).await;
        let (status, body) = send(&app, Method::DELETE, &format!("/trash/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["purged"], true);

        assert_eq!(state.registry.lock().unwrap().counts(), (1, 0));
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let (app, _) = app_with(SpaceRegistry::with_demo_data());

        let (status, body) = send(
            &app,
            Method::POST,
            "/spaces",
            Some(serde_json::json!({
                "name": "",
                "number": "X",
                "manager": { "name": "M", "email": "m@u.edu" },
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("name"));

        let (status, _) = send(
            &app,
            Method::PATCH,
            "/spaces/1",
            Some(serde_json::json!({ "emergencyProcedures": "  " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::PATCH,
            "/spaces/ghost",
            Some(serde_json::json!({ "name": "X" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_routes_require_admin_session() {
        let mut registry = SpaceRegistry::with_demo_data();
        registry.clear_current_user();
        let (app, _) = app_with(registry);

        let (status, _) = send(&app, Method::POST, "/spaces/1/delete", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            Method::POST,
            "/session",
            Some(serde_json::to_value(demo_student()).unwrap()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, Method::GET, "/trash", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, _) = send(&app, Method::POST, "/spaces", Some(draft_json("Lab"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // reads stay open to end users
        let (status, spaces) = send(&app, Method::GET, "/spaces", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(spaces.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_link_rejected() {
        let (app, state) = app_with(SpaceRegistry::with_demo_data());

        let mut draft = draft_json("Robotics Lab");
        draft["links"] = serde_json::json!([{ "id": "", "title": "", "url": "" }]);
        let (status, body) = send(&app, Method::POST, "/spaces", Some(draft)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("link"));

        let (status, _) = send(
            &app,
            Method::PATCH,
            "/spaces/1",
            Some(serde_json::json!({ "links": [{ "id": "x", "title": "Map", "url": " " }] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut draft = draft_json("Robotics Lab");
        draft["links"] = serde_json::json!([{ "id": "", "title": "Site", "url": "https://u.edu" }]);
        let (status, created) = send(&app, Method::POST, "/spaces", Some(draft)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(!created["links"][0]["id"].as_str().unwrap().is_empty());

        assert_eq!(state.registry.lock().unwrap().counts(), (2, 0));
    }

    #[tokio::test]
    async fn test_update_checks_role_before_body() {
        let mut registry = SpaceRegistry::with_demo_data();
        registry.set_current_user(demo_student());
        let (app, _) = app_with(registry);

        let (status, _) = send(
            &app,
            Method::PATCH,
            "/spaces/1",
            Some(serde_json::json!({ "name": "  " })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_demo_session() {
        let (app, _) = app_with(SpaceRegistry::new());

        let (status, body) = send(&app, Method::POST, "/session/demo/user", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["universityId"], "STU001");

        let (status, body) = send(&app, Method::POST, "/session/demo/admin", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role"], "admin");

        let (status, body) = send(&app, Method::POST, "/session/demo/guest", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("guest"));

        let (_, body) = send(&app, Method::GET, "/session", None).await;
        assert_eq!(body["role"], "admin");
    }

    #[tokio::test]
    async fn test_session_round_trip() {
        let (app, _) = app_with(SpaceRegistry::new());

        let (_, body) = send(&app, Method::GET, "/session", None).await;
        assert!(body.is_null());

        send(
            &app,
            Method::POST,
            "/session",
            Some(serde_json::to_value(demo_admin()).unwrap()),
        )
        .await;
        let (_, body) = send(&app, Method::GET, "/session", None).await;
        assert_eq!(body["universityId"], "ADMIN001");
        assert_eq!(body["role"], "admin");

        let (status, _) = send(&app, Method::DELETE, "/session", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, body) = send(&app, Method::GET, "/session", None).await;
        assert!(body.is_null());
    }

    #[tokio::test]
    async fn test_scan() {
        let (app, state) = app_with(SpaceRegistry::with_demo_data());

        let (status, qr) = send(&app, Method::GET, "/spaces/1/qr", None).await;
        assert_eq!(status, StatusCode::OK);
        let code = qr["qrCode"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::POST,
            "/scan",
            Some(serde_json::json!({ "code": code })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["space"]["name"], "Computer Lab A");
        assert_eq!(body["contact"]["email"], "mailto:j.smith@university.edu");
        assert_eq!(body["contact"]["phone"], "tel:+1-555-0123");

        let (status, body) = send(
            &app,
            Method::POST,
            "/scan",
            Some(serde_json::json!({ "code": "WIFI:S:campus;;" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid QR code"));

        state.registry.lock().unwrap().delete_space("1");
        let (status, _) = send(
            &app,
            Method::POST,
            "/scan",
            Some(serde_json::json!({ "code": code })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_contact_and_info() {
        let (app, _) = app_with(SpaceRegistry::with_demo_data());

        let (status, body) = send(&app, Method::GET, "/spaces/1/contact", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "mailto:j.smith@university.edu");

        let (_, info) = send(&app, Method::GET, "/info", None).await;
        assert_eq!(info["name"], "University Space Manager");
        assert_eq!(info["active_spaces"], 1);
        assert_eq!(info["deleted_spaces"], 0);
    }
}
