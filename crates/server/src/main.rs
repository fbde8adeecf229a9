// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use clap::Parser;
use gram_panchayat_api::{
    ActivityEventResponse, ApiError, ApplicationResponse, AuthError, AuthenticatedPrincipal,
    AuthenticationService,
    BatchTransitionOutcome, BatchTransitionRequest, CitizenStatsResponse, CreateServiceRequest,
    DashboardStatsResponse, DeleteUserResponse, ListApplicationsParams, LoginRequest,
    LoginResponse, RegisterRequest, RegisterResponse, ServiceResponse, SubmitApplicationRequest,
    TransitionRequest, UpdateServiceRequest, assign_role, batch_transition, cancel_application,
    citizen_stats, create_service, dashboard_stats, deactivate_service, delete_user,
    get_application, get_service, list_activity, list_applications, list_services,
    search_services, submit_application, transition_application, update_service,
};
use gram_panchayat_domain::{ApplicationStatus, Role};
use gram_panchayat_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Gram Panchayat Server - HTTP server for the services portal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses an
    /// in-memory database.
    #[arg(long)]
    database_path: Option<String>,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind_addr: String,

    /// Email for the seed administrator account
    #[arg(long)]
    seed_admin_email: Option<String>,

    /// Password for the seed administrator account
    #[arg(long)]
    seed_admin_password: Option<String>,
}

/// Application state shared across handlers.
///
/// The persistence adapter owns a single `SQLite` connection, so it is
/// wrapped in a mutex; correctness does not depend on the lock because
/// submissions and status changes are transactional and conditional at
/// the storage layer.
#[derive(Clone)]
struct AppState {
    /// The persistence adapter for all portal data.
    persistence: Arc<Mutex<Persistence>>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// Generic response for operations without a dedicated body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MessageResponse {
    /// Success indicator.
    success: bool,
    /// A human-readable message.
    message: String,
}

/// Query parameters for the application listing endpoint.
#[derive(Debug, Deserialize)]
struct ListApplicationsQuery {
    /// Restrict to one citizen's applications (staff only).
    citizen_id: Option<i64>,
    /// Restrict to one service.
    service_id: Option<i64>,
    /// Comma-separated status filter (e.g. `pending,processing`).
    status: Option<String>,
}

/// Query parameters for the service listing endpoint.
#[derive(Debug, Deserialize)]
struct ListServicesQuery {
    /// Restrict to one category.
    category: Option<String>,
    /// Include inactive services (staff only).
    include_inactive: Option<bool>,
}

/// Query parameters for the service search endpoint.
#[derive(Debug, Deserialize)]
struct SearchServicesQuery {
    /// The search term.
    q: String,
}

/// Query parameters for the activity log endpoint.
#[derive(Debug, Deserialize)]
struct ActivityQuery {
    /// Maximum number of events to return.
    limit: Option<i64>,
}

/// API request for assigning a role.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AssignRoleApiRequest {
    /// The principal receiving the role.
    principal_id: i64,
    /// The role to assign (`citizen`, `staff`, or `administrator`).
    role: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl HttpError {
    fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidTransition { .. } | ApiError::Conflict { .. } => {
                StatusCode::CONFLICT
            }
            ApiError::DuplicateApplication { .. }
            | ApiError::InvalidInput { .. }
            | ApiError::PasswordPolicyViolation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { message } => {
                error!(error = %message, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<AuthError> for HttpError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
            },
            AuthError::Unauthorized { .. } => Self {
                status: StatusCode::FORBIDDEN,
                message: err.to_string(),
            },
        }
    }
}

/// Extracts the bearer token from the `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, HttpError> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: String::from("Missing or malformed Authorization header"),
        })
}

/// Authenticates the request's bearer token against the session store.
async fn authenticate(
    app_state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthenticatedPrincipal, HttpError> {
    let token: &str = bearer_token(headers)?;
    let mut persistence = app_state.persistence.lock().await;
    let principal = AuthenticationService::validate_session(&mut persistence, token)?;
    drop(persistence);
    Ok(principal)
}

/// Like [`authenticate`], but an absent header is anonymous access
/// rather than an error. A present-but-invalid token still fails.
async fn maybe_authenticate(
    app_state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<AuthenticatedPrincipal>, HttpError> {
    if bearer_token(headers).is_err() {
        return Ok(None);
    }
    authenticate(app_state, headers).await.map(Some)
}

/// Parses a status string, mapping failure to a 400.
fn parse_status(value: &str) -> Result<ApplicationStatus, HttpError> {
    ApplicationStatus::from_str(value).map_err(|e| HttpError::bad_request(e.to_string()))
}

/// Parses a comma-separated status filter.
fn parse_status_filter(value: &str) -> Result<Vec<ApplicationStatus>, HttpError> {
    value.split(',').map(|s| parse_status(s.trim())).collect()
}

/// Handler for POST `/auth/register` endpoint.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, HttpError> {
    info!(email = %req.email, "Handling register request");

    let mut persistence = app_state.persistence.lock().await;
    let response: RegisterResponse = AuthenticationService::register(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/auth/login` endpoint.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(email = %req.email, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let (token, principal) =
        AuthenticationService::login(&mut persistence, &req.email, &req.password)?;
    drop(persistence);

    Ok(Json(LoginResponse {
        token,
        principal_id: principal.id,
        role: principal.role.as_str().to_string(),
        display_name: principal.display_name,
    }))
}

/// Handler for POST `/auth/logout` endpoint.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, HttpError> {
    let token: &str = bearer_token(&headers)?;

    let mut persistence = app_state.persistence.lock().await;
    AuthenticationService::logout(&mut persistence, token)?;
    drop(persistence);

    Ok(Json(MessageResponse {
        success: true,
        message: String::from("Logged out"),
    }))
}

/// Handler for POST `/applications` endpoint.
///
/// Submits a new application on the authenticated citizen's behalf.
async fn handle_submit_application(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<SubmitApplicationRequest>,
) -> Result<Json<ApplicationResponse>, HttpError> {
    let actor: AuthenticatedPrincipal = authenticate(&app_state, &headers).await?;

    info!(
        citizen_id = actor.id,
        service_id = req.service_id,
        "Handling submit_application request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ApplicationResponse = submit_application(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/applications` endpoint.
async fn handle_list_applications(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListApplicationsQuery>,
) -> Result<Json<Vec<ApplicationResponse>>, HttpError> {
    let actor: AuthenticatedPrincipal = authenticate(&app_state, &headers).await?;

    let statuses: Vec<ApplicationStatus> = match &query.status {
        Some(filter) => parse_status_filter(filter)?,
        None => Vec::new(),
    };
    let params = ListApplicationsParams {
        citizen_id: query.citizen_id,
        service_id: query.service_id,
        statuses,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<ApplicationResponse> = list_applications(&mut persistence, &actor, &params)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/applications/{id}` endpoint.
async fn handle_get_application(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(application_id): Path<i64>,
) -> Result<Json<ApplicationResponse>, HttpError> {
    let actor: AuthenticatedPrincipal = authenticate(&app_state, &headers).await?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ApplicationResponse = get_application(&mut persistence, &actor, application_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PATCH `/applications/{id}/status` endpoint.
///
/// Moves one application to a new lifecycle status.
async fn handle_transition_application(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(application_id): Path<i64>,
    Json(req): Json<TransitionRequest>,
) -> Result<Json<ApplicationResponse>, HttpError> {
    let actor: AuthenticatedPrincipal = authenticate(&app_state, &headers).await?;
    let new_status: ApplicationStatus = parse_status(&req.status)?;

    info!(
        actor_id = actor.id,
        application_id,
        status = new_status.as_str(),
        "Handling transition request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ApplicationResponse = transition_application(
        &mut persistence,
        &actor,
        application_id,
        new_status,
        req.remarks.as_deref(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/applications/{id}/cancel` endpoint.
async fn handle_cancel_application(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(application_id): Path<i64>,
) -> Result<Json<ApplicationResponse>, HttpError> {
    let actor: AuthenticatedPrincipal = authenticate(&app_state, &headers).await?;

    info!(actor_id = actor.id, application_id, "Handling cancel request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ApplicationResponse =
        cancel_application(&mut persistence, &actor, application_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/applications/batch-status` endpoint.
///
/// Applies one status change to many applications, best-effort.
async fn handle_batch_transition(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<BatchTransitionRequest>,
) -> Result<Json<BatchTransitionOutcome>, HttpError> {
    let actor: AuthenticatedPrincipal = authenticate(&app_state, &headers).await?;
    let new_status: ApplicationStatus = parse_status(&req.status)?;

    info!(
        actor_id = actor.id,
        count = req.application_ids.len(),
        status = new_status.as_str(),
        "Handling batch transition request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let outcome: BatchTransitionOutcome = batch_transition(
        &mut persistence,
        &actor,
        &req.application_ids,
        new_status,
        req.remarks.as_deref(),
    )?;
    drop(persistence);

    Ok(Json(outcome))
}

/// Handler for GET `/services` endpoint.
///
/// Anonymous callers see the active catalog; staff may include inactive
/// entries.
async fn handle_list_services(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListServicesQuery>,
) -> Result<Json<Vec<ServiceResponse>>, HttpError> {
    let actor: Option<AuthenticatedPrincipal> = maybe_authenticate(&app_state, &headers).await?;

    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<ServiceResponse> = list_services(
        &mut persistence,
        actor.as_ref(),
        query.category.as_deref(),
        query.include_inactive.unwrap_or(false),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/services/search` endpoint.
async fn handle_search_services(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<SearchServicesQuery>,
) -> Result<Json<Vec<ServiceResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<ServiceResponse> = search_services(&mut persistence, &query.q)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/services/{id}` endpoint.
async fn handle_get_service(
    AxumState(app_state): AxumState<AppState>,
    Path(service_id): Path<i64>,
) -> Result<Json<ServiceResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ServiceResponse = get_service(&mut persistence, service_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/services` endpoint.
async fn handle_create_service(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateServiceRequest>,
) -> Result<Json<ServiceResponse>, HttpError> {
    let actor: AuthenticatedPrincipal = authenticate(&app_state, &headers).await?;

    info!(actor_id = actor.id, name = %req.name, "Handling create_service request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ServiceResponse = create_service(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PATCH `/services/{id}` endpoint.
async fn handle_update_service(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(service_id): Path<i64>,
    Json(req): Json<UpdateServiceRequest>,
) -> Result<Json<ServiceResponse>, HttpError> {
    let actor: AuthenticatedPrincipal = authenticate(&app_state, &headers).await?;

    info!(actor_id = actor.id, service_id, "Handling update_service request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ServiceResponse = update_service(&mut persistence, &actor, service_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/services/{id}` endpoint.
///
/// Deactivation, not deletion: the row stays for submitted snapshots.
async fn handle_deactivate_service(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(service_id): Path<i64>,
) -> Result<Json<ServiceResponse>, HttpError> {
    let actor: AuthenticatedPrincipal = authenticate(&app_state, &headers).await?;

    info!(actor_id = actor.id, service_id, "Handling deactivate_service request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ServiceResponse = deactivate_service(&mut persistence, &actor, service_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/admin/roles` endpoint.
async fn handle_assign_role(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<AssignRoleApiRequest>,
) -> Result<Json<MessageResponse>, HttpError> {
    let actor: AuthenticatedPrincipal = authenticate(&app_state, &headers).await?;
    let role: Role =
        Role::from_str(&req.role).map_err(|e| HttpError::bad_request(e.to_string()))?;

    info!(
        actor_id = actor.id,
        principal_id = req.principal_id,
        role = role.as_str(),
        "Handling assign_role request"
    );

    let mut persistence = app_state.persistence.lock().await;
    assign_role(&mut persistence, &actor, req.principal_id, role)?;
    drop(persistence);

    Ok(Json(MessageResponse {
        success: true,
        message: format!("Assigned role '{}' to principal {}", role.as_str(), req.principal_id),
    }))
}

/// Handler for DELETE `/admin/users/{id}` endpoint.
async fn handle_delete_user(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(principal_id): Path<i64>,
) -> Result<Json<DeleteUserResponse>, HttpError> {
    let actor: AuthenticatedPrincipal = authenticate(&app_state, &headers).await?;

    info!(actor_id = actor.id, principal_id, "Handling delete_user request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteUserResponse = delete_user(&mut persistence, &actor, principal_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/admin/stats` endpoint.
async fn handle_dashboard_stats(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<DashboardStatsResponse>, HttpError> {
    let actor: AuthenticatedPrincipal = authenticate(&app_state, &headers).await?;

    let mut persistence = app_state.persistence.lock().await;
    let response: DashboardStatsResponse = dashboard_stats(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/admin/activity` endpoint.
async fn handle_list_activity(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<ActivityEventResponse>>, HttpError> {
    let actor: AuthenticatedPrincipal = authenticate(&app_state, &headers).await?;
    let limit: i64 = query.limit.unwrap_or(50);

    let mut persistence = app_state.persistence.lock().await;
    let response = list_activity(&mut persistence, &actor, limit)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/me/stats` endpoint.
async fn handle_citizen_stats(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<CitizenStatsResponse>, HttpError> {
    let actor: AuthenticatedPrincipal = authenticate(&app_state, &headers).await?;

    let mut persistence = app_state.persistence.lock().await;
    let response: CitizenStatsResponse = citizen_stats(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(handle_register))
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/applications", post(handle_submit_application))
        .route("/applications", get(handle_list_applications))
        .route("/applications/batch-status", post(handle_batch_transition))
        .route("/applications/{id}", get(handle_get_application))
        .route("/applications/{id}/status", patch(handle_transition_application))
        .route("/applications/{id}/cancel", post(handle_cancel_application))
        .route("/services", get(handle_list_services))
        .route("/services", post(handle_create_service))
        .route("/services/search", get(handle_search_services))
        .route("/services/{id}", get(handle_get_service))
        .route("/services/{id}", patch(handle_update_service))
        .route("/services/{id}", delete(handle_deactivate_service))
        .route("/admin/roles", post(handle_assign_role))
        .route("/admin/users/{id}", delete(handle_delete_user))
        .route("/admin/stats", get(handle_dashboard_stats))
        .route("/admin/activity", get(handle_list_activity))
        .route("/me/stats", get(handle_citizen_stats))
        .with_state(app_state)
}

/// Creates the seed administrator if the database holds no principals.
fn seed_admin(
    persistence: &mut Persistence,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if persistence.count_principals()? > 0 {
        info!("Principals already exist; skipping admin seed");
        return Ok(());
    }

    let principal_id: i64 =
        persistence.create_principal(email, "Administrator", password, Role::Administrator)?;
    info!(principal_id, email, "Seeded administrator account");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Gram Panchayat Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database_path {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let (Some(email), Some(password)) = (&args.seed_admin_email, &args.seed_admin_password) {
        seed_admin(&mut persistence, email, password)?;
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = args.bind_addr.parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
