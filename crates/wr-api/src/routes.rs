//! API routes

use axum::{
    extract::State,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Serialize;

use crate::extractors::AppState;
use crate::handlers::{
    analytics, announcements, attendance, employee_of_month, employees, holidays, leaves,
    reports, tasks,
};

/// Create the complete API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_v1_router())
        .with_state(state)
}

fn api_v1_router() -> Router<AppState> {
    Router::new()
        .route("/", get(api_root))
        .nest("/employees", employees_router())
        .nest("/tasks", tasks_router())
        .nest("/reports", reports_router())
        .nest("/attendance", attendance_router())
        .nest("/leave_requests", leaves_router())
        .nest("/holidays", holidays_router())
        .nest("/announcements", announcements_router())
        .route("/analytics/performance", get(analytics::performance))
        .route("/employee_of_month", get(employee_of_month::get))
        .route("/employee_of_month/compute", post(employee_of_month::compute))
}

fn employees_router() -> Router<AppState> {
    Router::new()
        .route("/", get(employees::list))
        .route("/", post(employees::create))
        .route("/:id", get(employees::get))
        .route("/:id", patch(employees::update))
        .route("/:id", delete(employees::delete))
        .route("/:id/team", get(employees::team))
}

fn tasks_router() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list))
        .route("/", post(tasks::create))
        .route("/:id", get(tasks::get))
        .route("/:id", patch(tasks::update))
        .route("/:id", delete(tasks::delete))
        .route("/:id/status", post(tasks::change_status))
        .route("/:id/comments", post(tasks::add_comment))
}

fn reports_router() -> Router<AppState> {
    Router::new()
        .route("/", get(reports::list))
        .route("/", post(reports::create))
        .route("/:id", get(reports::get))
        .route("/:id", patch(reports::update))
        .route("/:id", delete(reports::delete))
        .route("/:id/submit", post(reports::submit))
}

fn attendance_router() -> Router<AppState> {
    Router::new()
        .route("/", get(attendance::list))
        .route("/check_in", post(attendance::check_in))
        .route("/check_out", post(attendance::check_out))
}

fn leaves_router() -> Router<AppState> {
    Router::new()
        .route("/", get(leaves::list))
        .route("/", post(leaves::create))
        .route("/:id", get(leaves::get))
        .route("/:id", delete(leaves::delete))
        .route("/:id/review", post(leaves::review))
}

fn holidays_router() -> Router<AppState> {
    Router::new()
        .route("/", get(holidays::list))
        .route("/", post(holidays::create))
        .route("/:id", get(holidays::get))
        .route("/:id", patch(holidays::update))
        .route("/:id", delete(holidays::delete))
}

fn announcements_router() -> Router<AppState> {
    Router::new()
        .route("/", get(announcements::list))
        .route("/", post(announcements::create))
        .route("/:id", get(announcements::get))
        .route("/:id", patch(announcements::update))
        .route("/:id", delete(announcements::delete))
}

async fn api_root(State(state): State<AppState>) -> Json<ApiRoot> {
    Json(ApiRoot {
        instance_name: state.config.instance.app_title.clone(),
        company: state.config.instance.company.clone(),
        core_version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct ApiRoot {
    #[serde(rename = "instanceName")]
    instance_name: String,
    company: String,
    #[serde(rename = "coreVersion")]
    core_version: &'static str,
}
