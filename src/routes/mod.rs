pub mod dashboard;
pub mod leads;
pub mod users;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use dashboard::{handle_navigation, handle_total_clients_chart};
use leads::{handle_lead_fields, handle_submit_lead, handle_validate_lead};
use users::{handle_create_user, handle_sign_in};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/leads", post(handle_submit_lead))
        .route("/api/leads/validate", post(handle_validate_lead))
        .route("/api/leads/fields", get(handle_lead_fields))
        .route("/api/users", post(handle_create_user))
        .route("/api/users/sign-in", post(handle_sign_in))
        .route("/api/admin/navigation", get(handle_navigation))
        .route("/api/admin/charts/total-clients", get(handle_total_clients_chart))
        .with_state(state)
}

async fn root() -> &'static str {
    "Hello, Client Desk!"
}
