use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::handlers::{agents, audit_logs, auth, branches, discounts, health};

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/mock/login", post(auth::login))
        // Discounts
        .route(
            "/discounts",
            get(discounts::list_discounts).post(discounts::create_discount),
        )
        .route(
            "/discounts/{id}",
            get(discounts::get_discount)
                .put(discounts::update_discount)
                .delete(discounts::delete_discount),
        )
        .route("/discounts/{id}/toggle", post(discounts::toggle_discount))
        // Audit trail (read only)
        .route("/audit-logs", get(audit_logs::list_audit_logs))
        .route("/audit-logs/{id}", get(audit_logs::get_audit_log))
        // Agents
        .route("/agents", get(agents::list_agents).post(agents::create_agent))
        .route(
            "/agents/{id}",
            get(agents::get_agent)
                .put(agents::update_agent)
                .delete(agents::delete_agent),
        )
        // Branches
        .route(
            "/branches",
            get(branches::list_branches).post(branches::create_branch),
        )
        .route(
            "/branches/{id}",
            get(branches::get_branch)
                .put(branches::update_branch)
                .delete(branches::delete_branch),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
