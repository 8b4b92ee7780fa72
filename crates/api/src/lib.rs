mod error;
mod state;
mod util;

pub mod routes;
pub mod services;

pub use error::ApiError;
pub use state::AppState;

use axum::{
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/auth/login", post(routes::auth::login))
        // User routes
        .route("/api/users", post(routes::users::register))
        .route("/api/users/:user_id", get(routes::users::get_user))
        .route("/api/users/:user_id", put(routes::users::update_user))
        .route("/api/users/:user_id", delete(routes::users::delete_user))
        // Account routes
        .route("/api/accounts", get(routes::accounts::list_accounts))
        .route("/api/accounts", post(routes::accounts::create_account))
        .route("/api/accounts/:account_id", get(routes::accounts::get_account))
        .route(
            "/api/accounts/:account_id",
            put(routes::accounts::update_account),
        )
        .route(
            "/api/accounts/:account_id",
            delete(routes::accounts::delete_account),
        )
        // Category routes
        .route("/api/categories", get(routes::categories::list_categories))
        .route("/api/categories", post(routes::categories::create_category))
        .route(
            "/api/categories/:category_id",
            get(routes::categories::get_category),
        )
        .route(
            "/api/categories/:category_id",
            delete(routes::categories::delete_category),
        )
        // Expense routes
        .route(
            "/api/accounts/:account_id/expenses",
            post(routes::expenses::create_expense),
        )
        .route("/api/expenses", get(routes::expenses::list_expenses))
        .route("/api/expenses/:expense_id", get(routes::expenses::get_expense))
        .route(
            "/api/expenses/:expense_id",
            put(routes::expenses::update_expense),
        )
        .route(
            "/api/expenses/:expense_id",
            delete(routes::expenses::delete_expense),
        )
        // Advice route
        .route("/api/advice", get(routes::advice::get_advice))
        .with_state(state)
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
