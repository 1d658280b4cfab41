//! Axum routes for subscription endpoints.

use axum::routing::{delete, get};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{
    cancel_subscription, create_subscription, get_gateway_key, subscriber_ping, verify_payment,
};

/// # Routes
///
/// - `GET /subscribe` - Authenticated
/// - `GET /paymentverification` - Authenticated, answers with a 303
/// - `GET /razorpaykey` - public
/// - `DELETE /subscribe/cancel` - Authenticated
/// - `GET /subscriber/ping` - SubscriberOnly
pub fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route("/subscribe", get(create_subscription))
        .route("/paymentverification", get(verify_payment))
        .route("/razorpaykey", get(get_gateway_key))
        .route("/subscribe/cancel", delete(cancel_subscription))
        .route("/subscriber/ping", get(subscriber_ping))
}
