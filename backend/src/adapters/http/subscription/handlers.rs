//! HTTP handlers for subscription endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;

use crate::application::handlers::{
    CancelSubscriptionCommand, CreateSubscriptionCommand, VerifyPaymentCommand,
};
use crate::domain::subscription::SubscriptionError;

use super::super::error::ApiError;
use super::super::middleware::{RequireAuth, RequireSubscriber};
use super::super::state::AppState;
use super::dto::{
    CancelResponse, GatewayKeyResponse, MessageResponse, PaymentVerificationParams,
    SubscribeResponse,
};

/// GET /subscribe - open a gateway subscription for the caller
pub async fn create_subscription(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .create_subscription_handler()
        .handle(CreateSubscriptionCommand { user_id: user.id })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubscribeResponse {
            success: true,
            subscription_id: result.subscription_id,
        }),
    ))
}

/// GET /paymentverification - checkout callback relayed by the browser
///
/// Success and signature mismatch both answer with a redirect to the
/// frontend; anything else is a JSON error.
pub async fn verify_payment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<PaymentVerificationParams>,
) -> Result<Response, ApiError> {
    let cmd = VerifyPaymentCommand {
        user_id: user.id,
        payment_id: params.razorpay_payment_id,
        subscription_id: params.razorpay_subscription_id,
        signature: params.razorpay_signature,
    };

    let frontend = &state.web.frontend_url;
    match state.verify_payment_handler().handle(cmd).await {
        Ok(result) => Ok(Redirect::to(&format!(
            "{}/paymentsuccess?reference={}",
            frontend, result.payment_id
        ))
        .into_response()),
        Err(SubscriptionError::SignatureMismatch) => {
            Ok(Redirect::to(&format!("{}/paymentfailed", frontend)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /razorpaykey - public key id for the browser checkout
pub async fn get_gateway_key(State(state): State<AppState>) -> impl IntoResponse {
    let result = state.gateway_key_handler().handle();
    Json(GatewayKeyResponse {
        success: true,
        key: result.key,
    })
}

/// DELETE /subscribe/cancel - cancel, refunding inside the window
pub async fn cancel_subscription(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .cancel_subscription_handler()
        .handle(CancelSubscriptionCommand { user_id: user.id })
        .await?;

    Ok(Json(CancelResponse {
        success: true,
        refunded: result.refunded(),
        refund_failed: result.refund_failed(),
        message: result.message(),
    }))
}

/// GET /subscriber/ping - only reachable by active subscribers and admins
pub async fn subscriber_ping(RequireSubscriber(user): RequireSubscriber) -> impl IntoResponse {
    Json(MessageResponse::ok(format!(
        "Subscriber access granted for {}",
        user.name
    )))
}
