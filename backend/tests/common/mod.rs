//! Shared harness: the full application on in-memory adapters.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use coursebundler::adapters::auth::{Argon2Params, Argon2PasswordHasher};
use coursebundler::adapters::http::{api_router, AppState, RouterSettings};
use coursebundler::adapters::razorpay::MockPaymentGateway;
use coursebundler::adapters::{FixedClock, InMemoryEventBus};
use coursebundler::app::{self, Repositories};
use coursebundler::config::{
    AppConfig, AuthConfig, DatabaseConfig, PaymentConfig, ServerConfig, StatsConfig,
};
use coursebundler::domain::foundation::Timestamp;
use coursebundler::domain::subscription::PaymentSignatureVerifier;
use coursebundler::domain::user::{Email, Role};
use coursebundler::ports::{Clock, UserRepository};

pub const KEY_ID: &str = "rzp_test_key";
pub const KEY_SECRET: &str = "test_key_secret";
pub const FRONTEND: &str = "http://frontend.test";

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            frontend_url: format!("{}/", FRONTEND),
            ..Default::default()
        },
        database: DatabaseConfig::default(),
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            ..Default::default()
        },
        payment: PaymentConfig {
            key_id: KEY_ID.to_string(),
            key_secret: KEY_SECRET.to_string(),
            ..Default::default()
        },
        stats: StatsConfig::default(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub repos: Repositories,
    pub gateway: MockPaymentGateway,
    pub bus: Arc<InMemoryEventBus>,
    pub clock: Arc<FixedClock>,
    pub verifier: PaymentSignatureVerifier,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Session token from the `Set-Cookie` header, if one was set.
    pub fn session_token(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|c| c.strip_prefix("token="))
            .and_then(|c| c.split(';').next())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_repositories(Repositories::in_memory())
    }

    /// Lets a test keep concrete handles on the stores it wires in.
    pub fn with_repositories(repos: Repositories) -> Self {
        let config = test_config();
        let gateway = MockPaymentGateway::new();
        let bus = Arc::new(InMemoryEventBus::recording());
        let clock = Arc::new(FixedClock::at(Timestamp::now()));
        let dyn_clock: Arc<dyn Clock> = clock.clone();

        app::subscribe_stats(&bus, &repos, dyn_clock.clone());

        let mut state = app::build_state(
            &config,
            &repos,
            Arc::new(gateway.clone()),
            bus.clone(),
            dyn_clock,
        );
        state.hasher = Arc::new(Argon2PasswordHasher::with_params(Argon2Params {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }));
        state.billing.gateway_timeout = Duration::from_millis(200);

        let router = api_router(state.clone(), &RouterSettings::default());

        Self {
            router,
            state,
            repos,
            gateway,
            bus,
            clock,
            verifier: PaymentSignatureVerifier::new(KEY_SECRET),
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, token, None).await
    }

    /// Registers through the API and returns the session token.
    pub async fn register(&self, name: &str, email: &str) -> String {
        let response = self
            .send(
                Method::POST,
                "/api/v1/register",
                None,
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": "secret123",
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.session_token().expect("session cookie")
    }

    /// Promotes directly in the store; there is no bootstrap admin endpoint.
    pub async fn promote(&self, email: &str) {
        let email = Email::parse(email).unwrap();
        let mut user = self.repos.users.find_by_email(&email).await.unwrap().unwrap();
        user.role = Role::Admin;
        self.repos.users.save(&user).await.unwrap();
    }

    pub async fn register_admin(&self, name: &str, email: &str) -> String {
        let token = self.register(name, email).await;
        self.promote(email).await;
        token
    }

    /// Subscribes and verifies a payment; returns the gateway subscription id.
    pub async fn subscribe_and_pay(&self, token: &str, payment_id: &str) -> String {
        let created = self.get("/api/v1/subscribe", Some(token)).await;
        assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
        let sub_id = created.body["subscriptionId"].as_str().unwrap().to_string();

        let verified = self
            .get(&self.verification_uri(payment_id, &sub_id, None), Some(token))
            .await;
        assert_eq!(verified.status, StatusCode::SEE_OTHER);
        sub_id
    }

    pub fn verification_uri(
        &self,
        payment_id: &str,
        subscription_id: &str,
        signature: Option<&str>,
    ) -> String {
        let signature = match signature {
            Some(s) => s.to_string(),
            None => self.verifier.sign(payment_id, subscription_id).unwrap(),
        };
        format!(
            "/api/v1/paymentverification?razorpay_signature={}&razorpay_payment_id={}&razorpay_subscription_id={}",
            signature, payment_id, subscription_id
        )
    }
}
