//! Shared wiring for account handler tests.

use std::sync::Arc;

use chrono::Duration;
use secrecy::SecretString;

use crate::adapters::auth::{Argon2Params, Argon2PasswordHasher, JwtSessionManager};
use crate::adapters::memory::{InMemoryPaymentRepository, InMemoryUserRepository};
use crate::adapters::razorpay::MockPaymentGateway;
use crate::adapters::{FixedClock, InMemoryEventBus};
use crate::application::handlers::subscription::{BillingSettings, CancelSubscriptionHandler};
use crate::domain::foundation::Timestamp;
use crate::domain::subscription::Payment;
use crate::domain::user::{Email, Role, User};
use crate::ports::{Clock, PasswordHasher, PaymentRepository, UserRepository};

pub struct Fixture {
    pub users: InMemoryUserRepository,
    pub payments: InMemoryPaymentRepository,
    pub gateway: MockPaymentGateway,
    pub bus: Arc<InMemoryEventBus>,
    pub clock: Arc<FixedClock>,
    pub hasher: Arc<Argon2PasswordHasher>,
    pub sessions: Arc<JwtSessionManager>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            users: InMemoryUserRepository::new(),
            payments: InMemoryPaymentRepository::new(),
            gateway: MockPaymentGateway::new(),
            bus: Arc::new(InMemoryEventBus::recording()),
            clock: Arc::new(FixedClock::at(Timestamp::now())),
            hasher: Arc::new(Argon2PasswordHasher::with_params(Argon2Params {
                memory_kib: 8,
                iterations: 1,
                parallelism: 1,
            })),
            sessions: Arc::new(JwtSessionManager::new(
                &SecretString::new("account-tests-secret-0123456789abcdef".to_string()),
                Duration::days(15),
            )),
        }
    }

    pub fn canceller(&self) -> Arc<CancelSubscriptionHandler> {
        Arc::new(CancelSubscriptionHandler::new(
            Arc::new(self.users.clone()),
            Arc::new(self.payments.clone()),
            Arc::new(self.gateway.clone()),
            self.bus.clone(),
            self.clock.clone(),
            BillingSettings::default(),
        ))
    }

    pub async fn user_with_password(&self, email: &str, password: &str) -> User {
        let hash = self.hasher.hash(password).unwrap();
        let user = User::register("Learner", Email::parse(email).unwrap(), hash, self.clock.now())
            .unwrap();
        self.users.save(&user).await.unwrap();
        user
    }

    pub async fn user(&self, email: &str) -> User {
        self.user_with_password(email, "secret123").await
    }

    pub async fn admin(&self, email: &str) -> User {
        let mut user = self.user(email).await;
        user.role = Role::Admin;
        self.users.save(&user).await.unwrap();
        user
    }

    pub async fn subscriber(&self, email: &str) -> User {
        let mut user = self.user(email).await;
        user.start_subscription("sub_A").unwrap();
        user.activate_subscription().unwrap();
        self.users.save(&user).await.unwrap();
        self.payments
            .create(&Payment::record("pay_A", "sub_A", "sig", self.clock.now()))
            .await
            .unwrap();
        user
    }
}
