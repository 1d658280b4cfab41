//! Shared wiring for subscription handler tests.

use std::sync::Arc;
use std::time::Duration;

use crate::adapters::memory::{InMemoryPaymentRepository, InMemoryUserRepository};
use crate::adapters::razorpay::MockPaymentGateway;
use crate::adapters::{FixedClock, InMemoryEventBus};
use crate::domain::foundation::Timestamp;
use crate::domain::subscription::{Payment, PaymentSignatureVerifier, RefundWindow};
use crate::domain::user::{Email, Role, User};
use crate::ports::{Clock, PaymentRepository, UserRepository};

use super::BillingSettings;

pub const KEY_SECRET: &str = "test_key_secret";

pub struct Fixture {
    pub users: InMemoryUserRepository,
    pub payments: InMemoryPaymentRepository,
    pub gateway: MockPaymentGateway,
    pub bus: Arc<InMemoryEventBus>,
    pub clock: Arc<FixedClock>,
    pub settings: BillingSettings,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            users: InMemoryUserRepository::new(),
            payments: InMemoryPaymentRepository::new(),
            gateway: MockPaymentGateway::new(),
            bus: Arc::new(InMemoryEventBus::recording()),
            clock: Arc::new(FixedClock::at(Timestamp::now())),
            settings: BillingSettings {
                plan_id: "plan_test".to_string(),
                billing_cycles: 12,
                refund_window: RefundWindow::days(7),
                gateway_timeout: Duration::from_millis(100),
            },
        }
    }

    pub fn verifier(&self) -> PaymentSignatureVerifier {
        PaymentSignatureVerifier::new(KEY_SECRET)
    }

    pub async fn user(&self) -> User {
        let user = User::register(
            "Learner",
            Email::parse(&format!("{}@example.com", uuid::Uuid::new_v4())).unwrap(),
            "$argon2id$stub",
            self.clock.now(),
        )
        .unwrap();
        self.users.save(&user).await.unwrap();
        user
    }

    pub async fn admin(&self) -> User {
        let mut user = self.user().await;
        user.role = Role::Admin;
        self.users.save(&user).await.unwrap();
        user
    }

    /// A user whose subscription `sub_id` is active, paid at `paid_at`.
    pub async fn subscriber(&self, sub_id: &str, paid_at: Timestamp) -> (User, Payment) {
        let mut user = self.user().await;
        user.start_subscription(sub_id).unwrap();
        user.activate_subscription().unwrap();
        self.users.save(&user).await.unwrap();

        let payment = Payment::record(format!("pay_{}", sub_id), sub_id, "sig", paid_at);
        self.payments.create(&payment).await.unwrap();
        (user, payment)
    }

    pub fn clock_now(&self) -> Timestamp {
        self.clock.now()
    }

    pub async fn reload(&self, user: &User) -> Option<User> {
        self.users.find_by_id(&user.id).await.unwrap()
    }
}
