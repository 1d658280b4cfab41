//! Payment gateway adapters.
//!
//! - `razorpay_adapter` - Razorpay REST client
//! - `mock_gateway` - In-process double for tests

mod mock_gateway;
mod razorpay_adapter;

pub use mock_gateway::{GatewayCall, MockPaymentGateway};
pub use razorpay_adapter::{RazorpayConfig, RazorpayGateway, DEFAULT_API_BASE_URL};
