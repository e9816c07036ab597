//! Donation checkout: provider script loading, the order/verify backend client, the hosted
//! widget binding and the single-flight controller the UI talks to.

mod api;
mod controller;
mod error;
mod models;
mod razorpay;
mod script;
mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{extract_error_message, HttpPaymentsBackend};
pub use controller::{DonationCheckout, LaunchGuard, Notice};
pub use error::CheckoutError;
pub use models::{
    CreateOrderRequest, Currency, DonationOrder, DonorInfo, Paise, PaymentVerification, Rupees,
    WidgetEvent, WidgetOptions,
};
pub use razorpay::RazorpayWidget;
pub use script::{load_provider_script, provider_available, script_load_promise, RAZORPAY_SCRIPT_URL};
pub use service::{launch_checkout, CheckoutOutcome, CheckoutWidget, LaunchOptions, PaymentsBackend};
