use thiserror::Error;

/// Everything that can stop a donation attempt. The display text is what the donor sees.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckoutError {
    /// A required deployment setting is missing. Not recoverable by the donor.
    #[error("Missing {0} in environment.")]
    Configuration(&'static str),
    #[error("Failed to load Razorpay checkout script.")]
    ScriptLoad,
    #[error("Razorpay is not available in this browser.")]
    ProviderUnavailable,
    /// The backend refused to create an order. Carries the backend's message when it sent one.
    #[error("{0}")]
    OrderCreation(String),
    #[error("{0}")]
    Verification(String),
    #[error("{0}")]
    Validation(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unable to open checkout: {0}")]
    Widget(String),
}

impl From<gloo_net::Error> for CheckoutError {
    fn from(err: gloo_net::Error) -> Self {
        CheckoutError::Network(err.to_string())
    }
}
