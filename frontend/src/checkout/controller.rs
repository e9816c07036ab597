use log::{error, info, warn};
use std::cell::Cell;
use std::rc::Rc;

use super::models::{DonorInfo, Rupees};
use super::service::{launch_checkout, CheckoutWidget, LaunchOptions, PaymentsBackend};
use super::CheckoutError;
use crate::config::{MAX_DONATION_RUPEES, MIN_DONATION_RUPEES};

pub const CHECKOUT_NAME: &str = "Thafheemul Quran";
pub const CHECKOUT_DESCRIPTION: &str = "Support Quran learning mission";
pub const DEFAULT_DONOR_NAME: &str = "Supporter";
pub const PENDING_VERIFICATION_MESSAGE: &str =
    "Payment is being verified. Final confirmation will arrive once webhook is processed.";
pub const UNABLE_TO_START_MESSAGE: &str = "Unable to start payment flow.";

/// What the donor is told once an attempt ends.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    /// The payment went through and awaits the backend's webhook confirmation.
    PendingVerification(String),
    Failure(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::PendingVerification(message) | Notice::Failure(message) => message,
        }
    }

    fn failure(err: &CheckoutError) -> Self {
        let message = err.to_string();
        if message.is_empty() {
            Notice::Failure(UNABLE_TO_START_MESSAGE.to_string())
        } else {
            Notice::Failure(message)
        }
    }
}

/// Marks one checkout attempt as in flight. Dropping it, on any path, returns to idle.
#[derive(Debug)]
pub struct LaunchGuard {
    in_flight: Rc<Cell<bool>>,
}

impl Drop for LaunchGuard {
    fn drop(&mut self) {
        self.in_flight.set(false);
    }
}

/// Single-flight donation entry point: `Idle -> Launching -> Idle`.
pub struct DonationCheckout<B, W> {
    backend: B,
    widget: W,
    campaign_id: String,
    minimum: Rupees,
    in_flight: Rc<Cell<bool>>,
}

impl<B, W> DonationCheckout<B, W>
where
    B: PaymentsBackend,
    W: CheckoutWidget,
{
    pub fn new(backend: B, widget: W, campaign_id: impl Into<String>) -> Self {
        Self {
            backend,
            widget,
            campaign_id: campaign_id.into(),
            minimum: Rupees(MIN_DONATION_RUPEES),
            in_flight: Rc::new(Cell::new(false)),
        }
    }

    pub fn with_minimum(mut self, minimum: Rupees) -> Self {
        self.minimum = minimum;
        self
    }

    pub fn is_launching_checkout(&self) -> bool {
        self.in_flight.get()
    }

    /// Enters `Launching`, or returns `None` if an attempt is already running.
    pub fn try_begin(&self) -> Option<LaunchGuard> {
        if self.in_flight.replace(true) {
            return None;
        }
        Some(LaunchGuard {
            in_flight: self.in_flight.clone(),
        })
    }

    /// Starts a donation unless one is already in flight, in which case nothing happens and
    /// `None` is returned.
    pub async fn start_donation(&self, amount: f64, donor: DonorInfo) -> Option<Notice> {
        let guard = self.try_begin()?;
        Some(self.launch(guard, amount, donor).await)
    }

    /// Runs the attempt owned by `guard`. `amount` is in whole rupees.
    pub async fn launch(&self, guard: LaunchGuard, amount: f64, donor: DonorInfo) -> Notice {
        let _guard = guard;

        let amount = match Rupees::from_amount(amount, self.minimum, Rupees(MAX_DONATION_RUPEES)) {
            Ok(amount) => amount,
            Err(e) => {
                warn!("Rejected donation amount {}: {}", amount, e);
                return Notice::failure(&e);
            }
        };

        let donor = DonorInfo {
            name: donor.name().unwrap_or_else(|| DEFAULT_DONOR_NAME.to_string()),
            ..donor
        };
        info!("Starting {} donation for campaign {}", amount, self.campaign_id);

        let options = LaunchOptions {
            donor,
            campaign_id: Some(self.campaign_id.clone()),
            name: Some(CHECKOUT_NAME.to_string()),
            description: Some(CHECKOUT_DESCRIPTION.to_string()),
            ..LaunchOptions::new(amount)
        };

        match launch_checkout(&self.backend, &self.widget, options).await {
            Ok(outcome) => match outcome.failure_message() {
                None => Notice::PendingVerification(PENDING_VERIFICATION_MESSAGE.to_string()),
                Some(message) => Notice::Failure(message.to_string()),
            },
            Err(e) => {
                error!("Donation checkout failed: {}", e);
                Notice::failure(&e)
            }
        }
    }
}
