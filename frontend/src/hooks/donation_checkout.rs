use gloo_timers::callback::Timeout;
use log::info;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::checkout::{DonationCheckout, DonorInfo, HttpPaymentsBackend, Notice, RazorpayWidget};
use crate::config::PaymentsConfig;

const NOTICE_TIMEOUT_MS: u32 = 8_000;

#[derive(Clone, PartialEq)]
pub struct UseDonationCheckoutHandle {
    pub is_launching_checkout: bool,
    pub notice: Option<Notice>,
    /// Amount in whole rupees plus the donor's details.
    pub start_donation: Callback<(f64, DonorInfo)>,
    pub dismiss_notice: Callback<()>,
}

#[hook]
pub fn use_donation_checkout() -> UseDonationCheckoutHandle {
    let checkout = use_memo(
        |_| {
            let config = PaymentsConfig::from_env();
            let campaign_id = config.campaign_id().to_string();
            DonationCheckout::new(HttpPaymentsBackend::new(config), RazorpayWidget, campaign_id)
        },
        (),
    );
    let is_launching = use_state(|| false);
    let notice = use_state(|| None::<Notice>);

    // Clear a shown notice after a while; a newer notice cancels the old timer.
    {
        let notice_setter = notice.setter();
        use_effect_with_deps(
            move |current: &Option<Notice>| {
                let timeout = current.as_ref().map(|_| {
                    Timeout::new(NOTICE_TIMEOUT_MS, move || notice_setter.set(None))
                });
                move || drop(timeout)
            },
            (*notice).clone(),
        );
    }

    let start_donation = {
        let checkout = checkout.clone();
        let is_launching = is_launching.clone();
        let notice = notice.clone();
        Callback::from(move |(amount, donor): (f64, DonorInfo)| {
            let Some(guard) = checkout.try_begin() else {
                info!("Checkout already in progress, ignoring");
                return;
            };
            is_launching.set(true);
            notice.set(None);

            let checkout = checkout.clone();
            let is_launching = is_launching.clone();
            let notice = notice.clone();
            spawn_local(async move {
                let result = checkout.launch(guard, amount, donor).await;
                is_launching.set(false);
                notice.set(Some(result));
            });
        })
    };

    let dismiss_notice = {
        let notice = notice.clone();
        Callback::from(move |_: ()| notice.set(None))
    };

    UseDonationCheckoutHandle {
        is_launching_checkout: *is_launching,
        notice: (*notice).clone(),
        start_donation,
        dismiss_notice,
    }
}
