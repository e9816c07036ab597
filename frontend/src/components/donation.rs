use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

use crate::checkout::{DonorInfo, Notice};
use crate::hooks::donation_checkout::use_donation_checkout;

const PRESET_AMOUNTS: [u64; 4] = [100, 500, 1000, 5000];
const DEFAULT_AMOUNT: &str = "500";

fn input_setter(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

#[function_component(DonationSection)]
pub fn donation_section() -> Html {
    let checkout = use_donation_checkout();
    let amount = use_state(|| DEFAULT_AMOUNT.to_string());
    let name = use_state(String::new);
    let email = use_state(String::new);
    let phone = use_state(String::new);
    let form_error = use_state(|| None::<String>);

    let on_donate = {
        let amount = amount.clone();
        let name = name.clone();
        let email = email.clone();
        let phone = phone.clone();
        let form_error = form_error.clone();
        let start_donation = checkout.start_donation.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if name.trim().is_empty() {
                form_error.set(Some("Please enter your name.".to_string()));
                return;
            }
            form_error.set(None);
            // Unparseable input goes through as NaN and is rejected by amount validation.
            let value = amount.trim().parse::<f64>().unwrap_or(f64::NAN);
            start_donation.emit((
                value,
                DonorInfo {
                    name: (*name).clone(),
                    email: (*email).clone(),
                    phone: (*phone).clone(),
                },
            ));
        })
    };

    let notice = checkout.notice.as_ref().map(|notice| {
        let class = match notice {
            Notice::PendingVerification(_) => "donation-notice success",
            Notice::Failure(_) => "donation-notice error",
        };
        let dismiss = checkout.dismiss_notice.reform(|_: MouseEvent| ());
        html! {
            <div class={class} role="status">
                <span>{notice.message()}</span>
                <button class="notice-close" onclick={dismiss}>{"×"}</button>
            </div>
        }
    });

    html! {
        <section id="donate" class="donation-section">
            <div class="donation-copy">
                <span class="section-tag">{"Support Us"}</span>
                <h2>{"Support This Noble Cause"}</h2>
                <p>
                    {"Your support helps us maintain and improve the app, add new languages, and reach more Muslims worldwide."}
                </p>
            </div>
            <div class="donation-card">
                <h3>{"Be Part of This Ongoing Sadaqah"}</h3>
                <div class="preset-amounts">
                    { for PRESET_AMOUNTS.iter().map(|preset| {
                        let value = preset.to_string();
                        let selected = *amount == value;
                        let onclick = {
                            let amount = amount.clone();
                            Callback::from(move |e: MouseEvent| {
                                e.prevent_default();
                                amount.set(value.clone());
                            })
                        };
                        html! {
                            <button class={classes!("preset-amount", selected.then(|| "selected"))} {onclick}>
                                {format!("₹{}", preset)}
                            </button>
                        }
                    }) }
                </div>
                <label>
                    {"Amount (₹)"}
                    <input type="number" min="1" step="1" value={(*amount).clone()} oninput={input_setter(&amount)} />
                </label>
                <label>
                    {"Name"}
                    <input type="text" value={(*name).clone()} oninput={input_setter(&name)} />
                </label>
                <label>
                    {"Email (optional)"}
                    <input type="email" value={(*email).clone()} oninput={input_setter(&email)} />
                </label>
                <label>
                    {"Phone (optional)"}
                    <input type="tel" value={(*phone).clone()} oninput={input_setter(&phone)} />
                </label>
                {
                    if let Some(error) = (*form_error).as_ref() {
                        html! { <p class="form-error">{error}</p> }
                    } else {
                        html! {}
                    }
                }
                <button
                    class="donate-button"
                    disabled={checkout.is_launching_checkout}
                    onclick={on_donate}
                >
                    { if checkout.is_launching_checkout { "Opening checkout..." } else { "Support Now" } }
                </button>
                { notice.unwrap_or_default() }
                <p class="secure-note">{"Secure support gateway"}</p>
            </div>
        </section>
    }
}
