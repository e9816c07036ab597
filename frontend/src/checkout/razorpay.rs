use futures::channel::oneshot;
use log::{error, warn};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::js_sys::{Object, Reflect};

use super::models::{PaymentVerification, RazorpayPaymentResponse, WidgetEvent, WidgetOptions};
use super::script::{load_provider_script, provider_available};
use super::service::CheckoutWidget;
use super::CheckoutError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Razorpay)]
    type RazorpayInstance;

    #[wasm_bindgen(constructor, js_class = "Razorpay", catch)]
    fn new(options: &JsValue) -> Result<RazorpayInstance, JsValue>;

    #[wasm_bindgen(method)]
    fn open(this: &RazorpayInstance);

    #[wasm_bindgen(method)]
    fn on(this: &RazorpayInstance, event: &str, callback: &JsValue);
}

/// Folds the widget's success, `payment.failed` and dismiss callbacks into one `WidgetEvent`.
///
/// The provider keeps its modal open after a failed payment so the donor can try again, so a
/// failure is only remembered. The session settles on the first success or dismissal.
#[derive(Debug, Default)]
pub(crate) struct WidgetSession {
    payment_failed: bool,
    settled: bool,
}

impl WidgetSession {
    pub fn payment_completed(&mut self, verification: PaymentVerification) -> Option<WidgetEvent> {
        self.settle(WidgetEvent::Completed(verification))
    }

    pub fn payment_failed(&mut self) -> Option<WidgetEvent> {
        self.payment_failed = true;
        None
    }

    /// The success callback fired with a payload we cannot read. The provider closes its modal
    /// after the success callback without a dismiss event, so this settles the session.
    pub fn payment_unreadable(&mut self) -> Option<WidgetEvent> {
        self.payment_failed = true;
        self.settle(WidgetEvent::PaymentFailed)
    }

    pub fn dismissed(&mut self) -> Option<WidgetEvent> {
        if self.payment_failed {
            self.settle(WidgetEvent::PaymentFailed)
        } else {
            self.settle(WidgetEvent::Dismissed)
        }
    }

    fn settle(&mut self, event: WidgetEvent) -> Option<WidgetEvent> {
        if self.settled {
            return None;
        }
        self.settled = true;
        Some(event)
    }
}

struct Settlement {
    session: WidgetSession,
    tx: Option<oneshot::Sender<WidgetEvent>>,
}

impl Settlement {
    fn deliver(&mut self, event: Option<WidgetEvent>) {
        if let (Some(event), Some(tx)) = (event, self.tx.take()) {
            let _ = tx.send(event);
        }
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<(), CheckoutError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| CheckoutError::Widget(describe(&e)))
}

/// Razorpay's hosted checkout, driven through `window.Razorpay`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RazorpayWidget;

impl CheckoutWidget for RazorpayWidget {
    async fn load(&self) -> Result<(), CheckoutError> {
        load_provider_script().await?;
        if !provider_available() {
            return Err(CheckoutError::ProviderUnavailable);
        }
        Ok(())
    }

    async fn open(&self, options: WidgetOptions) -> Result<WidgetEvent, CheckoutError> {
        let js_options = options
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| CheckoutError::Widget(e.to_string()))?;

        let (tx, rx) = oneshot::channel();
        let settlement = Rc::new(RefCell::new(Settlement {
            session: WidgetSession::default(),
            tx: Some(tx),
        }));

        // The closures are handed over to JS; the widget may call them long after this returns.
        let handler = {
            let settlement = settlement.clone();
            Closure::wrap(Box::new(move |response: JsValue| {
                let mut settlement = settlement.borrow_mut();
                let event = match serde_wasm_bindgen::from_value::<RazorpayPaymentResponse>(response) {
                    Ok(response) => settlement.session.payment_completed(response.into()),
                    Err(e) => {
                        error!("Unexpected payment response from widget: {}", e);
                        settlement.session.payment_unreadable()
                    }
                };
                settlement.deliver(event);
            }) as Box<dyn FnMut(JsValue)>)
            .into_js_value()
        };
        let on_dismiss = {
            let settlement = settlement.clone();
            Closure::wrap(Box::new(move || {
                let mut settlement = settlement.borrow_mut();
                let event = settlement.session.dismissed();
                settlement.deliver(event);
            }) as Box<dyn FnMut()>)
            .into_js_value()
        };
        let on_payment_failed = {
            let settlement = settlement.clone();
            Closure::wrap(Box::new(move |_: JsValue| {
                warn!("Widget reported a failed payment");
                let mut settlement = settlement.borrow_mut();
                let event = settlement.session.payment_failed();
                settlement.deliver(event);
            }) as Box<dyn FnMut(JsValue)>)
            .into_js_value()
        };

        let modal: JsValue = Object::new().into();
        set(&modal, "ondismiss", &on_dismiss)?;
        set(&js_options, "handler", &handler)?;
        set(&js_options, "modal", &modal)?;

        let checkout = RazorpayInstance::new(&js_options)
            .map_err(|e| CheckoutError::Widget(describe(&e)))?;
        checkout.on("payment.failed", &on_payment_failed);
        checkout.open();

        // The sender lives inside callbacks owned by JS; a drop without an event means the
        // widget went away without telling us.
        Ok(rx.await.unwrap_or(WidgetEvent::Dismissed))
    }
}
