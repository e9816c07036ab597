use futures::future::{FutureExt, LocalBoxFuture, Shared};
use log::{error, info, warn};
use std::cell::OnceCell;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::js_sys::{Function, Promise, Reflect};
use web_sys::{AddEventListenerOptions, Document, HtmlScriptElement};

use super::CheckoutError;

pub const RAZORPAY_SCRIPT_URL: &str = "https://checkout.razorpay.com/v1/checkout.js";

/// Name of the global the provider script defines.
pub const PROVIDER_GLOBAL: &str = "Razorpay";

type ScriptLoad = Shared<LocalBoxFuture<'static, Result<(), CheckoutError>>>;

thread_local! {
    // Created on the first load attempt and kept for the page's lifetime, failures included.
    // Only a page reload starts over.
    static SCRIPT_LOAD: OnceCell<ScriptLoad> = const { OnceCell::new() };
}

pub fn provider_available() -> bool {
    web_sys::window()
        .map(|window| Reflect::has(&window, &JsValue::from_str(PROVIDER_GLOBAL)).unwrap_or(false))
        .unwrap_or(false)
}

/// Loads the provider's checkout script at most once per page. Concurrent callers share
/// the same pending load.
pub async fn load_provider_script() -> Result<(), CheckoutError> {
    if provider_available() {
        return Ok(());
    }

    let load = SCRIPT_LOAD.with(|cell| {
        cell.get_or_init(|| start_load(RAZORPAY_SCRIPT_URL).boxed_local().shared())
            .clone()
    });
    load.await
}

async fn start_load(src: &'static str) -> Result<(), CheckoutError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(CheckoutError::ScriptLoad)?;

    let promise = script_load_promise(&document, src)?;
    match JsFuture::from(promise).await {
        Ok(_) => {
            info!("Loaded checkout script from {}", src);
            Ok(())
        }
        Err(_) => {
            error!("Checkout script at {} failed to load", src);
            Err(CheckoutError::ScriptLoad)
        }
    }
}

/// Returns a promise settled by the load or error event of the `<script>` for `src`.
///
/// An element already in the document is reused; otherwise a new async script is appended to
/// `<body>`. The DOM work happens synchronously, before the promise is returned.
pub fn script_load_promise(document: &Document, src: &str) -> Result<Promise, CheckoutError> {
    let existing = document
        .query_selector(&format!("script[src=\"{}\"]", src))
        .map_err(|_| CheckoutError::ScriptLoad)?;

    let (script, needs_append) = match existing {
        Some(element) => (
            element
                .dyn_into::<HtmlScriptElement>()
                .map_err(|_| CheckoutError::ScriptLoad)?,
            false,
        ),
        None => {
            let script = document
                .create_element("script")
                .map_err(|_| CheckoutError::ScriptLoad)?
                .dyn_into::<HtmlScriptElement>()
                .map_err(|_| CheckoutError::ScriptLoad)?;
            script.set_src(src);
            script.set_async(true);
            (script, true)
        }
    };

    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        for (event, callback) in [("load", &resolve), ("error", &reject)] {
            if script
                .add_event_listener_with_callback_and_add_event_listener_options(
                    event, callback, &options,
                )
                .is_err()
            {
                warn!("Could not attach {} listener to checkout script", event);
            }
        }
    });

    if needs_append {
        let body = document.body().ok_or(CheckoutError::ScriptLoad)?;
        body.append_child(&script).map_err(|_| CheckoutError::ScriptLoad)?;
    }

    Ok(promise)
}
