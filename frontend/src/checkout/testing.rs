use futures::channel::oneshot;
use std::cell::{Cell, RefCell};

use super::models::{
    CreateOrderRequest, Currency, DonationOrder, Paise, PaymentVerification, WidgetEvent,
    WidgetOptions,
};
use super::service::{CheckoutWidget, PaymentsBackend};
use super::CheckoutError;

pub(crate) fn sample_order() -> DonationOrder {
    DonationOrder {
        order_id: "o1".into(),
        amount: Paise(50000),
        currency: Currency::Inr,
        provider_key_id: "k1".into(),
    }
}

pub(crate) fn completed() -> WidgetEvent {
    WidgetEvent::Completed(PaymentVerification {
        order_id: "o1".into(),
        payment_id: "pay_1".into(),
        signature: "sig".into(),
    })
}

pub(crate) struct FakeBackend {
    order: Result<DonationOrder, CheckoutError>,
    verify: Result<(), CheckoutError>,
    /// When set, create_order waits for this before answering.
    pub gate: RefCell<Option<oneshot::Receiver<()>>>,
    pub create_calls: RefCell<Vec<CreateOrderRequest>>,
    pub verify_calls: RefCell<Vec<PaymentVerification>>,
}

impl FakeBackend {
    pub fn with_order(order: DonationOrder) -> Self {
        Self {
            order: Ok(order),
            verify: Ok(()),
            gate: RefCell::new(None),
            create_calls: RefCell::default(),
            verify_calls: RefCell::default(),
        }
    }

    pub fn failing_create(message: &str) -> Self {
        Self {
            order: Err(CheckoutError::OrderCreation(message.into())),
            ..Self::with_order(sample_order())
        }
    }

    pub fn failing_verify(message: &str) -> Self {
        Self {
            verify: Err(CheckoutError::Verification(message.into())),
            ..Self::with_order(sample_order())
        }
    }
}

impl PaymentsBackend for FakeBackend {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<DonationOrder, CheckoutError> {
        self.create_calls.borrow_mut().push(request.clone());
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.order.clone()
    }

    async fn verify_order(&self, verification: &PaymentVerification) -> Result<(), CheckoutError> {
        self.verify_calls.borrow_mut().push(verification.clone());
        self.verify.clone()
    }
}

pub(crate) struct FakeWidget {
    load: Result<(), CheckoutError>,
    event: WidgetEvent,
    pub loads: Cell<usize>,
    pub opened: RefCell<Vec<WidgetOptions>>,
}

impl FakeWidget {
    pub fn ending_with(event: WidgetEvent) -> Self {
        Self {
            load: Ok(()),
            event,
            loads: Cell::new(0),
            opened: RefCell::default(),
        }
    }

    pub fn failing_load(err: CheckoutError) -> Self {
        Self {
            load: Err(err),
            ..Self::ending_with(WidgetEvent::Dismissed)
        }
    }
}

impl CheckoutWidget for FakeWidget {
    async fn load(&self) -> Result<(), CheckoutError> {
        self.loads.set(self.loads.get() + 1);
        self.load.clone()
    }

    async fn open(&self, options: WidgetOptions) -> Result<WidgetEvent, CheckoutError> {
        self.opened.borrow_mut().push(options);
        Ok(self.event.clone())
    }
}
