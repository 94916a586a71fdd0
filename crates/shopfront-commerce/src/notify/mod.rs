//! Transient UI signals: the add-to-cart toast and the checkout
//! acknowledgement.

mod acknowledgement;
mod toast;

pub use acknowledgement::{AcknowledgementState, CartView, CheckoutAcknowledgement};
pub use toast::{Toast, ToastState, DEFAULT_TOAST_DELAY};
