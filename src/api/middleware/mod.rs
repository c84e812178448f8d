//! API middleware.

mod cors;
mod error_envelope;
mod panic;
pub mod request_id;

pub use cors::cors_layer;
pub use error_envelope::error_envelope;
pub use panic::handle_panic;
pub use request_id::{trace_layer, MakeCorrelatedId};
