//! System wiring and observability setup.

pub mod order_system;
pub mod tracing;

pub use order_system::{OrderSystem, ShutdownError};
pub use self::tracing::setup_tracing;
