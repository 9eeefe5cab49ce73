//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`); the actors tag their
//! lines with `entity_type` instead.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: startup, shutdown and final table size.
//! - **Entity operations**: Create, Get, Update, Delete and Query, with ids.
//! - **Order flow**: spans for `create_order` and `get_order_history`, with the
//!   account, catalog and store calls nested inside.
//! - **Failures**: `warn!` with the entity id and the error.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run
//!
//! # Request payloads at entry points
//! RUST_LOG=debug cargo run
//!
//! # Only the order store
//! RUST_LOG=order_aggregator::store=debug cargo run
//! ```
//!
//! Entry points log their payload once with `debug!(?items, ...)`; everything after
//! that stays terse. An order creation at `info` looks like:
//!
//! ```text
//! INFO Actor started entity_type="Account"
//! INFO Actor started entity_type="Product"
//! INFO Order ledger started
//! INFO Order stored order_id=0192… lines=2
//! INFO create_order{account_id="0192…" items=2}: Order created order_id=0192… total=23.5 lines=2
//! ```

/// Installs the global subscriber. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
