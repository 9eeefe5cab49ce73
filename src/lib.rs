//! # Order Aggregator
//!
//! Order composition and history aggregation across three record-keeping services:
//! accounts, a product catalog and an order store.
//!
//! ## Core Concepts
//!
//! ### Creating an order
//! [`OrderService::create_order`](orders::OrderService::create_order) checks the
//! account, prices the requested items against one bulk catalog lookup and writes the
//! order header and its lines in a single atomic `Put`. Requested products the
//! catalog does not know are dropped from the order.
//!
//! ### Reading history back
//! The store answers with a flattened header/line join sorted by order id.
//! [`decode_rows`](orders::decode_rows) regroups it into orders, then line metadata
//! is refreshed from the live catalog. `total_price` stays the price snapshot taken
//! at creation.
//!
//! ### Deadlines
//! Every call that leaves the service takes a `tokio::time::Instant`. When it passes,
//! the call fails with `Timeout(step)` and nothing is written.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `ResourceActor<T>` the account and catalog services run on, its typed
//! `ResourceClient<T>`, and [`framework::mock`] for tests.
//!
//! ### 2. The Collaborators ([`account_actor`], [`catalog_actor`], [`clients`])
//! Entity implementations plus the Account and Catalog Lookup Clients.
//!
//! ### 3. The Store ([`store`])
//! [`OrderStore`](store::OrderStore) with an in-memory actor and a Postgres backend.
//!
//! ### 4. The Core ([`orders`])
//! [`OrderService`](orders::OrderService) and [`OrderError`](orders::OrderError).
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! [`OrderSystem`](lifecycle::OrderSystem) starts and stops everything;
//! [`OrderServiceConfig`](config::OrderServiceConfig) reads the environment.
//!
//! ## Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//!
//! # Against Postgres (tables from sql/schema.sql)
//! DATABASE_URL=postgres://localhost/orders RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! DATABASE_URL=postgres://localhost/orders cargo test -- --ignored
//! ```

pub mod account_actor;
pub mod catalog_actor;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod orders;
pub mod store;
