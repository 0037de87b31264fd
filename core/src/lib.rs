// src/lib.rs

//! Farmlink: order-status aggregation and a resilient REST client for the
//! Farmlink direct-market admin and marketplace apps.
//!
//! The crate covers the two pieces of client logic that every surface shares:
//!  - Deriving one composite status for an order from the statuses of its items,
//!    plus the list-view tabs and bulk actions built on it.
//!  - Talking to the marketplace API with a per-attempt timeout, bounded retries
//!    with backoff, and failures classified as server, timeout, network or
//!    malformed-response errors.
//!  - An order service that uses both: listing orders, updating item statuses, and
//!    moving a whole order by updating each of its items concurrently.

pub mod client;
pub mod error;
pub mod models;
pub mod orders;
pub mod status;

// --- Re-exports for the Public API ---

pub use crate::status::{derive_status, CompositeStatus, HasStatus, ItemStatus, OrderTab, StatusCounts, TabCounts};

pub use crate::client::{
  ApiRequest, HttpRequest, HttpResponse, HttpTransport, Method, NoToken, RequestClient, RequestClientBuilder,
  ReqwestTransport, RetryPolicy, SessionToken, StaticToken, TokenProvider,
};

pub use crate::models::{DeliveryAddress, Order, OrderItem};

pub use crate::orders::{BatchUpdate, ItemUpdateOutcome, OrderService, OrderSummary, ReloadedUpdate};

pub use crate::error::{ClientError, ClientResult, ErrorKind, TransportError};

/*
    Typical flow:
    1. Build a `RequestClient` with `RequestClient::builder(api_url)`, injecting a
       `TokenProvider` (e.g. a `SessionToken` that the login screen fills in).
    2. Wrap it in an `OrderService` and call `list_orders()`.
    3. For display and filtering, use `order.composite_status()` and `OrderTab::matches`.
       Never trust a stored order-level status; it is always recomputed from items.
    4. For an order-level status change, call `update_order_status` (or
       `update_order_status_and_reload`) and inspect the `BatchUpdate` for items that
       did not make it. Offer "retry" only when `BatchUpdate::is_retryable()`.
*/
