// farmlink/src/orders/mod.rs

pub mod batch;
pub mod service;
pub mod summary;

pub use batch::{BatchUpdate, ItemUpdateOutcome, ReloadedUpdate};
pub use service::OrderService;
pub use summary::{orders_in_tab, OrderSummary};
