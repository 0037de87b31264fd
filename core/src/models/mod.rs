// farmlink/src/models/mod.rs

//! Wire records returned by the marketplace API.

pub mod address;
pub mod order;
pub mod order_item;
pub mod timestamp;

pub use address::{DeliveryAddress, StructuredAddress};
pub use order::{Order, OrderEnvelope, OrdersEnvelope, StatusUpdate};
pub use order_item::OrderItem;
