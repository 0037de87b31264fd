// farmlink/src/status/mod.rs

pub mod composite;
pub mod item;
pub mod tab;

pub use composite::{derive_status, CompositeStatus, HasStatus, StatusCounts};
pub use item::ItemStatus;
pub use tab::{OrderTab, TabCounts, UnknownTab};
