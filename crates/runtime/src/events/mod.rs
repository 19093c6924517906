//! Notices for the player and change events from the store.

mod bus;
mod types;

pub use bus::{NotificationBus, Notifier};
pub use types::{ChangeCause, Notice, StoreEvent};
