//! Background tasks owned by the runtime.

mod batch;
mod watcher;

pub use batch::UpdateBatcher;
pub(crate) use watcher::ChangeFeedWorker;
