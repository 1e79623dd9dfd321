//! Seams to the external collaborators: the page adapter and the presenter.

pub mod page_adapter;
pub mod snapshot_sink;

pub use page_adapter::{ChangeStream, PageAdapter};
pub use snapshot_sink::{FnSink, SnapshotSink};
