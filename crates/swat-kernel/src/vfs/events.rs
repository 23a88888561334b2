//! Change notifications emitted by the VFS.

use tokio::sync::broadcast;

/// Default capacity for a VFS event channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// A change that has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VfsEvent {
    Written { path: String },
    Deleted { path: String },
    DirectoryChanged { cwd: String },
    Imported,
}

/// Create a sender suitable for [`Vfs::new`](super::Vfs::new).
pub fn channel() -> broadcast::Sender<VfsEvent> {
    broadcast::channel(EVENT_CHANNEL_CAPACITY).0
}
