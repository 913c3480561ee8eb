//! Network Layer
//!
//! Backend-facing ingress and egress. Remote entities live here; the local
//! simulation in `game/` never waits on the network.

pub mod client;
pub mod protocol;
pub mod sync;

pub use client::{connect, TransportError, TransportHandle};
pub use protocol::{JoinedPayload, LocalSnapshot, MovedPayload, NetworkEvent, OutboundMessage};
pub use sync::{NetworkSyncAdapter, SyncChange, SyncError};
