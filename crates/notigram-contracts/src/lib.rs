//! Notigram Contracts - host-framework integration surface.
//!
//! The dispatch framework that decides *when* an entity gets notified lives in
//! the host application. This crate defines the two seams the Telegram channel
//! adapter plugs into:
//!
//! - [`Notifiable`]: how a recipient yields its per-channel delivery route
//! - [`EventDispatcher`] / [`ChannelEvent`]: lifecycle events fired around a
//!   channel send, typically forwarded into the host's event bus

pub mod events;
pub mod notifiable;

pub use events::{ChannelEvent, EventDispatcher, NullDispatcher};
pub use notifiable::{Notifiable, StaticRoute};

#[cfg(feature = "test-utils")]
pub use events::MemoryDispatcher;
