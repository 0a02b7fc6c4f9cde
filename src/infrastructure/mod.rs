//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `bus` - Typed publish/subscribe between loop components
//! - `assembly` - Reads `manifest.json` from synth output
//! - `synth` / `executor` - Command-driven builder and deploy executor
//! - `watcher` - notify-based file watcher publishing `file.changed`
//! - `relay` - NDJSON runtime events onto the bus
//! - `events/` - Event sink implementations
//! - `session` - Per-project lock

pub mod assembly;
pub mod bus;
pub mod events;
pub mod executor;
mod process;
pub mod relay;
pub mod session;
pub mod synth;
pub mod watcher;

// Re-export for convenience
pub use bus::{BusEvent, EventBus, Subscription, SubscriptionHandle, Topic};
pub use events::JsonEventSink;
pub use executor::CommandDeployExecutor;
pub use relay::RuntimeEventRelay;
pub use session::SessionLock;
pub use synth::CommandSynthesizer;
pub use watcher::{FileWatcher, WatchSettings};
