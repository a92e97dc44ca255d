//! Bot-verification challenge handling
//!
//! - [`host`]: the port the embedding environment implements (script
//!   loading, container lookup, widget render/reset) plus the opaque types
//!   crossing that seam.
//! - [`coordinator`]: the lifecycle logic that loads the provider script
//!   at most once and keeps at most one live widget per page load.

pub mod coordinator;
pub mod host;

pub use coordinator::{ChallengeCoordinator, RenderOutcome};
pub use host::{ChallengeHost, ContainerId, Theme, WidgetCallbacks, WidgetHandle};
