//! Actor system wrapping the gateway's only blocking collaborator: the
//! upstream completion provider.
//!
//! The supervisor owns the request lifecycle; the provider actor owns the
//! HTTP call. Handles are cheap to clone and communicate over channels.

pub mod messages;
pub mod provider;
pub mod supervisor;
pub mod traits;

pub use provider::ProviderActorHandle;
pub use supervisor::SupervisorHandle;
pub use traits::CompletionActor;
