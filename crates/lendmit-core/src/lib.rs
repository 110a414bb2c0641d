//! Client-side state layer between `lendmit-api` and user interfaces.
//!
//! Turns a sequence of fallible, loosely typed API calls into consistent,
//! observable local state:
//!
//! - **[`SessionManager`]** drives signup → profile → verification code →
//!   login and owns the signed-in [`Identity`]. Other synchronizers read it
//!   through a [`SessionHandle`].
//!
//! - **[`CatalogSync`]** mirrors the member's own listings and the browsing
//!   feed. Owner listings walk a fallback chain of server queries ending at
//!   the persisted [`ResourceCache`]; new listings are inserted locally and
//!   written through.
//!
//! - **[`SubscriptionSync`]** mirrors the followee list, normalizing the
//!   server's several answer shapes, with optimistic follow/unfollow and a
//!   reconciling refresh.
//!
//! - **[`Client`]** wires all three around one gateway.
//!
//! Every synchronizer publishes a [`SyncStatus`] (loading flag, last error,
//! last info message) and its collections through `tokio::sync::watch`.

pub mod cache;
pub mod catalog;
pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod session;
pub mod status;
pub mod step;
mod store;
pub mod stream;
pub mod subscriptions;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::{FileResourceCache, MemoryResourceCache, ResourceCache, cache_key};
pub use catalog::{CatalogSync, ListingSource};
pub use client::Client;
pub use config::{CacheLocation, ClientConfig, DEFAULT_BASE_URL};
pub use error::CoreError;
pub use model::{Category, Identity, Resource};
pub use session::{ResendOutcome, SessionHandle, SessionManager, SessionState};
pub use status::SyncStatus;
pub use step::{BestEffort, FallbackExhausted};
pub use stream::EntityStream;
pub use subscriptions::{FollowOutcome, SubscriptionSync};

pub use lendmit_api::Endpoints;
