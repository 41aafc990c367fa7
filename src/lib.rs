//! # CareSync - Mental-Health Support Forum Client
//!
//! The client side of the CareSync support community: a typed HTTP layer
//! over the forum backend, a reducer-driven data store that keeps blog
//! posts and forum categories consistent, and the view-models the pages
//! render from.
//!
//! ## Architecture
//!
//! - **api**: reqwest wrapper with bearer-token sessions, response
//!   classification, and cache-busting.
//! - **store**: single source of truth. Every mutation flows through one
//!   transition function, so derived counters never drift.
//! - **views**: plain display structs built from state snapshots, plus
//!   the async handlers each page wires to its controls.
//!
//! ## Examples
//!
//! ### Mounting the forum page
//!
//! ```rust,no_run
//! use caresync::api::{ApiClient, ApiConfig};
//! use caresync::store::BlogStore;
//! use caresync::views::mount_forum;
//! # async fn demo() {
//! let store = BlogStore::new(ApiClient::new(&ApiConfig::load()));
//! let page = mount_forum(&store).await;
//! for category in &page.categories {
//!     println!("{}: {} topics", category.name, category.total_topics);
//! }
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod dates;
pub mod error;
pub mod forms;
pub mod model;
pub mod store;
pub mod validation;
pub mod views;

pub use error::{CareSyncError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
