//! # Synapse Local Store
//!
//! On-disk storage used when no pinning credentials are configured.
//!
//! ## Example
//!
//! ```rust,ignore
//! use synapse_local::LocalFallbackStore;
//!
//! let store = LocalFallbackStore::new("uploads");
//! let path = store.store("report.csv", reader).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod store;

pub use store::LocalFallbackStore;
