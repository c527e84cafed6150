//! # Synapse Core
//!
//! Core types, errors, and traits shared by the Synapse storage crates:
//!
//! - **Types**: storage addresses, credentials, upload results
//! - **Errors**: one error enum covering validation, remote and disk failures
//! - **Constants**: endpoints, headers, limits
//! - **Traits**: the [`PinningBackend`] seam
//!
//! ## Example
//!
//! ```rust
//! use synapse_core::StorageAddress;
//!
//! let addr = StorageAddress::remote("QmABC");
//! assert_eq!(addr.to_string(), "QmABC");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{Result, SynapseError};
pub use traits::*;
pub use types::*;
