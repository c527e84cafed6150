//! # Synapse Gateway
//!
//! The single entry point for storing and resolving uploads.
//!
//! - With Pinata credentials, uploads are pinned to IPFS and addressed by CID.
//! - Without them, uploads land in a local directory and are addressed as
//!   `local:<path>`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use synapse_gateway::{GatewayConfig, PinningGateway};
//!
//! let gateway = PinningGateway::with_config(GatewayConfig::default(), None)?;
//! let address = gateway.store("report.csv", reader).await?;
//! let location = gateway.resolve(&address.to_string()).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod gateway;

pub use gateway::{GatewayConfig, PinningGateway};
