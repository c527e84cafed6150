//! Domain types for Synapse.
//!
//! - [`StorageAddress`]: Remote content hash or `local:` file path
//! - [`ResolvedLocation`]: Local file or gateway redirect
//! - [`Credentials`]: Pinata API key/secret
//! - [`UploadResult`]: Address plus echoed filename and size

mod address;
mod credentials;
mod upload;

pub use address::*;
pub use credentials::*;
pub use upload::*;
