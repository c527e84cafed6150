//! Pinning client for uploading Synapse files to IPFS.
//!
//! Uses Pinata's v1 `pinFileToIPFS` endpoint with API key/secret auth.

mod pinata;

pub use pinata::{PinataClient, PinataConfig};
