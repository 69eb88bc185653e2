//! Security module: API key storage

pub mod keyring;

pub use keyring::{set_api_key, get_api_key, has_api_key, delete_api_key};
