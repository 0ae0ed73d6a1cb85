//! Shared pieces of the updrop client: the wire format of the upload
//! endpoint, user config, platform paths, and the HTTP uploader.

pub mod config;
pub mod platform;
pub mod protocol;
pub mod upload;
