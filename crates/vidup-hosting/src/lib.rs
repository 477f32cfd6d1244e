//! Media hosting client
//!
//! The upload handler talks to the hosting service only through the `MediaHost` trait.
//! `CloudinaryClient` is the production implementation; `create_media_host` builds it
//! from configuration and returns `None` when credentials are missing.

pub mod cloudinary;
pub mod factory;
pub mod traits;

pub use cloudinary::CloudinaryClient;
pub use factory::create_media_host;
pub use traits::{
    HostedAsset, HostingError, HostingResult, MediaHost, ResourceType, Transformation,
    UploadFile, UploadOptions,
};
