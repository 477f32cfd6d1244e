//! Metadata store for uploaded videos
//!
//! Exposes the `VideoStore` trait that the HTTP layer depends on and its Postgres
//! implementation, `VideoRepository`.

pub mod db;

pub use db::video::{VideoRepository, VideoStore};
