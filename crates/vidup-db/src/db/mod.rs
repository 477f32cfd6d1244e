//! Database repositories
//
// Video metadata (create-one, read-all)
pub mod video;
