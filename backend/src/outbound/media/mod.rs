//! Media storage adapters.

mod fs_media_store;

pub use fs_media_store::FsMediaStore;
