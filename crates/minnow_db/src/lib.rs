//! # minnow_db
//!
//! Flat-file record persistence for minnow applications.
//!
//! This crate provides:
//! - [`DiskRecord`] - the contract a type must satisfy to be persisted
//! - [`DiskStore`] - one-file-per-record storage with a serialized
//!   background writer, so callers never block on disk I/O
//! - [`ActionQueue`] - the owned worker thread + FIFO channel that
//!   linearizes every mutation for a store
//!
//! Records are opaque to the store: it writes whatever
//! [`DiskRecord::serialize`] produces and hands the file text back to
//! [`DiskRecord::deserialize`] at startup. The store never interprets
//! record contents.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod queue;
mod record;
mod store;

pub use error::{DbError, DbResult, DeserializeError};
pub use queue::ActionQueue;
pub use record::DiskRecord;
pub use store::{DiskStore, StoreConfig, RECORD_FILE_SUFFIX};
