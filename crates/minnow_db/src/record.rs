//! The record contract for disk persistence.

use crate::error::DeserializeError;

/// A unit of application data that a [`DiskStore`](crate::DiskStore)
/// can persist.
///
/// Implementors choose their own textual encoding; the store treats the
/// result as opaque text keyed by [`index`](DiskRecord::index).
///
/// # Round trip
///
/// `deserialize(&r.serialize())` must reconstruct a record equal to `r`
/// in every observable field.
///
/// # Example
///
/// ```
/// use minnow_db::{DeserializeError, DiskRecord};
///
/// struct Counter {
///     id: u64,
///     value: i64,
/// }
///
/// impl DiskRecord for Counter {
///     fn index(&self) -> u64 {
///         self.id
///     }
///
///     fn serialize(&self) -> String {
///         format!("{}|{}", self.id, self.value)
///     }
///
///     fn deserialize(text: &str) -> Result<Self, DeserializeError> {
///         let (id, value) = text
///             .split_once('|')
///             .ok_or_else(|| DeserializeError::new("missing delimiter"))?;
///         Ok(Counter {
///             id: id.parse().map_err(|_| DeserializeError::new("bad id"))?,
///             value: value.parse().map_err(|_| DeserializeError::new("bad value"))?,
///         })
///     }
/// }
/// ```
pub trait DiskRecord: Sized {
    /// Returns the stable, caller-assigned identifier for this record.
    ///
    /// The index derives the file name and must be unique within a
    /// store directory.
    fn index(&self) -> u64;

    /// Encodes this record as text.
    ///
    /// The encoding must be deterministic; the store writes it to disk
    /// verbatim.
    fn serialize(&self) -> String;

    /// Reconstructs a record from its serialized text.
    fn deserialize(text: &str) -> Result<Self, DeserializeError>;
}
