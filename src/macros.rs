//! Macros for building log metadata.
//!
//! # Examples
//!
//! ```
//! use gelf_emitter::metadata;
//!
//! let meta = metadata! {
//!     "path" => "/orders",
//!     "status" => 201,
//!     "cached" => false,
//! };
//! assert_eq!(meta.len(), 3);
//! ```

/// Build a [`Metadata`](crate::Metadata) map from `key => value` pairs.
///
/// Values go through `Into<FieldValue>`, so strings, integers, floats,
/// booleans and nested `Metadata` are accepted.
///
/// # Examples
///
/// ```
/// use gelf_emitter::{metadata, FieldValue};
///
/// let empty = metadata! {};
/// assert!(empty.is_empty());
///
/// let nested = metadata! { "client" => metadata! { "ip" => "10.0.0.7" } };
/// assert!(matches!(nested.get("client"), Some(FieldValue::Map(_))));
/// ```
#[macro_export]
macro_rules! metadata {
    () => {
        $crate::Metadata::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut meta = $crate::Metadata::new();
        $(meta.insert($key, $value);)+
        meta
    }};
}
