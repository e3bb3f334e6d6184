//! Field extraction from sequences of structs.
//!
//! Two families are provided:
//!
//! - [`typed`]: selector closures over Rust slices ([`pluck()`], [`pluck_filter()`],
//!   [`pluck_unique()`], [`pluck_map()`], [`pluck_group_by()`], [`pluck_ptr()`]). These are
//!   total and should be preferred.
//! - [`reflect`]: by-name extraction over [`crate::types::Value`] sequences of
//!   [`crate::types::Record`]s ([`pluck_int64()`], [`pluck_string()`], [`key_by_int64()`],
//!   ...). These treat a wrong shape, a missing field or a field of another type as a
//!   programmer error.
//!
//! ## Example
//!
//! ```rust
//! use rust_data_coercion::pluck::{pluck, pluck_string};
//! use rust_data_coercion::types::{Record, Value};
//!
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! let servers = vec![
//!     Server { host: "a".to_string(), port: 80 },
//!     Server { host: "b".to_string(), port: 443 },
//! ];
//! assert_eq!(pluck(&servers, |s| s.port), vec![80, 443]);
//!
//! let records = Value::slice(
//!     servers
//!         .iter()
//!         .map(|s| Record::new("Server").with_field("Host", s.host.as_str())),
//! );
//! assert_eq!(pluck_string(&records, "Host"), vec!["a", "b"]);
//! ```

pub mod reflect;
pub mod typed;

pub use reflect::{
    key_by, key_by_int64, key_by_uint64, pluck_as, pluck_int, pluck_int32, pluck_int64,
    pluck_string, pluck_string_slice, pluck_uint32, pluck_uint64, try_key_by, try_key_by_int64,
    try_key_by_uint64, try_pluck_as, try_pluck_int, try_pluck_int32, try_pluck_int64,
    try_pluck_string, try_pluck_string_slice, try_pluck_uint32, try_pluck_uint64, FieldValue,
};
pub use typed::{pluck, pluck_filter, pluck_group_by, pluck_map, pluck_ptr, pluck_unique};
