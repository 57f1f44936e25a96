//! # glossa-core
//!
//! Resource tables, key-path resolution, interpolation, configuration, and
//! error handling for Glossa.

pub mod catalog;
pub mod config;
pub mod coverage;
pub mod error;
pub mod interpolate;
pub mod key;
pub mod loader;
pub mod markup;
pub mod node;
pub mod plural;
pub mod resolve;
pub mod table;
pub mod translator;

pub use catalog::Catalog;
pub use error::GlossaError;
pub use interpolate::interpolate;
pub use key::{KeyPath, LookupKey};
pub use node::Node;
pub use resolve::Resolved;
pub use table::ResourceTable;
pub use translator::Translator;
