//! Options system for persistent, type-safe configuration
//!
//! The options system provides:
//! - Declared options with typed defaults, partitioned into `setting` and `persist`
//! - Default fallback for missing or unparseable stored values
//! - Pluggable stores (SQLite, in-memory)

pub mod builder;
pub mod error;
pub mod registrations;
pub mod registry;
pub mod store;
pub mod types;

pub use builder::OptionDefBuilder;
pub use error::OptionError;
pub use registry::OptionsRegistry;
pub use store::{ConfigStore, MemoryStore, Options, SqliteStore};
pub use types::{Namespace, OptionDefinition, OptionType, OptionValue};
