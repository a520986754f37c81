//! Request and response models for the dmart API

pub mod auth;
pub mod entry;
pub mod file;
pub mod query;
pub mod records;
pub mod request;
pub mod ticket;

pub use auth::*;
pub use entry::*;
pub use file::*;
pub use query::*;
pub use records::*;
pub use request::*;
pub use ticket::*;
