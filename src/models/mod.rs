pub mod auth;
pub mod common;
pub mod entry;
pub mod order;
pub mod pagination;

pub use auth::*;
pub use common::*;
pub use entry::*;
pub use order::*;
pub use pagination::*;
