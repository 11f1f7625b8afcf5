pub mod connection;
pub mod entry_store;

pub use connection::*;
pub use entry_store::*;
