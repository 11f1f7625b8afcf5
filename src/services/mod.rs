pub mod auth_service;
pub mod eligibility_service;
pub mod entry_service;
pub mod report_service;

#[cfg(test)]
pub(crate) mod testing;

pub use auth_service::*;
pub use eligibility_service::*;
pub use entry_service::*;
pub use report_service::*;
