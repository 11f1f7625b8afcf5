pub mod csv;
pub mod jwt;
pub mod password;
pub mod text;

pub use csv::*;
pub use jwt::*;
pub use password::*;
pub use text::*;
