pub mod order_lookup;
pub mod woocommerce;

pub use order_lookup::*;
pub use woocommerce::*;
