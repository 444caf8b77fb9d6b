pub mod order_details;
pub mod orders;

pub use order_details as order_detail_entity;
pub use orders as order_entity;
