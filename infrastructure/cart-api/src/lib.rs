pub mod client;
pub mod envelope;
pub mod remote_cart;
