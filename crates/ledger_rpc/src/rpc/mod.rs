pub mod api;
pub mod client;
mod server;
mod server_impl;

pub use server::*;
pub use server_impl::*;
