pub mod result;

mod event_relay;
pub mod node;

pub mod test_utils;

pub use result::*;

pub use crate::node::*;
