pub mod chat;
pub mod error;
pub mod permission;

#[cfg(test)]
pub mod test_utils;

pub use error::*;
