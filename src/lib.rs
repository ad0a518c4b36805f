//! Predicta chat client library exports for testing

pub mod backend;
pub mod core;
pub mod dispatch;
pub mod speech;
pub mod tui;

#[cfg(test)]
pub mod test_support;
