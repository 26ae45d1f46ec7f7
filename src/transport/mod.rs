//! Transport layer protocols implementation
//!
//! This module contains implementations for transport layer protocols:
//! - TCP: Transmission Control Protocol

pub mod tcp;

// Re-export commonly used items
pub use tcp::{TcpFlags, TcpHeader, TcpOption, TcpSegment};
