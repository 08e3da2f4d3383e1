//! Host-facing wire contract and the stdio bridge that serves it.

pub mod contract;
pub mod stdio;
