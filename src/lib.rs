//! Keeps a set of DNS records consistent across Cloudflare and deSEC and
//! performs health-based failover of a router CNAME between two targets.

pub mod api;
pub mod config;
pub mod error;
pub mod failover;
pub mod sync;

pub use error::{Error, Result};
