//! Polaris Router - Delegated Content-Routing Directory
//!
//! A minimal directory service for a peer-to-peer network: a peer announces
//! that it provides the content behind a routing key, and other peers ask
//! who provides it over a small HTTP contract. Announcements carry a TTL,
//! so stale providers age out of the directory.

pub mod api;
pub mod client;
pub mod config;
pub mod context;
pub mod directory;
pub mod error;
pub mod jobs;
pub mod routing_key;
pub mod server;
