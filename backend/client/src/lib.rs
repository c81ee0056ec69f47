//! Naming service clients.
//!
//! `HttpNamingClient` talks to the account server; `MemoryNamingClient` keeps
//! a local registry for offline use and tests.

pub mod http;
pub mod memory;

pub use http::HttpNamingClient;
pub use memory::MemoryNamingClient;
