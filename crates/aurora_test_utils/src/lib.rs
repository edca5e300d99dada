//! Test helpers shared by the Aurora crates.

pub mod env;
mod transport;

pub use self::transport::{StubResponse, StubTransport};
