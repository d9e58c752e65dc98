//! Request parsing helpers shared by the route handlers.

pub mod params;
pub mod peer;

pub use peer::PeerAddr;
