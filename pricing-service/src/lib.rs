//! Gym membership pricing and discount engine.
//!
//! The library exposes the backend so integration tests and other binaries can
//! build the router; `main.rs` only wires it to a socket.

pub mod backend;
