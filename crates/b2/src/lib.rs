//! bsh-b2: Native B2 API adapter for b2sh
//!
//! This crate provides the implementation of the ObjectStore trait against
//! the B2 v2 REST API. It is the only crate that talks HTTP.

pub mod client;
mod types;

pub use client::B2Client;
