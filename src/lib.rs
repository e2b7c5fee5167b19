//! Dunesand - a turn-based desert text adventure.
//!
//! The library holds the whole engine; the binary only reads lines,
//! feeds them to a [`core::Session`] and prints the responses.

pub mod build_info;
pub mod character;
pub mod combat;
pub mod core;
pub mod items;
pub mod world;
