//! Utility types shared across the library.

pub mod secret;

pub use secret::AnonKey;
