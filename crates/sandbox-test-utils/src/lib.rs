//! Shared test utilities for the sandbox manifest workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fragments`]: a temp directory for writing sandbox config fragments

pub mod fragments;

pub use fragments::FragmentDir;
