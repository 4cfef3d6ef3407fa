//! Filesystem primitives for the app sandbox manifest fixer
//!
//! Provides path-tagged text reads, atomic writes with a restrictive
//! creation mode, and Makefile-style depfile output.

pub mod depfile;
pub mod error;
pub mod io;

pub use error::{Error, Result};
pub use io::{MANIFEST_FILE_MODE, WriteOptions};
