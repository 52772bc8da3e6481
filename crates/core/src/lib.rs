//! bsh-core: Core library for the b2sh interactive shell
//!
//! This crate provides the pieces shared by the CLI and the store adapter:
//! - Navigation state for the virtual filesystem (`Session`)
//! - The `ObjectStore` trait abstracting the remote store
//! - The `Console` trait abstracting terminal interaction
//! - Byte-position tracking for transfer progress
//!
//! This crate is independent of any HTTP stack, allowing commands to be
//! tested against in-memory store and console implementations.

pub mod console;
pub mod error;
pub mod progress;
pub mod session;
pub mod store;
pub mod types;

pub use console::Console;
pub use error::{Error, Result};
pub use progress::{CountingReader, CountingWriter, ProgressCounter};
pub use session::Session;
pub use store::ObjectStore;
pub use types::{Bucket, EntryKind, ObjectBody, RemoteEntry, UploadTarget};
