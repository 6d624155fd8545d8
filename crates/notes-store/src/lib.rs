//! notes-store: PostgreSQL storage layer for the notes service.
//!
//! Three concerns live here, behind one [`Store`] handle:
//!
//! - **Credential store** — user rows with unique usernames and password
//!   hashes (the hashing itself happens in the server crate)
//! - **Note store** — note documents with a single, immutable owner
//! - **Sharing ledger** — the (note, user) visibility relation that decides
//!   which notes a user may list and search
//!
//! Schema migrations are embedded in the binary and applied on connect; see
//! [`schema`].

pub mod error;
pub mod models;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use models::{NewNote, NewNoteAccess, NewUser, NoteAccessRow, NoteRow, UserRow};
pub use store::{Store, StoreConfig};
