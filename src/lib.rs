//! Parser for `.netrc` credentials files.
//!
//! This crate reads the line-oriented, shell-token-style netrc format
//! that stores per-host login credentials and named macro blocks, and
//! exposes a lookup API returning the best-matching credentials for a
//! requested host:
//!
//! - `machine`/`default` records with `login` (or `user`), `account`,
//!   and `password` attributes, in any order
//! - double-quoted values with `\n`/`\t` escapes for passwords that
//!   contain whitespace or reserved characters
//! - `macdef` blocks whose bodies are captured verbatim, line by line,
//!   up to a blank line (the bodies are stored, never interpreted)
//! - ownership and permission checking when the implicit `~/.netrc`
//!   location is used
//!
//! # Quick Start
//!
//! ```no_run
//! use netrc_rs::Netrc;
//!
//! // Load ~/.netrc (checks file ownership and permissions)
//! let netrc = Netrc::load()?;
//!
//! // Look up credentials; unknown hosts fall back to the default record
//! if let Some(machine) = netrc.authenticators("example.com") {
//!     println!("login: {}", machine.login);
//! }
//! # Ok::<(), netrc_rs::Error>(())
//! ```
//!
//! # File format
//!
//! ```text
//! machine example.com
//!     login alice
//!     password "s3 cr3t"
//!
//! default
//!     login guest
//!     password guest123
//!
//! macdef init
//! binary
//! prompt off
//!
//! ```
//!
//! A record must carry a `password` before the next record (or end of
//! file) begins; within one record the last value per attribute wins,
//! and a later record for the same machine replaces the earlier one
//! entirely.
//!
//! # Security
//!
//! `~/.netrc` holds plaintext passwords. When loaded from its default
//! location the file must be owned by the current user and must not be
//! readable or writable by group or other, mirroring the checks in
//! ftp(1). A file supplied by explicit path is trusted as-is.

mod error;
mod lexer;
mod netrc;
mod owner;
mod parser;
mod paths;
mod quote;

// Re-export main types
pub use error::{Error, Result};
pub use netrc::{Machine, Netrc};
pub use owner::check_owner;
pub use parser::parse_netrc;
pub use paths::default_netrc_path;
pub use quote::{quote, unquote};
