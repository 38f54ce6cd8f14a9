//! The parsed netrc store and credential lookup.

use crate::error::{Error, Result};
use crate::owner::check_file;
use crate::parser::parse_netrc;
use crate::paths::default_netrc_path;
use crate::quote::quote;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Credentials for one machine (or the `default` fallback).
///
/// # Security Notes
///
/// - The `Debug` implementation redacts the password to prevent
///   accidental credential leakage in logs or error messages.
/// - `PartialEq` is intentionally not implemented to prevent timing
///   attacks when comparing credentials.
#[derive(Clone)]
pub struct Machine {
    /// Login name; empty if the record never set one.
    pub login: String,
    /// Optional account name.
    pub account: Option<String>,
    /// Password. A record without a password never parses, so a stored
    /// entry always has one.
    pub password: String,
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("login", &self.login)
            .field("account", &self.account)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Contents of a netrc file: per-host credentials plus named macros.
///
/// Built once per parse and immutable afterwards; lookups and the
/// canonical [`Display`](fmt::Display) rendering are pure reads. A fresh
/// parse is required to reflect file changes.
///
/// # Examples
///
/// ```no_run
/// use netrc_rs::Netrc;
///
/// // Load ~/.netrc, verifying ownership and permissions first
/// let netrc = Netrc::load()?;
///
/// if let Some(machine) = netrc.authenticators("example.com") {
///     println!("logging in as {}", machine.login);
/// }
/// # Ok::<(), netrc_rs::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Netrc {
    /// Credentials per machine name, including the literal key
    /// `"default"` for the fallback record.
    pub hosts: HashMap<String, Machine>,
    /// Macro bodies per name, in definition order; raw lines stored
    /// verbatim with their trailing newlines.
    pub macros: IndexMap<String, Vec<String>>,
}

impl Netrc {
    /// Load `~/.netrc`.
    ///
    /// The default location carries security-sensitive checks an explicit
    /// path does not: the file must be owned by the current user and must
    /// not be accessible by group or other. The check inspects the open
    /// handle that is subsequently read, before any content is read, so
    /// the checked file and the parsed file are the same file.
    pub fn load() -> Result<Self> {
        let path = default_netrc_path().ok_or(Error::HomeNotFound)?;
        let mut file = std::fs::File::open(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(path.clone())
            } else {
                Error::ReadFile {
                    path: path.clone(),
                    source: e,
                }
            }
        })?;
        check_file(&file, &path)?;

        let mut content = String::new();
        file.read_to_string(&mut content).map_err(|e| Error::ReadFile {
            path: path.clone(),
            source: e,
        })?;
        parse_netrc(&content, &path)
    }

    /// Load a netrc file from an explicit path, skipping the ownership
    /// and permission checks.
    ///
    /// Returns [`Error::FileNotFound`] if the file doesn't exist.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        Self::read(path)
    }

    /// Parse netrc content already held in memory. Diagnostics use a
    /// placeholder file identifier.
    pub fn parse(content: &str) -> Result<Self> {
        parse_netrc(content, Path::new("<netrc>"))
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        parse_netrc(&content, path)
    }

    /// Credentials for `host`, falling back to the `default` record.
    ///
    /// Exact name match only; no partial matching, no case folding.
    /// Returns `None` when neither the host nor a `default` record
    /// exists.
    pub fn authenticators(&self, host: &str) -> Option<&Machine> {
        self.hosts.get(host).or_else(|| self.hosts.get("default"))
    }
}

/// Canonical text rendering: `machine` blocks in sorted name order, then
/// macro blocks in definition order. Lossy with respect to the original
/// formatting and comments, lossless on logical content.
impl fmt::Display for Netrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.hosts.keys().collect();
        names.sort();
        for name in names {
            let machine = &self.hosts[name];
            writeln!(f, "machine {}", name)?;
            if !machine.login.is_empty() {
                writeln!(f, "\tlogin {}", quote(&machine.login))?;
            }
            if let Some(account) = &machine.account {
                writeln!(f, "\taccount {}", quote(account))?;
            }
            writeln!(f, "\tpassword {}", quote(&machine.password))?;
            writeln!(f)?;
        }
        for (name, lines) in &self.macros {
            writeln!(f, "macdef {}", name)?;
            for line in lines {
                f.write_str(line)?;
            }
            // A body captured at end of stream may lack a final newline;
            // without one the blank-line terminator would merge into it.
            if lines.last().is_some_and(|line| !line.ends_with('\n')) {
                writeln!(f)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticators_exact_match() {
        let netrc = Netrc::parse(
            "machine example.com login alice password s3cr3t\n\
             default login guest password guest123\n",
        )
        .unwrap();

        let machine = netrc.authenticators("example.com").unwrap();
        assert_eq!(machine.login, "alice");
        assert_eq!(machine.account, None);
        assert_eq!(machine.password, "s3cr3t");
    }

    #[test]
    fn test_authenticators_default_fallback() {
        let netrc = Netrc::parse(
            "machine example.com login alice password s3cr3t\n\
             default login guest password guest123\n",
        )
        .unwrap();

        let machine = netrc.authenticators("other.org").unwrap();
        assert_eq!(machine.login, "guest");
        assert_eq!(machine.password, "guest123");
    }

    #[test]
    fn test_authenticators_no_match_no_default() {
        let netrc = Netrc::parse("machine m login a password p\n").unwrap();
        assert!(netrc.authenticators("unknown").is_none());
    }

    #[test]
    fn test_authenticators_no_case_folding() {
        let netrc = Netrc::parse("machine Example.COM login a password p\n").unwrap();
        assert!(netrc.authenticators("example.com").is_none());
        assert!(netrc.authenticators("Example.COM").is_some());
    }

    #[test]
    fn test_display_sorted_hosts() {
        let netrc = Netrc::parse(
            "machine zeta login z password zp\nmachine alpha login a password ap\n",
        )
        .unwrap();
        let rendered = netrc.to_string();
        let zeta = rendered.find("machine zeta").unwrap();
        let alpha = rendered.find("machine alpha").unwrap();
        assert!(alpha < zeta, "hosts must render in sorted order:\n{rendered}");
    }

    #[test]
    fn test_display_skips_unset_attributes() {
        let netrc = Netrc::parse("machine m password p\n").unwrap();
        let rendered = netrc.to_string();
        assert!(!rendered.contains("login"));
        assert!(!rendered.contains("account"));
        assert!(rendered.contains("\tpassword \"p\"\n"));
    }

    #[test]
    fn test_display_macros_verbatim() {
        let netrc = Netrc::parse("macdef greet\nsend hi\n\n").unwrap();
        assert!(netrc.to_string().contains("macdef greet\nsend hi\n\n"));
    }

    #[test]
    fn test_display_terminates_final_macro_line() {
        let mut netrc = Netrc::default();
        netrc.macros.insert("a".to_string(), vec!["one".to_string()]);
        netrc.macros.insert("b".to_string(), vec!["two\n".to_string()]);

        let reparsed = Netrc::parse(&netrc.to_string()).unwrap();
        assert_eq!(reparsed.macros.len(), 2);
        assert_eq!(reparsed.macros["a"], vec!["one\n"]);
        assert_eq!(reparsed.macros["b"], vec!["two\n"]);
    }

    #[test]
    fn test_debug_redacts_password() {
        let netrc = Netrc::parse("machine m login a password super-secret\n").unwrap();
        let debug_output = format!("{:?}", netrc.hosts["m"]);
        assert!(
            !debug_output.contains("super-secret"),
            "Debug output should not contain the actual password"
        );
        assert!(
            debug_output.contains("[REDACTED]"),
            "Debug output should show [REDACTED]"
        );
    }
}
