//! Entry parser for the netrc grammar.
//!
//! Consumes the token stream, grouping tokens into top-level records
//! (`machine`, `default`, `macdef`) and their attribute followers
//! (`login`/`user`, `account`, `password`). A record is committed only
//! once a `password` has been seen; the token that terminates it is
//! pushed back so the top-level loop can process it.

use crate::error::{Error, Result};
use crate::lexer::{LexError, Lexer, Token};
use crate::netrc::{Machine, Netrc};
use crate::quote::unquote;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::Path;

/// Parse netrc content into a [`Netrc`] store.
///
/// `path` is used only for diagnostics; any grammar violation aborts the
/// parse with [`Error::Parse`] carrying the path and a 1-based line
/// number.
pub fn parse_netrc(content: &str, path: &Path) -> Result<Netrc> {
    Parser {
        lexer: Lexer::new(content),
        path,
    }
    .parse()
}

struct Parser<'a> {
    lexer: Lexer,
    path: &'a Path,
}

impl Parser<'_> {
    fn parse(mut self) -> Result<Netrc> {
        let mut hosts = HashMap::new();
        let mut macros = IndexMap::new();

        loop {
            let toplevel = match self.next_token()? {
                None => break,
                // Comments are no-ops between records.
                Some(token) if token.is_comment() => continue,
                Some(token) => token,
            };

            match toplevel.text() {
                "machine" => {
                    let name = self.read_name()?;
                    let entry = self.read_entry("machine", &name)?;
                    hosts.insert(name, entry);
                }
                "default" => {
                    let entry = self.read_entry("default", "default")?;
                    hosts.insert("default".to_string(), entry);
                }
                "macdef" => {
                    let name = self.read_name()?;
                    macros.insert(name, self.read_macro_body());
                }
                other => {
                    return Err(self.parse_error(format!("bad toplevel token {:?}", other)));
                }
            }
        }

        Ok(Netrc { hosts, macros })
    }

    /// Attribute followers for one `machine`/`default` record. `toplevel`
    /// names the record kind for diagnostics.
    fn read_entry(&mut self, toplevel: &str, name: &str) -> Result<Machine> {
        let mut login = String::new();
        let mut account: Option<String> = None;
        let mut password: Option<String> = None;

        loop {
            match self.next_token()? {
                None => {
                    return self.close_entry(toplevel, name, None, login, account, password);
                }
                Some(t)
                    if t.is_comment()
                        || matches!(t.text(), "machine" | "default" | "macdef") =>
                {
                    return self.close_entry(toplevel, name, Some(t), login, account, password);
                }
                // Repeated attributes within one record: last value wins. A
                // bare keyword at end of stream sets nothing; the entry
                // closes as if the stream had ended at the keyword.
                Some(t) => {
                    let value = match t.text() {
                        "login" | "user" | "account" | "password" => self.read_value()?,
                        other => {
                            return Err(
                                self.parse_error(format!("bad follower token {:?}", other))
                            );
                        }
                    };
                    let Some(value) = value else {
                        return self.close_entry(toplevel, name, None, login, account, password);
                    };
                    match t.text() {
                        "login" | "user" => login = value,
                        "account" => account = Some(value),
                        _ => password = Some(value),
                    }
                }
            }
        }
    }

    /// Commit the entry if a password was seen, pushing the terminating
    /// token back for the top-level loop; fail otherwise.
    fn close_entry(
        &mut self,
        toplevel: &str,
        name: &str,
        terminator: Option<Token>,
        login: String,
        account: Option<String>,
        password: Option<String>,
    ) -> Result<Machine> {
        match password {
            Some(password) => {
                if let Some(t) = terminator {
                    self.lexer.push_token(t);
                }
                Ok(Machine {
                    login,
                    account,
                    password,
                })
            }
            None => Err(self.parse_error(format!(
                "malformed {} entry {} terminated by {}",
                toplevel,
                name,
                describe(terminator.as_ref()),
            ))),
        }
    }

    /// Raw text of the next non-comment token, or empty at end of stream.
    /// Machine and macro names are not unquoted.
    fn read_name(&mut self) -> Result<String> {
        loop {
            match self.next_token()? {
                None => return Ok(String::new()),
                Some(token) if token.is_comment() => continue,
                Some(token) => return Ok(token.text().to_string()),
            }
        }
    }

    /// Decoded value of the next non-comment token, or `None` at end of
    /// stream. An explicit quoted empty token decodes to `Some("")` and
    /// is distinct from a missing value.
    fn read_value(&mut self) -> Result<Option<String>> {
        loop {
            match self.next_token()? {
                None => return Ok(None),
                Some(token) if token.is_comment() => continue,
                Some(token) => return Ok(Some(unquote(token.text()))),
            }
        }
    }

    /// Verbatim macro body: raw lines up to a blank line or end of
    /// stream. The blank-line terminator is not stored.
    fn read_macro_body(&mut self) -> Vec<String> {
        self.lexer.begin_verbatim();
        let mut lines = Vec::new();
        while let Some(line) = self.lexer.read_verbatim_line() {
            if line == "\n" {
                break;
            }
            lines.push(line);
        }
        self.lexer.end_verbatim();
        lines
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        self.lexer.next_token().map_err(|e| self.lex_error(e))
    }

    fn parse_error(&self, message: String) -> Error {
        Error::Parse {
            path: self.path.to_path_buf(),
            line: self.lexer.line(),
            message,
        }
    }

    fn lex_error(&self, err: LexError) -> Error {
        Error::Parse {
            path: self.path.to_path_buf(),
            line: err.line,
            message: err.message,
        }
    }
}

/// Render a terminating token for a malformed-entry message; end of
/// stream reads as an empty token.
fn describe(token: Option<&Token>) -> String {
    match token {
        None => "\"\"".to_string(),
        Some(t) => format!("{:?}", t.text()),
    }
}
