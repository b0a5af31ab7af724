//! Parsing of front-end commands.
//!
//! Cell ids are upper-cased here so users may type `a1`; the sheet itself
//! only accepts the canonical form.

use std::str::FromStr;

use crate::error::CommandError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `<ID> = <raw>` or `set <ID> <raw>`
    Set { id: String, raw: String },
    Get(String),
    Select(String),
    /// Update the selected cell.
    Edit(String),
    Clear,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  <ID> = <value>     Set a cell (e.g. A1 = 5, A3 = =A1+A2)
  set <ID> <value>   Same as above
  get <ID>           Show a cell's input and value
  select <ID>        Select a cell (again to deselect)
  edit <value>       Set the selected cell
  clear              Clear every cell
  show               Print the grid
  help               Show this help
  quit               Exit";

/// Letters followed by digits, e.g. `a1` or `J20`.
fn looks_like_id(token: &str) -> bool {
    let digits = token.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    digits.len() < token.len() && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn canonical_id(token: &str) -> String {
    token.to_ascii_uppercase()
}

fn require_id(command: &'static str, rest: &str) -> Result<String, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            what: "a cell id",
        });
    }
    Ok(canonical_id(rest))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();

        if let Some((left, raw)) = line.split_once('=') {
            let left = left.trim();
            if looks_like_id(left) {
                return Ok(Command::Set {
                    id: canonical_id(left),
                    raw: raw.trim().to_string(),
                });
            }
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "set" => {
                let (id, raw) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if id.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "set",
                        what: "a cell id",
                    });
                }
                Ok(Command::Set {
                    id: canonical_id(id),
                    raw: raw.trim().to_string(),
                })
            }
            "get" => Ok(Command::Get(require_id("get", rest)?)),
            "select" => Ok(Command::Select(require_id("select", rest)?)),
            "edit" => Ok(Command::Edit(rest.to_string())),
            "clear" => Ok(Command::Clear),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(line.to_string())),
        }
    }
}
