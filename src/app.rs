//! Front-end state: the sheet plus what the user has selected.
//!
//! Selection is purely a front-end concern; the sheet only ever sees
//! explicit cell ids.

use anyhow::Result;
use cellgrid_core::{CellUpdate, CellView, Sheet};
use serde::Serialize;
use std::io::Write;

use crate::command::{Command, HELP};
use crate::error::CommandError;
use crate::render::render_grid;

/// Whether the caller should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Serialize)]
struct CellReport<'a> {
    id: &'a str,
    #[serde(flatten)]
    cell: &'a CellView,
}

pub struct App {
    pub sheet: Sheet,
    /// Currently selected cell id.
    pub selected: Option<String>,
    pub json: bool,
    pub column_width: usize,
}

impl App {
    pub fn new(sheet: Sheet, column_width: usize, json: bool) -> Self {
        App {
            sheet,
            selected: None,
            json,
            column_width,
        }
    }

    /// Run one command line, writing its output to `out`.
    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        match line.parse::<Command>()? {
            Command::Set { id, raw } => {
                let updates = self.sheet.update_cell(&id, &raw)?;
                self.write_updates(&updates, out)?;
            }
            Command::Edit(raw) => {
                let id = self.selected.clone().ok_or(CommandError::NoSelection)?;
                let updates = self.sheet.update_cell(&id, &raw)?;
                self.write_updates(&updates, out)?;
            }
            Command::Get(id) => {
                let cell = self.sheet.get_cell(&id)?;
                self.write_cell(&id, &cell, out)?;
            }
            Command::Select(id) => {
                // Selecting the selected cell again toggles it off.
                if self.selected.as_deref() == Some(id.as_str()) {
                    self.selected = None;
                    writeln!(out, "Deselected {}", id)?;
                } else {
                    let cell = self.sheet.get_cell(&id)?;
                    writeln!(out, "Selected {}", id)?;
                    self.write_cell(&id, &cell, out)?;
                    self.selected = Some(id);
                }
            }
            Command::Clear => {
                self.sheet.clear_all();
                self.selected = None;
                writeln!(out, "Cleared")?;
            }
            Command::Show => {
                write!(out, "{}", render_grid(&self.sheet, self.column_width))?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn write_updates(&self, updates: &[CellUpdate], out: &mut impl Write) -> Result<()> {
        if self.json {
            writeln!(out, "{}", serde_json::to_string(updates)?)?;
        } else {
            for update in updates {
                writeln!(out, "{}", format!("{} = {}", update.id, update.value).trim_end())?;
            }
        }
        Ok(())
    }

    fn write_cell(&self, id: &str, cell: &CellView, out: &mut impl Write) -> Result<()> {
        if self.json {
            let report = CellReport { id, cell };
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
        } else {
            writeln!(out, "{}: {:?} -> {}", id, cell.raw, cell.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(app: &mut App, lines: &[&str]) -> String {
        let mut out = Vec::new();
        for line in lines {
            app.execute(line, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    fn app() -> App {
        App::new(Sheet::default(), 9, false)
    }

    #[test]
    fn test_set_prints_repaints() {
        let mut app = app();
        let out = run(&mut app, &["A1 = 3", "A2 = 4", "A3 = =A1+A2", "A1 = 10"]);
        assert_eq!(out, "A1 = 3\nA2 = 4\nA3 = 7\nA1 = 10\nA3 = 14\n");
    }

    #[test]
    fn test_get() {
        let mut app = app();
        let out = run(&mut app, &["set A1 =A1+B1", "get A1"]);
        assert_eq!(out, "A1 = ERROR\nA1: \"=A1+B1\" -> ERROR\n");
    }

    #[test]
    fn test_select_edit_and_toggle() {
        let mut app = app();
        let out = run(&mut app, &["select B2", "edit 5", "select B2"]);
        assert_eq!(out, "Selected B2\nB2: \"\" -> \nB2 = 5\nDeselected B2\n");
        assert!(app.selected.is_none());

        let mut out = Vec::new();
        let err = app.execute("edit 6", &mut out).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CommandError>(),
            Some(&CommandError::NoSelection)
        );
    }

    #[test]
    fn test_clear_drops_selection() {
        let mut app = app();
        run(&mut app, &["A1 = 3", "select A1", "clear"]);
        assert!(app.selected.is_none());
        assert_eq!(app.sheet.get_cell("A1").unwrap().raw, "");
    }

    #[test]
    fn test_invalid_id_is_error() {
        let mut app = app();
        let mut out = Vec::new();
        assert!(app.execute("K1 = 5", &mut out).is_err());
        assert!(app.execute("select A99", &mut out).is_err());
        assert!(app.selected.is_none());
    }

    #[test]
    fn test_json_output() {
        let mut app = App::new(Sheet::default(), 9, true);
        let out = run(&mut app, &["A1 = 3", "A2 = hi", "A3 = =A1+A2", "get A3"]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], r#"[{"id":"A1","value":3.0}]"#);
        assert_eq!(lines[1], r#"[{"id":"A2","value":"hi"}]"#);
        assert_eq!(lines[2], r#"[{"id":"A3","value":3.0}]"#);
        assert_eq!(lines[3], r#"{"id":"A3","raw":"=A1+A2","value":3.0}"#);
    }

    #[test]
    fn test_quit_and_blank_lines() {
        let mut app = app();
        let mut out = Vec::new();
        assert_eq!(app.execute("   ", &mut out).unwrap(), Flow::Continue);
        assert_eq!(app.execute("quit", &mut out).unwrap(), Flow::Quit);
        assert!(out.is_empty());
    }
}
