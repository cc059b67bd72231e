//! Shell state and statement dispatch

use crate::catalog::{Catalog, Column, Command, Statement};
use crate::error::SqlResult;
use crate::lexer::{self, Input, Query};
use crate::metadata;
use crate::render::{self, RenderSettings};
use crate::resolver;
use crate::sort::{sort_records, SortOrder};
use std::io::Write;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Where the shell writes tables and diagnostics.
pub enum Output {
    Stdout,
    Buffer(Vec<u8>),
}

impl Output {
    pub fn write(&mut self, data: &[u8]) -> std::io::Result<()> {
        match self {
            Self::Stdout => {
                let mut stdout = std::io::stdout();
                stdout.write_all(data)?;
                stdout.flush()
            }
            Self::Buffer(buf) => {
                buf.extend_from_slice(data);
                Ok(())
            }
        }
    }

    pub fn writeln(&mut self, s: &str) -> std::io::Result<()> {
        self.write(s.as_bytes())?;
        self.write(b"\n")
    }

    /// Captured text of a `Buffer`; empty for `Stdout`.
    pub fn captured(&self) -> String {
        match self {
            Self::Stdout => String::new(),
            Self::Buffer(buf) => String::from_utf8_lossy(buf).into_owned(),
        }
    }
}

/// What the caller should do after a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell {
    catalog: Catalog,
    settings: RenderSettings,
    pub output: Output,
}

impl Shell {
    pub fn new(catalog: Catalog, settings: RenderSettings) -> Self {
        Self {
            catalog,
            settings,
            output: Output::Stdout,
        }
    }

    /// A shell that captures everything it prints, without color.
    pub fn buffered() -> Self {
        let mut shell = Self::new(Catalog::new(), RenderSettings::plain());
        shell.output = Output::Buffer(Vec::new());
        shell
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Executes one statement with its terminator removed. Every error is
    /// printed as a single line; none ends the session.
    pub fn execute(&mut self, raw_line: &str) -> std::io::Result<Flow> {
        let input = match lexer::parse(raw_line) {
            Ok(input) => input,
            Err(e) => {
                tracing::debug!(error = %e, "rejected statement");
                self.output.writeln(&e.to_string())?;
                return Ok(Flow::Continue);
            }
        };

        match input {
            Input::Empty => Ok(Flow::Continue),
            Input::Command(command) => self.run_command(command),
            Input::Query(query) => {
                if let Err(e) = self.dispatch(&query) {
                    self.output.writeln(&e.to_string())?;
                }
                Ok(Flow::Continue)
            }
        }
    }

    fn run_command(&mut self, command: Command) -> std::io::Result<Flow> {
        match command {
            Command::Help => {
                let table = render::help_table(&self.catalog).render(&self.settings);
                self.output.write(b"\n")?;
                self.output.write(table.as_bytes())?;
                self.output.write(b"\n")?;
                Ok(Flow::Continue)
            }
            Command::Clear => {
                self.output.write(CLEAR_SCREEN.as_bytes())?;
                Ok(Flow::Continue)
            }
            Command::Exit => Ok(Flow::Exit),
        }
    }

    fn dispatch(&mut self, query: &Query) -> SqlResult<()> {
        tracing::debug!(statement = query.statement.as_str(), args = ?query.args, "dispatching");
        match query.statement {
            Statement::Select => self.select(&query.args),
            Statement::Insert => Self::insert(&query.args),
            Statement::Update => Self::update(&query.args),
            Statement::Delete => Self::delete(&query.args),
        }
    }

    fn select(&mut self, args: &[String]) -> SqlResult<()> {
        let projection = resolver::resolve(args, &self.catalog)?;
        let directory = projection.target_directory()?;
        let columns = projection.selection.columns(&self.catalog);

        let records = metadata::list(directory)?;
        let records = sort_records(records, Column::Name, SortOrder::Ascending);
        if records.is_empty() {
            return Ok(());
        }

        let table = render::listing_table(directory, &records, &columns);
        self.output.write(table.render(&self.settings).as_bytes())?;
        self.output.writeln(&render::summary_line(records.len()))?;
        self.output.write(b"\n")?;
        Ok(())
    }

    fn insert(args: &[String]) -> SqlResult<()> {
        tracing::debug!(?args, "insert is not implemented");
        Ok(())
    }

    fn update(args: &[String]) -> SqlResult<()> {
        tracing::debug!(?args, "update is not implemented");
        Ok(())
    }

    fn delete(args: &[String]) -> SqlResult<()> {
        tracing::debug!(?args, "delete is not implemented");
        Ok(())
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(Catalog::new(), RenderSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_creation() {
        let shell = Shell::default();
        assert_eq!(shell.catalog().columns().len(), 9);
        assert!(matches!(shell.output, Output::Stdout));
    }

    #[test]
    fn test_invalid_statement_continues() {
        let mut shell = Shell::buffered();
        assert_eq!(shell.execute("drop table x").unwrap(), Flow::Continue);
        assert_eq!(
            shell.output.captured(),
            "ERROR 1064 (42000) at line 0: You have an error in your SQL syntax; (Hint): invalid statement: drop\n"
        );
    }

    #[test]
    fn test_exit_command() {
        let mut shell = Shell::buffered();
        assert_eq!(shell.execute("exit").unwrap(), Flow::Exit);
        assert!(shell.output.captured().is_empty());
    }

    #[test]
    fn test_clear_command() {
        let mut shell = Shell::buffered();
        assert_eq!(shell.execute("clear").unwrap(), Flow::Continue);
        assert_eq!(shell.output.captured(), CLEAR_SCREEN);
    }

    #[test]
    fn test_help_command() {
        let mut shell = Shell::buffered();
        shell.execute("help").unwrap();
        let out = shell.output.captured();
        assert!(out.contains("Commands"));
        assert!(out.contains("Clears the screen"));
    }

    #[test]
    fn test_reserved_statements_are_silent() {
        let mut shell = Shell::buffered();
        for stmt in ["insert into x values (1)", "UPDATE x", "delete from /tmp"] {
            assert_eq!(shell.execute(stmt).unwrap(), Flow::Continue);
        }
        assert!(shell.output.captured().is_empty());
    }

    #[test]
    fn test_empty_statement_is_ignored() {
        let mut shell = Shell::buffered();
        assert_eq!(shell.execute("  ").unwrap(), Flow::Continue);
        assert!(shell.output.captured().is_empty());
    }
}
