//! Statement assembly and tokenizing.
//!
//! Input arrives as physical lines. [`StatementBuffer`] joins them until a
//! line ends in `;`, and [`parse`] turns the terminated text into an
//! [`Input`].

use crate::catalog::{Command, Statement};
use crate::error::{SqlError, SqlResult};

pub const TERMINATOR: char = ';';

/// One parsed statement: its verb and the tokens after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub statement: Statement,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Query(Query),
    /// Nothing but whitespace before the terminator.
    Empty,
}

/// Classifies a statement with its terminator already removed.
pub fn parse(raw_line: &str) -> SqlResult<Input> {
    let line = raw_line.trim();
    if let Some(command) = Command::parse(line) {
        return Ok(Input::Command(command));
    }

    let mut tokens = line.split_whitespace().map(String::from);
    let Some(verb) = tokens.next() else {
        return Ok(Input::Empty);
    };

    let statement = Statement::parse(&verb).ok_or(SqlError::InvalidStatement(verb))?;
    Ok(Input::Query(Query {
        statement,
        args: tokens.collect(),
    }))
}

/// Accumulates physical lines into one statement.
#[derive(Debug, Default)]
pub struct StatementBuffer {
    pending: Option<String>,
}

impl StatementBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a statement has been started but not terminated.
    pub const fn is_continuation(&self) -> bool {
        self.pending.is_some()
    }

    /// Appends a line, joining with a single space. Returns the complete
    /// statement, minus its final `;`, once the text ends with one.
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        let mut text = match self.pending.take() {
            Some(mut pending) => {
                pending.push(' ');
                pending.push_str(line);
                pending
            }
            None => line.to_string(),
        };

        let trimmed_len = text.trim_end().len();
        text.truncate(trimmed_len);

        if text.ends_with(TERMINATOR) {
            text.pop();
            Some(text)
        } else {
            self.pending = Some(text);
            None
        }
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_select() {
        let input = parse("SELECT name, type FROM /tmp").unwrap();
        assert_eq!(
            input,
            Input::Query(Query {
                statement: Statement::Select,
                args: vec!["name,".into(), "type".into(), "FROM".into(), "/tmp".into()],
            })
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("help").unwrap(), Input::Command(Command::Help));
        assert_eq!(parse(" exit ").unwrap(), Input::Command(Command::Exit));
        assert_eq!(parse("clear").unwrap(), Input::Command(Command::Clear));
    }

    #[test]
    fn test_parse_invalid_statement_keeps_case() {
        let err = parse("DROP table x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "ERROR 1064 (42000) at line 0: You have an error in your SQL syntax; (Hint): invalid statement: DROP"
        );
    }

    #[test]
    fn test_command_with_arguments_is_a_statement() {
        let err = parse("help me").unwrap_err();
        assert!(matches!(err, SqlError::InvalidStatement(ref v) if v == "help"));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse("").unwrap(), Input::Empty);
        assert_eq!(parse("   ").unwrap(), Input::Empty);
    }

    #[test]
    fn test_single_line_statement() {
        let mut buffer = StatementBuffer::new();
        assert_eq!(buffer.push_line("select * from /tmp;"), Some("select * from /tmp".into()));
        assert!(!buffer.is_continuation());
    }

    #[test]
    fn test_multi_line_statement() {
        let mut buffer = StatementBuffer::new();
        assert_eq!(buffer.push_line("select name,"), None);
        assert!(buffer.is_continuation());
        assert_eq!(buffer.push_line("type from"), None);
        assert_eq!(
            buffer.push_line("/tmp;  "),
            Some("select name, type from /tmp".into())
        );
        assert!(!buffer.is_continuation());
    }

    #[test]
    fn test_only_final_terminator_is_stripped() {
        let mut buffer = StatementBuffer::new();
        assert_eq!(buffer.push_line("select * from /tmp;;"), Some("select * from /tmp;".into()));
    }

    #[test]
    fn test_clear_discards_pending() {
        let mut buffer = StatementBuffer::new();
        buffer.push_line("select *");
        buffer.clear();
        assert_eq!(buffer.push_line("help;"), Some("help".into()));
    }
}
