//! The fixed vocabulary of the interpreter: columns, statements, shell
//! commands and reserved keywords.

use std::fmt;

/// A column of the directory listing schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Type,
    CreatedOn,
    LastModified,
    LastAccessed,
    FileSize,
    Permissions,
    Owner,
    Group,
}

impl Column {
    /// All columns in canonical order.
    pub const ALL: [Self; 9] = [
        Self::Name,
        Self::Type,
        Self::CreatedOn,
        Self::LastModified,
        Self::LastAccessed,
        Self::FileSize,
        Self::Permissions,
        Self::Owner,
        Self::Group,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Type => "type",
            Self::CreatedOn => "created_on",
            Self::LastModified => "last_modified",
            Self::LastAccessed => "last_accessed",
            Self::FileSize => "file_size",
            Self::Permissions => "permissions",
            Self::Owner => "owner",
            Self::Group => "group",
        }
    }

    /// Case-sensitive lookup.
    pub fn parse(ident: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == ident)
    }

    /// Table header label.
    pub fn header(self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statement verbs. Only `select` does anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    Select,
    Insert,
    Update,
    Delete,
}

impl Statement {
    pub const ALL: [Self; 4] = [Self::Select, Self::Insert, Self::Update, Self::Delete];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Case-insensitive lookup of a leading verb.
    pub fn parse(verb: &str) -> Option<Self> {
        let verb = verb.to_lowercase();
        Self::ALL.into_iter().find(|s| s.as_str() == verb)
    }
}

/// Zero-argument shell commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Clear,
}

impl Command {
    pub const ALL: [Self; 3] = [Self::Help, Self::Exit, Self::Clear];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Exit => "exit",
            Self::Clear => "clear",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Help => "Displays this help message",
            Self::Exit => "Exits the session, cleaning up any temporary data",
            Self::Clear => "Clears the screen",
        }
    }

    /// Exact, case-sensitive match.
    pub fn parse(line: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == line)
    }
}

/// Reserved clause keywords. Recognized for completion only; no statement
/// parses them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    From,
    Where,
    SortBy,
}

impl Keyword {
    pub const ALL: [Self; 3] = [Self::From, Self::Where, Self::SortBy];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::From => "from",
            Self::Where => "where",
            Self::SortBy => "sort by",
        }
    }
}

/// Interpreter vocabulary, built once at startup and handed to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    columns: Vec<Column>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            columns: Column::ALL.to_vec(),
        }
    }

    /// Columns selected by `*`, in canonical order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, ident: &str) -> Option<Column> {
        Column::parse(ident).filter(|c| self.columns.contains(c))
    }

    pub const fn commands(&self) -> &'static [Command] {
        &Command::ALL
    }

    pub const fn statements(&self) -> &'static [Statement] {
        &Statement::ALL
    }

    pub const fn keywords(&self) -> &'static [Keyword] {
        &Keyword::ALL
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_case_sensitive() {
        assert_eq!(Column::parse("file_size"), Some(Column::FileSize));
        assert_eq!(Column::parse("FILE_SIZE"), None);
        assert_eq!(Column::parse("size"), None);
    }

    #[test]
    fn canonical_column_order() {
        let names: Vec<&str> = Catalog::new().columns().iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            [
                "name",
                "type",
                "created_on",
                "last_modified",
                "last_accessed",
                "file_size",
                "permissions",
                "owner",
                "group"
            ]
        );
    }

    #[test]
    fn headers_are_uppercased() {
        assert_eq!(Column::LastModified.header(), "LAST_MODIFIED");
    }

    #[test]
    fn statements_are_case_insensitive() {
        assert_eq!(Statement::parse("SeLeCt"), Some(Statement::Select));
        assert_eq!(Statement::parse("DELETE"), Some(Statement::Delete));
        assert_eq!(Statement::parse("drop"), None);
    }

    #[test]
    fn commands_match_exactly() {
        assert_eq!(Command::parse("help"), Some(Command::Help));
        assert_eq!(Command::parse("HELP"), None);
        assert_eq!(Command::parse("help me"), None);
    }
}
