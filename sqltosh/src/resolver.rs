//! Column list resolution for `select`.

use crate::catalog::{Catalog, Column, Keyword};
use crate::error::{SqlError, SqlResult};

/// The columns a `select` asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Columns(Vec<Column>),
}

impl Selection {
    pub fn columns(&self, catalog: &Catalog) -> Vec<Column> {
        match self {
            Self::All => catalog.columns().to_vec(),
            Self::Columns(columns) => columns.clone(),
        }
    }
}

/// A resolved column list plus the tokens following `from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub selection: Selection,
    pub remainder: Vec<String>,
}

impl Projection {
    /// First token after `from`.
    pub fn target_directory(&self) -> SqlResult<&str> {
        self.remainder
            .first()
            .map(String::as_str)
            .ok_or(SqlError::MissingPath)
    }
}

/// Splits `select` arguments into a column selection and the remainder.
///
/// `*` consumes itself and the following token unconditionally. Otherwise
/// tokens up to a case-insensitive `from` are column names, each allowed
/// one trailing comma. Without a `from` the whole token list is the
/// remainder, so its first token is taken as the directory.
pub fn resolve(tokens: &[String], catalog: &Catalog) -> SqlResult<Projection> {
    if tokens.first().is_some_and(|t| t == "*") {
        return Ok(Projection {
            selection: Selection::All,
            remainder: tokens.iter().skip(2).cloned().collect(),
        });
    }

    let mut columns = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        if token.eq_ignore_ascii_case(Keyword::From.as_str()) {
            tracing::debug!(columns = ?columns, "resolved column list");
            return Ok(Projection {
                selection: Selection::Columns(columns),
                remainder: tokens[i + 1..].to_vec(),
            });
        }

        let ident = token.strip_suffix(',').unwrap_or(token);
        let column = catalog
            .column(ident)
            .ok_or_else(|| SqlError::UnknownColumn(ident.to_string()))?;
        columns.push(column);
    }

    Ok(Projection {
        selection: Selection::Columns(columns),
        remainder: tokens.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_wildcard_selects_all_columns() {
        let catalog = Catalog::new();
        let projection = resolve(&tokens("* from /tmp extra"), &catalog).unwrap();
        assert_eq!(projection.selection, Selection::All);
        assert_eq!(projection.selection.columns(&catalog), Column::ALL.to_vec());
        assert_eq!(projection.remainder, tokens("/tmp extra"));
        assert_eq!(projection.target_directory().unwrap(), "/tmp");
    }

    #[test]
    fn test_wildcard_skips_second_token_whatever_it_is() {
        let projection = resolve(&tokens("* in /tmp"), &Catalog::new()).unwrap();
        assert_eq!(projection.target_directory().unwrap(), "/tmp");
    }

    #[test]
    fn test_explicit_columns_keep_order() {
        let catalog = Catalog::new();
        let projection = resolve(&tokens("owner, name,file_size FROM /var"), &catalog);
        // "name,file_size" is one token and only its trailing comma is stripped
        assert!(matches!(projection, Err(SqlError::UnknownColumn(ref c)) if c == "name,file_size"));

        let projection = resolve(&tokens("owner, name, file_size FROM /var"), &catalog).unwrap();
        assert_eq!(
            projection.selection.columns(&catalog),
            vec![Column::Owner, Column::Name, Column::FileSize]
        );
        assert_eq!(projection.target_directory().unwrap(), "/var");
    }

    #[test]
    fn test_unknown_column_reports_stripped_token() {
        let err = resolve(&tokens("name, colour, from /tmp"), &Catalog::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ERROR 1054 (42S22) at line 0: Unknown column 'colour' in 'field list'"
        );
    }

    #[test]
    fn test_columns_are_case_sensitive() {
        let err = resolve(&tokens("NAME from /tmp"), &Catalog::new()).unwrap_err();
        assert!(matches!(err, SqlError::UnknownColumn(ref c) if c == "NAME"));
    }

    #[test]
    fn test_missing_path() {
        let catalog = Catalog::new();
        for input in ["name from", "* from", "*", ""] {
            let projection = resolve(&tokens(input), &catalog).unwrap();
            assert!(
                matches!(projection.target_directory(), Err(SqlError::MissingPath)),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_without_from_first_token_is_the_directory() {
        let catalog = Catalog::new();
        let projection = resolve(&tokens("name type"), &catalog).unwrap();
        assert_eq!(
            projection.selection.columns(&catalog),
            vec![Column::Name, Column::Type]
        );
        assert_eq!(projection.target_directory().unwrap(), "name");

        let projection = resolve(&tokens("name, type"), &catalog).unwrap();
        assert_eq!(projection.target_directory().unwrap(), "name,");
    }

    #[test]
    fn test_empty_column_list() {
        let catalog = Catalog::new();
        let projection = resolve(&tokens("from /tmp"), &catalog).unwrap();
        assert!(projection.selection.columns(&catalog).is_empty());
        assert_eq!(projection.target_directory().unwrap(), "/tmp");
    }
}
