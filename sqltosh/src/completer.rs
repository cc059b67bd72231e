use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use sqltosh::Catalog;
use std::borrow::Cow;
use std::path::Path;

pub struct SqltoshHelper {
    pub catalog: Catalog,
}

impl SqltoshHelper {
    pub const fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    fn first_words(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.catalog
            .statements()
            .iter()
            .map(|s| s.as_str())
            .chain(self.catalog.commands().iter().map(|c| c.as_str()))
    }

    fn clause_words(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.catalog
            .columns()
            .iter()
            .map(|c| c.as_str())
            .chain(self.catalog.keywords().iter().map(|k| k.as_str()))
    }
}

impl Completer for SqltoshHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];
        let (start, word) = find_word_start(line_to_cursor);

        if word.is_empty() {
            return Ok((pos, vec![]));
        }

        let is_first_word = !line_to_cursor[..start].contains(|c: char| !c.is_whitespace());

        if looks_like_path(word) {
            return Ok((start, complete_path(word)));
        }

        let lowered = word.to_lowercase();
        let candidates: Vec<&str> = if is_first_word {
            self.first_words().collect()
        } else {
            self.clause_words().collect()
        };

        let completions = candidates
            .into_iter()
            .filter(|c| c.starts_with(&lowered))
            .map(|c| Pair {
                display: c.to_string(),
                replacement: c.to_string(),
            })
            .collect();

        Ok((start, completions))
    }
}

fn looks_like_path(word: &str) -> bool {
    word.starts_with('/') || word.starts_with('.') || word.starts_with('~') || word.contains('/')
}

fn complete_path(word: &str) -> Vec<Pair> {
    let (dir_part, partial) = match word.rfind('/') {
        Some(idx) => (&word[..=idx], &word[idx + 1..]),
        None => ("", word),
    };

    let dir = expand_home(if dir_part.is_empty() { "." } else { dir_part });
    let Ok(entries) = std::fs::read_dir(&dir) else {
        return vec![];
    };

    let mut names: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(partial) {
                return None;
            }
            let is_dir = entry.file_type().is_ok_and(|ft| ft.is_dir());
            Some(if is_dir { format!("{name}/") } else { name })
        })
        .collect();
    names.sort();

    names
        .into_iter()
        .map(|name| Pair {
            replacement: format!("{dir_part}{name}"),
            display: name,
        })
        .collect()
}

fn expand_home(path: &str) -> std::path::PathBuf {
    match (path.strip_prefix('~'), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest.trim_start_matches('/')),
        _ => Path::new(path).to_path_buf(),
    }
}

fn find_word_start(line: &str) -> (usize, &str) {
    let mut start = line.len();
    for (i, c) in line.char_indices().rev() {
        if c.is_whitespace() || c == ',' || c == ';' {
            break;
        }
        start = i;
    }
    (start, &line[start..])
}

impl Hinter for SqltoshHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for SqltoshHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Borrowed(hint)
    }
}

impl Validator for SqltoshHelper {}

impl Helper for SqltoshHelper {}
