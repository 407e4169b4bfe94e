//! Line-oriented parser for the environment file format.
//!
//! Responsibilities:
//! - Turn `KEY=VALUE` lines into entries and write them into an `EnvStore`.
//! - Skip blank lines, whole-line `#` comments, and lines without `=`.
//! - Strip one leading and one trailing quote character from values, independently.
//!
//! Does NOT handle:
//! - Escape sequences, multi-line values, or variable expansion.
//! - Inline trailing comments, unless `ParseOptions::strip_inline_comments` is set.
//! - Choosing or opening sources (see the loader).
//!
//! Invariants:
//! - Malformed lines are never errors; only stream read failures are. A line that is
//!   not valid UTF-8 is skipped like any other malformed line.
//! - Later lines overwrite earlier ones for the same key (the store is mutated per line).
//! - Trace output carries line numbers and skip reasons only, never values.

use std::fmt;
use std::io::{BufRead, BufReader, Read};

use crate::constants::{COMMENT_MARKER, KEY_VALUE_SEPARATOR, QUOTE_CHARS};
use crate::loader::EnvError;
use crate::store::EnvStore;

/// A single key-value pair extracted from one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

/// Parser settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Treat an unquoted `#` in a value as the start of a trailing comment.
    ///
    /// Off by default: `KEY=value # note` stores `value # note`.
    pub strip_inline_comments: bool,
}

impl ParseOptions {
    pub fn with_inline_comments(mut self, strip: bool) -> Self {
        self.strip_inline_comments = strip;
        self
    }
}

/// Why a line produced no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    Blank,
    Comment,
    MissingSeparator,
    EmptyKey,
    ContainsNul,
    InvalidUtf8,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Skip::Blank => "blank",
            Skip::Comment => "comment",
            Skip::MissingSeparator => "no '=' separator",
            Skip::EmptyKey => "empty key",
            Skip::ContainsNul => "NUL byte in key or value",
            Skip::InvalidUtf8 => "not valid UTF-8",
        };
        f.write_str(reason)
    }
}

/// Parse a single line into an entry, or `None` if the line is skipped.
pub fn parse_line(line: &str, options: &ParseOptions) -> Option<Entry> {
    classify(line, options).ok()
}

fn classify(line: &str, options: &ParseOptions) -> Result<Entry, Skip> {
    let line = line.trim();
    if line.is_empty() {
        return Err(Skip::Blank);
    }
    if line.starts_with(COMMENT_MARKER) {
        return Err(Skip::Comment);
    }

    let (key, value) = line
        .split_once(KEY_VALUE_SEPARATOR)
        .ok_or(Skip::MissingSeparator)?;

    let key = key.trim();
    let mut value = value.trim();
    if options.strip_inline_comments {
        value = strip_inline_comment(value).trim_end();
    }
    let value = strip_quotes(value);

    if key.is_empty() {
        return Err(Skip::EmptyKey);
    }
    // Not representable in a process environment.
    if key.contains('\0') || value.contains('\0') {
        return Err(Skip::ContainsNul);
    }

    Ok(Entry {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Remove one leading and one trailing quote character, each independently.
fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix(QUOTE_CHARS).unwrap_or(value);
    value.strip_suffix(QUOTE_CHARS).unwrap_or(value)
}

/// Cut the value at the first `#` that is not inside a leading quoted section.
///
/// An unterminated leading quote protects the whole value.
fn strip_inline_comment(value: &str) -> &str {
    let search_from = match value.chars().next() {
        Some(quote) if QUOTE_CHARS.contains(&quote) => value[1..]
            .find(quote)
            .map(|close| close + 2)
            .unwrap_or(value.len()),
        _ => 0,
    };

    match value[search_from..].find(COMMENT_MARKER) {
        Some(offset) => &value[..search_from + offset],
        None => value,
    }
}

/// Parse in-memory text into entries, in line order.
pub fn parse_str(text: &str, options: &ParseOptions) -> Vec<Entry> {
    text.lines()
        .filter_map(|line| parse_line(line, options))
        .collect()
}

/// Parse every line of `reader` into `store`.
///
/// Returns the number of entries written.
///
/// # Errors
///
/// Returns `EnvError::Io` if the stream cannot be read. Lines that are not valid
/// UTF-8 are skipped, not reported.
/// Entries from lines read before the failure remain in the store.
pub fn parse_into<R, S>(reader: R, store: &mut S, options: &ParseOptions) -> Result<usize, EnvError>
where
    R: Read,
    S: EnvStore + ?Sized,
{
    parse_source(reader, store, options, "<stream>")
}

pub(crate) fn parse_source<R, S>(
    reader: R,
    store: &mut S,
    options: &ParseOptions,
    source_name: &str,
) -> Result<usize, EnvError>
where
    R: Read,
    S: EnvStore + ?Sized,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut line_number = 0;
    let mut applied = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| EnvError::io(source_name, e))?;
        if read == 0 {
            break;
        }
        line_number += 1;

        let raw = buf.strip_suffix(b"\n").unwrap_or(buf.as_slice());
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let outcome = std::str::from_utf8(raw)
            .map_err(|_| Skip::InvalidUtf8)
            .and_then(|line| classify(line, options));

        match outcome {
            Ok(entry) => {
                store.set(&entry.key, &entry.value);
                applied += 1;
            }
            Err(Skip::Blank | Skip::Comment) => {}
            Err(reason) => {
                tracing::trace!(source = source_name, line = line_number, %reason, "Skipping line");
            }
        }
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::io;

    fn parse(line: &str) -> Option<Entry> {
        parse_line(line, &ParseOptions::default())
    }

    fn value_of(line: &str) -> Option<String> {
        parse(line).map(|entry| entry.value)
    }

    #[test]
    fn test_simple_pair() {
        assert_eq!(
            parse("FOO=BAR"),
            Some(Entry {
                key: "FOO".to_string(),
                value: "BAR".to_string()
            })
        );
    }

    #[test]
    fn test_whitespace_around_key_and_value_is_trimmed() {
        let entry = parse("   FOO   =   BAR baz   ").unwrap();
        assert_eq!(entry.key, "FOO");
        assert_eq!(entry.value, "BAR baz");
    }

    #[test]
    fn test_splits_on_first_equals_only() {
        assert_eq!(value_of("URL=postgres://u:p@h/db?a=b").as_deref(), Some("postgres://u:p@h/db?a=b"));
        assert_eq!(value_of("EQ==").as_deref(), Some("="));
    }

    #[test]
    fn test_quotes_stripped_independently() {
        assert_eq!(value_of(r#"A="X""#).as_deref(), Some("X"));
        assert_eq!(value_of("A='X'").as_deref(), Some("X"));
        assert_eq!(value_of(r#"A="X'"#).as_deref(), Some("X"));
        assert_eq!(value_of(r#"A='X""#).as_deref(), Some("X"));
        assert_eq!(value_of(r#"A="X"#).as_deref(), Some("X"));
        assert_eq!(value_of("A=X'").as_deref(), Some("X"));
    }

    #[test]
    fn test_only_one_layer_of_quotes_is_stripped() {
        assert_eq!(value_of(r#"A=""X"""#).as_deref(), Some(r#""X""#));
        assert_eq!(value_of(r#"A="'X'""#).as_deref(), Some("'X'"));
    }

    #[test]
    fn test_whitespace_inside_quotes_is_kept() {
        assert_eq!(value_of(r#"A=" padded ""#).as_deref(), Some(" padded "));
    }

    #[test]
    fn test_lone_quote_becomes_empty_value() {
        assert_eq!(value_of(r#"A=""#).as_deref(), Some(""));
        assert_eq!(value_of(r#"A="""#).as_deref(), Some(""));
    }

    #[test]
    fn test_empty_value_is_an_entry() {
        assert_eq!(value_of("EMPTY=").as_deref(), Some(""));
    }

    #[test]
    fn test_blank_comment_and_separatorless_lines_are_skipped() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("    \t"), None);
        assert_eq!(parse("# FOO=BAR"), None);
        assert_eq!(parse("   # indented comment"), None);
        assert_eq!(parse("JUST_A_WORD"), None);
    }

    #[test]
    fn test_empty_key_is_skipped() {
        assert_eq!(parse("=value"), None);
        assert_eq!(parse("   = value"), None);
    }

    #[test]
    fn test_nul_bytes_are_skipped() {
        assert_eq!(parse("KEY=va\0lue"), None);
        assert_eq!(parse("K\0EY=value"), None);
    }

    #[test]
    fn test_inline_comment_kept_by_default() {
        assert_eq!(value_of("A=value # note").as_deref(), Some("value # note"));
    }

    #[test]
    fn test_inline_comment_stripped_when_enabled() {
        let options = ParseOptions::default().with_inline_comments(true);
        let value = |line: &str| parse_line(line, &options).map(|e| e.value);

        assert_eq!(value("A=value # note").as_deref(), Some("value"));
        assert_eq!(value("A=value#note").as_deref(), Some("value"));
        assert_eq!(value(r#"A="has # hash" # note"#).as_deref(), Some("has # hash"));
        assert_eq!(value("A='x#y'").as_deref(), Some("x#y"));
        assert_eq!(value(r#"A="unterminated # kept"#).as_deref(), Some("unterminated # kept"));
        assert_eq!(value("A=# only comment").as_deref(), Some(""));
    }

    #[test]
    fn test_parse_str_keeps_line_order() {
        let entries = parse_str("\nFOO = BAR\n# skip\nBAZ = BIZ\nFOO = LAST\n", &ParseOptions::default());
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["FOO", "BAZ", "FOO"]);
    }

    #[test]
    fn test_parse_into_later_lines_overwrite() {
        let mut store = MemoryStore::new();
        let applied = parse_into(
            "FOO=first\r\nBAR=bar\r\nFOO=second\r\n".as_bytes(),
            &mut store,
            &ParseOptions::default(),
        )
        .unwrap();

        assert_eq!(applied, 3);
        assert_eq!(store.get("FOO").as_deref(), Some("second"));
        assert_eq!(store.get("BAR").as_deref(), Some("bar"));
    }

    #[test]
    fn test_parse_into_malformed_lines_do_not_fail() {
        let mut store = MemoryStore::new();
        let applied = parse_into(
            "not a pair\n=\n  \n#c\nOK=yes".as_bytes(),
            &mut store,
            &ParseOptions::default(),
        )
        .unwrap();

        assert_eq!(applied, 1);
        assert_eq!(store.sorted(), vec![("OK", "yes")]);
    }

    #[test]
    fn test_parse_into_skips_invalid_utf8_lines() {
        let mut store = MemoryStore::new();
        let bytes: &[u8] = b"GOOD=1\nBAD=\xff\xfe\nAFTER=2\n";

        let applied = parse_into(bytes, &mut store, &ParseOptions::default()).unwrap();

        assert_eq!(applied, 2);
        assert_eq!(store.sorted(), vec![("AFTER", "2"), ("GOOD", "1")]);
    }

    #[test]
    fn test_parse_into_latin1_comment_does_not_stop_parsing() {
        let mut store = MemoryStore::new();
        let bytes: &[u8] = b"# caf\xe9 (latin-1 comment)\r\nKEY=value\r\n";

        let applied = parse_into(bytes, &mut store, &ParseOptions::default()).unwrap();

        assert_eq!(applied, 1);
        assert_eq!(store.get("KEY").as_deref(), Some("value"));
    }

    #[test]
    fn test_parse_into_last_line_without_newline() {
        let mut store = MemoryStore::new();

        parse_into("A=1\nB=2".as_bytes(), &mut store, &ParseOptions::default()).unwrap();

        assert_eq!(store.get("B").as_deref(), Some("2"));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream closed"))
        }
    }

    #[test]
    fn test_parse_into_read_error_is_io_error() {
        let mut store = MemoryStore::new();
        let err = parse_into(FailingReader, &mut store, &ParseOptions::default()).unwrap_err();

        assert!(matches!(err, EnvError::Io { .. }));
        assert_eq!(err.io_kind(), Some(io::ErrorKind::BrokenPipe));
        assert!(store.is_empty());
    }
}
