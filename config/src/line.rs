//! Line normalization for pacman.conf style files
//!
//! Every raw line is reduced to one of three shapes: nothing worth looking
//! at, a `[section]` header, or a `Key` / `Key = value` directive. There is
//! no escaping: the first `#` always starts a comment.

/// A classified configuration line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Whitespace, a comment, or both
    Blank,
    /// `[name]`; the name may be empty, which the parser rejects
    Section(&'a str),
    /// `Key` (no value) or `Key = value`
    Directive {
        key: &'a str,
        value: Option<&'a str>,
    },
}

/// Strip surrounding whitespace and any trailing comment
pub fn normalize(raw: &str) -> &str {
    let line = raw.trim();
    match line.find('#') {
        Some(idx) => line[..idx].trim_end(),
        None => line,
    }
}

/// Normalize and classify a raw line
pub fn classify(raw: &str) -> Line<'_> {
    let line = normalize(raw);

    if line.is_empty() {
        return Line::Blank;
    }

    if let Some(name) = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        return Line::Section(name);
    }

    match line.split_once('=') {
        Some((key, value)) => Line::Directive {
            key: key.trim(),
            value: Some(value.trim()),
        },
        None => Line::Directive {
            key: line,
            value: None,
        },
    }
}
