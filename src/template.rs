use std::{error::Error, fmt, iter::Peekable, str::CharIndices};

use regex_automata::{
    util::captures::{Captures, GroupInfo},
    PatternID,
};

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Text(String),
    // numbered as if all terms were wrapped in one group: 1 is entire match, 2 is first term group
    Group(usize),
    Named(String),
}

/// Regex mode replacement with backslash references.
///
/// `\1` and `\g<1>` are entire match, `\2`..`\99` and `\g<N>` are groups of the matching term
/// shifted by one, `\g<name>` is named group. `\n`, `\t`, `\\` and friends are unescaped, `$` has
/// no special meaning
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Template {
    pieces: Vec<Piece>,
}

#[derive(Debug, PartialEq)]
pub enum TemplateError {
    TrailingBackslash,
    BadEscape { escape: char, position: usize },
    MissingGroupStart(usize),
    MissingGroupEnd(usize),
    BadGroupName(String),
    UnknownGroup(String),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::TrailingBackslash => write!(f, "dangling '\\' at the end"),
            TemplateError::BadEscape { escape, position } => {
                write!(f, "bad escape '\\{escape}' at position {position}")
            }
            TemplateError::MissingGroupStart(position) => {
                write!(f, "expected '<' after '\\g' at position {position}")
            }
            TemplateError::MissingGroupEnd(position) => {
                write!(f, "unterminated group reference at position {position}")
            }
            TemplateError::BadGroupName(name) => write!(f, "bad group name {name:?}"),
            TemplateError::UnknownGroup(group) => write!(f, "invalid group reference {group}"),
        }
    }
}

impl Error for TemplateError {}

fn is_group_name(name: &str) -> bool {
    let mut chars = name.chars();

    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn parse_group_reference(
    chars: &mut Peekable<CharIndices<'_>>,
    position: usize,
) -> Result<Piece, TemplateError> {
    if chars.next_if(|&(_, c)| c == '<').is_none() {
        return Err(TemplateError::MissingGroupStart(position));
    }

    let mut name = String::new();
    loop {
        match chars.next() {
            Some((_, '>')) => break,
            Some((_, c)) => name.push(c),
            None => return Err(TemplateError::MissingGroupEnd(position)),
        }
    }

    if !name.is_empty() && name.chars().all(|c| c.is_ascii_digit()) {
        let index = name
            .parse()
            .map_err(|_| TemplateError::UnknownGroup(name.clone()))?;

        Ok(Piece::Group(index))
    } else if is_group_name(&name) {
        Ok(Piece::Named(name))
    } else {
        Err(TemplateError::BadGroupName(name))
    }
}

impl Template {
    pub(crate) fn parse(template: &str) -> Result<Self, TemplateError> {
        let mut pieces = Vec::new();
        let mut text = String::new();
        let mut chars = template.char_indices().peekable();

        while let Some((position, c)) = chars.next() {
            if c != '\\' {
                text.push(c);
                continue;
            }

            let Some((_, escape)) = chars.next() else {
                return Err(TemplateError::TrailingBackslash);
            };

            let group = match escape {
                'g' => parse_group_reference(&mut chars, position)?,
                '1'..='9' => {
                    let mut index = escape as usize - '0' as usize;
                    if let Some((_, digit)) = chars.next_if(|(_, c)| c.is_ascii_digit()) {
                        index = index * 10 + (digit as usize - '0' as usize);
                    }

                    Piece::Group(index)
                }
                _ => {
                    match escape {
                        '0' => text.push('\0'),
                        'n' => text.push('\n'),
                        't' => text.push('\t'),
                        'r' => text.push('\r'),
                        'a' => text.push('\x07'),
                        'b' => text.push('\x08'),
                        'f' => text.push('\x0c'),
                        'v' => text.push('\x0b'),
                        '\\' => text.push('\\'),
                        escape if escape.is_ascii_alphabetic() => {
                            return Err(TemplateError::BadEscape { escape, position })
                        }
                        escape => {
                            text.push('\\');
                            text.push(escape);
                        }
                    }
                    continue;
                }
            };

            if !text.is_empty() {
                pieces.push(Piece::Text(std::mem::take(&mut text)));
            }
            pieces.push(group);
        }

        if !text.is_empty() {
            pieces.push(Piece::Text(text));
        }

        Ok(Self { pieces })
    }

    /// Makes sure every reference points to a group that exists in at least one term
    pub(crate) fn check(&self, group_info: &GroupInfo) -> Result<(), TemplateError> {
        let patterns = || (0..group_info.pattern_len()).map(PatternID::must);

        for piece in &self.pieces {
            let missing = match piece {
                Piece::Text(_) => None,
                Piece::Group(index) => (*index > 1
                    && !patterns().any(|pid| group_info.group_len(pid) > index - 1))
                .then(|| index.to_string()),
                Piece::Named(name) => (!patterns()
                    .any(|pid| group_info.to_index(pid, name).is_some()))
                .then(|| name.clone()),
            };

            if let Some(group) = missing {
                return Err(TemplateError::UnknownGroup(group));
            }
        }

        Ok(())
    }

    /// Appends template with groups of current match to `dst`. Groups that did not participate
    /// in the match are empty
    pub(crate) fn expand(&self, captures: &Captures, input: &str, dst: &mut String) {
        for piece in &self.pieces {
            let span = match piece {
                Piece::Text(text) => {
                    dst.push_str(text);
                    continue;
                }
                Piece::Group(index) => captures.get_group(index.saturating_sub(1)),
                Piece::Named(name) => captures.get_group_by_name(name),
            };

            if let Some(span) = span {
                dst.push_str(&input[span.start..span.end]);
            }
        }
    }
}
