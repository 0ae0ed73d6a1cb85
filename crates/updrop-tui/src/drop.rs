//! Dropped-file parsing.
//!
//! Terminals have no drag-and-drop API: dropping files onto the window makes
//! the terminal emulator type their paths as a bracketed paste. Depending on
//! the emulator the paths come shell-quoted, backslash-escaped, one per line,
//! or as `file://` URIs.

use std::path::{Path, PathBuf};

use reqwest::Url;

/// Turn pasted drop text into the list of dropped paths, in order.
pub fn parse_dropped_paths(text: &str) -> Vec<PathBuf> {
    // Some emulators paste a single path raw, spaces and all.
    let whole = text.trim();
    if !whole.is_empty() && !whole.contains('\n') && Path::new(whole).exists() {
        return vec![PathBuf::from(whole)];
    }

    // Backslash is a path separator on Windows, never an escape.
    split_words(text, !cfg!(windows))
        .into_iter()
        .filter(|w| !w.is_empty())
        .filter_map(|w| word_to_path(&w))
        .collect()
}

fn word_to_path(word: &str) -> Option<PathBuf> {
    if word.starts_with("file://") {
        return Url::parse(word).ok()?.to_file_path().ok();
    }
    Some(PathBuf::from(word))
}

/// Shell-like word splitting: whitespace separates, quotes group, and
/// (optionally) backslash escapes the next character.
fn split_words(text: &str, escapes: bool) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some('\'') => current.push(c),
            Some(_) => {
                if c == '\\' && escapes {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                } else {
                    current.push(c);
                }
            }
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    in_word = true;
                }
                '\\' if escapes => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                    in_word = true;
                }
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                _ => {
                    current.push(c);
                    in_word = true;
                }
            },
        }
    }
    if in_word {
        words.push(current);
    }
    words
}
