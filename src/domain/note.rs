//! Parsing of daily markdown notes
//!
//! A note is free markdown with two optional metadata lines:
//!
//! ```text
//! mood: happy, tired
//! category: travel
//! ```
//!
//! The first mood is the primary one, the rest are secondary. Metadata lines
//! are removed before the body is scanned for words and `#tags`.

use pulldown_cmark::{Event, Parser as MdParser, Tag, TagEnd};
use regex::Regex;
use std::sync::OnceLock;

/// Regex for matching hashtags: #word, #word-with-dashes, #word_with_underscores
fn tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"#([a-zA-Z0-9_-]+)").unwrap())
}

fn metadata_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)^\s*(moods?|category)\s*:\s*(.*?)\s*$").unwrap())
}

/// Raw facts extracted from one note, before moods and tags are resolved
/// against the catalogs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedNote {
    /// Lowercased mood names in written order
    pub moods: Vec<String>,
    pub category: Option<String>,
    /// Lowercased, distinct, in order of first appearance
    pub tags: Vec<String>,
    pub word_count: usize,
}

pub struct NoteParser;

impl NoteParser {
    pub fn parse(content: &str) -> ParsedNote {
        let mut note = ParsedNote::default();
        let mut body = String::with_capacity(content.len());

        for line in content.lines() {
            match metadata_regex().captures(line) {
                Some(caps) => {
                    let value = &caps[2];
                    if caps[1].to_lowercase() == "category" {
                        if note.category.is_none() && !value.is_empty() {
                            note.category = Some(value.to_string());
                        }
                    } else if note.moods.is_empty() {
                        note.moods = value
                            .split(',')
                            .map(|m| m.trim().to_lowercase())
                            .filter(|m| !m.is_empty())
                            .collect();
                    }
                }
                None => {
                    body.push_str(line);
                    body.push('\n');
                }
            }
        }

        let text = markdown_text(&body);
        note.word_count = text.split_whitespace().count();
        for caps in tag_regex().captures_iter(&text) {
            let tag = caps[1].to_lowercase();
            if !note.tags.contains(&tag) {
                note.tags.push(tag);
            }
        }

        note
    }
}

/// Prose of a markdown document with markup, HTML and code removed
fn markdown_text(markdown: &str) -> String {
    let mut text = String::new();
    let mut in_code_block = false;

    for event in MdParser::new(markdown) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                text.push(' ');
            }
            Event::Text(t) if !in_code_block => text.push_str(&t),
            Event::Code(_) | Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::TableCell,
            ) => text.push(' '),
            _ => {}
        }
    }

    text
}
