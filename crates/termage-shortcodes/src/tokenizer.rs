//! Tokenizer for bracketed shortcode markup.
//!
//! The tokenizer only finds tag boundaries. It never pairs open and close
//! tags; that is the job of [`crate::tree`].

/// Kind of a raw tag boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `[name ...]`
    Open,
    /// `[/name]`
    Close,
    /// `[name .../]`
    SelfClosing,
}

/// A tag boundary as it appears in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTag<'a> {
    /// Byte offset of the opening `[`.
    pub start: usize,
    /// Byte offset one past the closing `]`.
    pub end: usize,
    /// Tag name.
    pub name: &'a str,
    /// Everything after the name, up to (not including) `]` or a trailing `/`.
    pub raw_params: &'a str,
    /// Open, close or self-closing.
    pub kind: TagKind,
    /// The full markup, brackets included.
    pub markup: &'a str,
}

/// Token types produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal text. Escaped brackets and malformed markup also end up here.
    Text(&'a str),
    /// A well-formed tag boundary.
    Tag(RawTag<'a>),
}

/// Result of looking for the `]` that terminates a tag.
enum Terminator {
    Found(usize),
    Interrupted(usize),
    Missing,
}

/// Tokenizer for shortcode markup.
///
/// Never fails: every byte of the input ends up in exactly one token.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Handles the `[` at the current position.
    fn bracket(&mut self) -> Token<'a> {
        let start = self.pos;
        let bytes = self.input.as_bytes();

        // `[[` is an escaped literal bracket
        if bytes.get(start + 1) == Some(&b'[') {
            self.pos = start + 2;
            return Token::Text(&self.input[start..start + 1]);
        }

        match self.find_terminator(start + 1) {
            Terminator::Found(close) => {
                self.pos = close + 1;
                let markup = &self.input[start..=close];
                match classify(start, markup) {
                    Some(tag) => Token::Tag(tag),
                    None => Token::Text(markup),
                }
            }
            Terminator::Interrupted(next) => {
                self.pos = next;
                Token::Text(&self.input[start..next])
            }
            Terminator::Missing => {
                self.pos = self.input.len();
                Token::Text(&self.input[start..])
            }
        }
    }

    /// Finds the `]` closing a tag whose body starts at `from`.
    ///
    /// Quoted parameter values may contain brackets. A quote only opens after
    /// `=` or whitespace, so apostrophes inside words stay ordinary characters.
    /// If a quote is never closed the scan is retried without quote handling.
    fn find_terminator(&self, from: usize) -> Terminator {
        let bytes = self.input.as_bytes();
        let mut quote: Option<u8> = None;
        let mut prev = b'[';

        for (i, &c) in bytes.iter().enumerate().skip(from) {
            if let Some(q) = quote {
                if c == q {
                    quote = None;
                }
                prev = c;
                continue;
            }
            match c {
                b']' => return Terminator::Found(i),
                b'[' => return Terminator::Interrupted(i),
                b'"' | b'\'' if prev == b'=' || prev.is_ascii_whitespace() => quote = Some(c),
                _ => {}
            }
            prev = c;
        }

        if quote.is_none() {
            return Terminator::Missing;
        }

        for (i, &c) in bytes.iter().enumerate().skip(from) {
            match c {
                b']' => return Terminator::Found(i),
                b'[' => return Terminator::Interrupted(i),
                _ => {}
            }
        }
        Terminator::Missing
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        if start >= bytes.len() {
            return None;
        }

        let mut i = start;
        while i < bytes.len() {
            match bytes[i] {
                b'[' => {
                    if i > start {
                        self.pos = i;
                        return Some(Token::Text(&self.input[start..i]));
                    }
                    return Some(self.bracket());
                }
                b']' if bytes.get(i + 1) == Some(&b']') => {
                    if i > start {
                        self.pos = i;
                        return Some(Token::Text(&self.input[start..i]));
                    }
                    self.pos = i + 2;
                    return Some(Token::Text(&self.input[i..i + 1]));
                }
                _ => i += 1,
            }
        }

        self.pos = bytes.len();
        Some(Token::Text(&self.input[start..]))
    }
}

/// Doubles every bracket in `text` so it expands back to itself.
///
/// ```rust
/// use termage_shortcodes::{escape, Processor};
///
/// let url = "https://example.com/?q=[b]";
/// assert_eq!(escape(url), "https://example.com/?q=[[b]]");
/// assert_eq!(Processor::<()>::default().expand(&escape(url), &()), url);
/// ```
pub fn escape(text: &str) -> String {
    if !text.contains(|c: char| c == '[' || c == ']') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if c == '[' || c == ']' {
            out.push(c);
        }
        out.push(c);
    }
    out
}

/// Checks if a string is a valid shortcode name.
///
/// Names start with an ASCII letter or underscore, followed by letters,
/// digits, underscores or hyphens.
pub fn is_valid_tag_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(is_name_char)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Classifies bracketed markup (`[` .. `]` inclusive) as a tag, if well-formed.
fn classify(start: usize, markup: &str) -> Option<RawTag<'_>> {
    let inner = &markup[1..markup.len() - 1];
    let end = start + markup.len();

    if let Some(rest) = inner.strip_prefix('/') {
        let name = rest.trim_end();
        return is_valid_tag_name(name).then_some(RawTag {
            start,
            end,
            name,
            raw_params: "",
            kind: TagKind::Close,
            markup,
        });
    }

    let (body, kind) = match inner.trim_end().strip_suffix('/') {
        Some(body) => (body, TagKind::SelfClosing),
        None => (inner, TagKind::Open),
    };

    let name_end = body.find(|c: char| !is_name_char(c)).unwrap_or(body.len());
    let (name, raw_params) = body.split_at(name_end);
    if !is_valid_tag_name(name) {
        return None;
    }
    match raw_params.chars().next() {
        None | Some('=') => {}
        Some(c) if c.is_whitespace() => {}
        Some(_) => return None,
    }

    Some(RawTag {
        start,
        end,
        name,
        raw_params,
        kind,
        markup,
    })
}
