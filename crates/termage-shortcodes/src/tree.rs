//! Shortcode tree construction.
//!
//! Pairs open and close tags with a stack. A close tag matches the nearest
//! unmatched open tag of the same name; open tags left above it on the stack,
//! close tags with no partner, and open tags still pending at end of input
//! degrade to literal text with their markup preserved verbatim.

use std::collections::HashMap;

use crate::params::Parameters;
use crate::tokenizer::{RawTag, TagKind, Token, Tokenizer};

/// A node in the parsed document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    /// Literal text, including degraded markup.
    Text(&'a str),
    /// A matched or self-closing shortcode.
    Tag(Shortcode<'a>),
}

/// A matched shortcode with its parsed parameters and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Shortcode<'a> {
    name: &'a str,
    parameters: Parameters,
    children: Vec<Node<'a>>,
    self_closing: bool,
    open_markup: &'a str,
    close_markup: Option<&'a str>,
}

impl<'a> Shortcode<'a> {
    fn from_raw(tag: &RawTag<'a>, children: Vec<Node<'a>>, close: Option<&'a str>) -> Self {
        Self {
            name: tag.name,
            parameters: Parameters::parse(tag.raw_params),
            children,
            self_closing: tag.kind == TagKind::SelfClosing,
            open_markup: tag.markup,
            close_markup: close,
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn children(&self) -> &[Node<'a>] {
        &self.children
    }

    pub fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    /// The opening markup, e.g. `[color=red]`.
    pub fn open_markup(&self) -> &'a str {
        self.open_markup
    }

    /// The closing markup; `None` for self-closing tags.
    pub fn close_markup(&self) -> Option<&'a str> {
        self.close_markup
    }
}

/// Pending nodes of every open frame live in one flat list; a frame only
/// records where its children begin.
struct Builder<'a> {
    nodes: Vec<Node<'a>>,
    open: Vec<(RawTag<'a>, usize)>,
    open_counts: HashMap<&'a str, usize>,
}

impl<'a> Builder<'a> {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            open: Vec::new(),
            open_counts: HashMap::new(),
        }
    }

    fn open(&mut self, tag: RawTag<'a>) {
        *self.open_counts.entry(tag.name).or_insert(0) += 1;
        self.open.push((tag, self.nodes.len()));
    }

    fn close(&mut self, tag: RawTag<'a>) {
        let has_partner = self.open_counts.get(tag.name).is_some_and(|n| *n > 0);
        let index = has_partner
            .then(|| self.open.iter().rposition(|(open, _)| open.name == tag.name))
            .flatten();
        let Some(index) = index else {
            tracing::trace!(target: "termage.shortcodes", tag = tag.name, at = tag.start, "orphan_close_tag");
            self.nodes.push(Node::Text(tag.markup));
            return;
        };

        let (open, start) = self.open[index];
        let unclosed = self.open.split_off(index + 1);
        self.open.pop();
        self.forget(&open);
        let children = self.splice(start, unclosed);
        self.nodes
            .push(Node::Tag(Shortcode::from_raw(&open, children, Some(tag.markup))));
    }

    /// Takes the nodes from `start` on, with the markup of the `unclosed`
    /// frames put back as literal text where each frame began.
    fn splice(&mut self, start: usize, unclosed: Vec<(RawTag<'a>, usize)>) -> Vec<Node<'a>> {
        let tail = self.nodes.split_off(start);
        if unclosed.is_empty() {
            return tail;
        }

        let mut out = Vec::with_capacity(tail.len() + unclosed.len());
        let mut pending = unclosed.into_iter().peekable();
        for (offset, node) in tail.into_iter().enumerate() {
            while let Some((tag, _)) = pending.next_if(|(_, at)| *at <= start + offset) {
                self.degrade(&tag);
                out.push(Node::Text(tag.markup));
            }
            out.push(node);
        }
        for (tag, _) in pending {
            self.degrade(&tag);
            out.push(Node::Text(tag.markup));
        }
        out
    }

    fn degrade(&mut self, tag: &RawTag<'a>) {
        tracing::trace!(target: "termage.shortcodes", tag = tag.name, at = tag.start, "unmatched_open_tag");
        self.forget(tag);
    }

    fn forget(&mut self, tag: &RawTag<'a>) {
        if let Some(n) = self.open_counts.get_mut(tag.name) {
            *n = n.saturating_sub(1);
        }
    }

    fn finish(mut self) -> Vec<Node<'a>> {
        let unclosed = std::mem::take(&mut self.open);
        self.splice(0, unclosed)
    }
}

/// Parses `input` into a sequence of nodes.
///
/// Runs in time linear in the number of tokens, whatever mix of matched,
/// crossing and unclosed tags the input holds.
///
/// ```rust
/// use termage_shortcodes::{parse, Node};
///
/// let nodes = parse("a [b]x[/b] [i]y");
/// assert_eq!(nodes.len(), 5);
/// assert!(matches!(nodes[1], Node::Tag(_)));
/// assert_eq!(nodes[3], Node::Text("[i]"));
/// ```
pub fn parse(input: &str) -> Vec<Node<'_>> {
    let mut builder = Builder::new();

    for token in Tokenizer::new(input) {
        match token {
            Token::Text(text) => builder.nodes.push(Node::Text(text)),
            Token::Tag(tag) => match tag.kind {
                TagKind::Open => builder.open(tag),
                TagKind::SelfClosing => builder
                    .nodes
                    .push(Node::Tag(Shortcode::from_raw(&tag, Vec::new(), None))),
                TagKind::Close => builder.close(tag),
            },
        }
    }

    builder.finish()
}
