//! Shortcode markup parser and expander.
//!
//! This crate parses `[tag]content[/tag]` style markup and expands it through
//! a table of handlers. It knows nothing about terminals or styling; callers
//! register the handlers and pick the context type handlers receive.
//!
//! # Example
//!
//! ```rust
//! use termage_shortcodes::{strip_shortcodes, HandlerRegistry, Processor};
//!
//! let registry = HandlerRegistry::<()>::new()
//!     .with("b", |inv, _| format!("*{}*", inv.content()))?
//!     .with("color", |inv, _| {
//!         format!("<{}>{}</>", inv.bbcode().unwrap_or("none"), inv.content())
//!     })?;
//! let processor = Processor::new(registry);
//!
//! assert_eq!(
//!     processor.expand("[color=red][b]hi[/b][/color]", &()),
//!     "<red>*hi*</>"
//! );
//! assert_eq!(strip_shortcodes("[color=red][b]hi[/b][/color]"), "hi");
//! # Ok::<(), termage_shortcodes::RegistryError>(())
//! ```
//!
//! # Syntax
//!
//! ```text
//! [name]content[/name]          open and close
//! [name=value]content[/name]    BBCode-style unnamed value
//! [name k=v k2="a b" bare]...   named parameters and a bare value
//! [name/]                       self-closing
//! [[ and ]]                     literal brackets
//! ```
//!
//! Tag names start with an ASCII letter or `_`, followed by letters, digits,
//! `_` or `-`.
//!
//! # Error Handling
//!
//! Parsing never fails. Unmatched or malformed markup is kept as literal
//! text, and tags without a handler lose their markup but keep their
//! content. The only error is [`RegistryError`], raised while configuring a
//! registry.

mod params;
mod processor;
mod registry;
mod strip;
mod tokenizer;
mod tree;

pub use params::{parse_number, Parameters};
pub use processor::Processor;
pub use registry::{Handler, HandlerRegistry, Invocation, RegistryError};
pub use strip::strip_shortcodes;
pub use tokenizer::{escape, is_valid_tag_name, RawTag, TagKind, Token, Tokenizer};
pub use tree::{parse, Node, Shortcode};

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn valid_tag_name() -> impl Strategy<Value = String> {
        "[a-z_][a-z0-9_-]{0,10}"
    }

    // Strategy for plain text (no brackets)
    fn plain_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,!?:;'\"=/]{0,50}"
    }

    // Plain runs mixed with escapes and well-formed tags
    fn marked_up_text() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                "[a-z ]{1,5}",
                Just("[[".to_string()),
                Just("]]".to_string()),
                Just("[b]".to_string()),
                Just("[/b]".to_string()),
                Just("[i]".to_string()),
                Just("[/i]".to_string()),
            ],
            0..16,
        )
        .prop_map(|pieces| pieces.concat())
    }

    fn wrapping_processor(tags: &[&str]) -> Processor {
        let mut registry = HandlerRegistry::<()>::new();
        for tag in tags {
            registry
                .register(tag, |inv: &Invocation<'_>, _: &()| format!("<{}>", inv.content()))
                .unwrap();
        }
        Processor::new(registry)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn plain_text_is_identity(content in plain_text()) {
            let processor = wrapping_processor(&["b", "i"]);
            prop_assert_eq!(processor.expand(&content, &()), content);
        }

        #[test]
        fn strip_of_expanded_plain_text_is_idempotent(content in plain_text()) {
            let processor = wrapping_processor(&["b"]);
            let once = strip_shortcodes(&processor.expand(&content, &()));
            prop_assert_eq!(strip_shortcodes(&once), once.clone());
            prop_assert_eq!(once, content);
        }

        #[test]
        fn strip_is_idempotent(input in marked_up_text()) {
            let once = strip_shortcodes(&input);
            prop_assert_eq!(strip_shortcodes(&once), once);
        }

        #[test]
        fn strip_of_expanded_markup_is_idempotent(input in marked_up_text()) {
            let processor = wrapping_processor(&["b"]);
            let once = strip_shortcodes(&processor.expand(&input, &()));
            prop_assert_eq!(strip_shortcodes(&once), once);
        }

        #[test]
        fn strip_removes_balanced_tags(tag in valid_tag_name(), content in plain_text()) {
            let input = format!("[{}]{}[/{}]", tag, content, tag);
            prop_assert_eq!(strip_shortcodes(&input), content);
        }

        #[test]
        fn nested_tags_expand_innermost_first(
            outer in valid_tag_name(),
            inner in valid_tag_name(),
            content in plain_text()
        ) {
            let mut registry = HandlerRegistry::<()>::new();
            registry.register(&outer, |inv: &Invocation<'_>, _: &()| format!("O({})", inv.content())).unwrap();
            if inner != outer {
                registry.register(&inner, |inv: &Invocation<'_>, _: &()| format!("I({})", inv.content())).unwrap();
            }
            let processor = Processor::new(registry);
            let input = format!("[{}][{}]{}[/{}][/{}]", outer, inner, content, inner, outer);
            let expected = if inner == outer {
                format!("O(O({}))", content)
            } else {
                format!("O(I({}))", content)
            };
            prop_assert_eq!(processor.expand(&input, &()), expected);
        }

        #[test]
        fn unknown_tags_pass_content_through(tag in valid_tag_name(), content in plain_text()) {
            let processor = Processor::<()>::default();
            let input = format!("[{}]{}[/{}]", tag, content, tag);
            prop_assert_eq!(processor.expand(&input, &()), content);
        }

        #[test]
        fn tokenizer_is_total(input in "\\PC{0,60}") {
            let joined: usize = Tokenizer::new(&input)
                .map(|t| match t {
                    Token::Text(_) => 0,
                    Token::Tag(tag) => tag.end - tag.start,
                })
                .sum();
            prop_assert!(joined <= input.len());
            let _ = Processor::<()>::default().expand(&input, &());
            let once = strip_shortcodes(&input);
            prop_assert_eq!(strip_shortcodes(&once), once);
        }

        #[test]
        fn digit_start_rejected(n in 0..10u8, rest in "[a-z0-9_-]{0,5}") {
            let tag = format!("{}{}", n, rest);
            prop_assert!(!is_valid_tag_name(&tag));
        }

        #[test]
        fn valid_tag_names_accepted(tag in valid_tag_name()) {
            prop_assert!(is_valid_tag_name(&tag));
        }
    }
}
