use crate::tokenizer::{Token, Tokenizer};

/// Removes every well-formed tag from `input`, matched or not.
///
/// Text between tags is kept exactly as written: escaped brackets stay
/// escaped and malformed markup (invalid names, unterminated brackets) is
/// left alone. Nothing is expanded, so no handler runs.
///
/// Removing a tag can join stray brackets on either side into a new tag;
/// those are removed too, so the result never contains a tag and stripping
/// it again changes nothing.
///
/// ```rust
/// use termage_shortcodes::strip_shortcodes;
///
/// assert_eq!(strip_shortcodes("[b]Hello[/b] [i]world"), "Hello world");
/// assert_eq!(strip_shortcodes("[[b]] is bold"), "[[b]] is bold");
/// assert_eq!(strip_shortcodes("array[0]"), "array[0]");
/// ```
pub fn strip_shortcodes(input: &str) -> String {
    let mut output = match strip_once(input) {
        Some(stripped) => stripped,
        None => return input.to_string(),
    };
    while let Some(stripped) = strip_once(&output) {
        output = stripped;
    }
    output
}

/// One token pass. `None` when `input` holds no tag.
fn strip_once(input: &str) -> Option<String> {
    if !input.contains('[') {
        return None;
    }

    let mut tokens = Tokenizer::new(input);
    let mut output = String::with_capacity(input.len());
    let mut removed = false;
    let mut from = 0;
    while let Some(token) = tokens.next() {
        let to = tokens.position();
        match token {
            // the source slice, so `[[` and `]]` are kept encoded
            Token::Text(_) => output.push_str(&input[from..to]),
            Token::Tag(_) => removed = true,
        }
        from = to;
    }
    removed.then_some(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(strip_shortcodes("hello"), "hello");
        assert_eq!(strip_shortcodes(""), "");
    }

    #[test]
    fn removes_nested_tags() {
        assert_eq!(
            strip_shortcodes("[b][color=red]x[/color] y[/b]"),
            "x y"
        );
    }

    #[test]
    fn removes_unmatched_tags() {
        assert_eq!(strip_shortcodes("[b]open"), "open");
        assert_eq!(strip_shortcodes("close[/b]"), "close");
    }

    #[test]
    fn removes_self_closing_and_parameters() {
        assert_eq!(
            strip_shortcodes(r#"a[br/]b[a href="x"]c[/a]"#),
            "abc"
        );
    }

    #[test]
    fn keeps_malformed_markup() {
        assert_eq!(strip_shortcodes("[b unfinished"), "[b unfinished");
        assert_eq!(strip_shortcodes("x[]y"), "x[]y");
        assert_eq!(strip_shortcodes("[1]"), "[1]");
    }

    #[test]
    fn keeps_escapes_encoded() {
        assert_eq!(strip_shortcodes("[[x]]"), "[[x]]");
        assert_eq!(strip_shortcodes("a ]] b"), "a ]] b");
        assert_eq!(strip_shortcodes("[[b]]x[i]y"), "[[b]]xy");
    }

    #[test]
    fn stripping_twice_changes_nothing() {
        for input in ["[[b]]x", "[x[b]]", "[a[b]c[i]]", "[[[b]]]", "]][[b]][["] {
            let once = strip_shortcodes(input);
            assert_eq!(strip_shortcodes(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn tags_formed_by_removal_are_removed() {
        assert_eq!(strip_shortcodes("[x[b]]"), "");
        assert_eq!(strip_shortcodes("[y[b]z]!"), "!");
        assert_eq!(strip_shortcodes("[1[b]]"), "[1]");
    }
}
