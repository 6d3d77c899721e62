use termage_shortcodes::{
    parse, strip_shortcodes, HandlerRegistry, Invocation, Node, Processor, RegistryError,
};

/// Context standing in for a theme: a tiny palette lookup.
struct Palette(Vec<(&'static str, &'static str)>);

impl Palette {
    fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.0
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| *v)
            .unwrap_or(name)
    }
}

fn processor() -> Result<Processor<Palette>, RegistryError> {
    let mut registry = HandlerRegistry::<Palette>::new()
        .with("bold", |inv: &Invocation<'_>, _: &Palette| {
            format!("\x1b[1m{}\x1b[22m", inv.content())
        })?
        .with("color", |inv: &Invocation<'_>, palette: &Palette| {
            match inv.bbcode() {
                Some(name) => format!("{{{}}}{}{{/}}", palette.resolve(name), inv.content()),
                None => inv.content().to_string(),
            }
        })?
        .with("pl", |inv: &Invocation<'_>, _: &Palette| {
            let n = inv.parameters().bbcode_number().unwrap_or(0.0) as usize;
            format!("{}{}", " ".repeat(n), inv.content())
        })?;
    registry.alias("b", "bold")?;
    Ok(Processor::new(registry))
}

fn palette() -> Palette {
    Palette(vec![("primary", "blue"), ("danger", "red")])
}

#[test]
fn test_nested_styles_compose() {
    let processor = processor().unwrap();
    let output = processor.expand("[color=primary][b]Stay RAD![/b][/color]", &palette());
    assert_eq!(output, "{blue}\x1b[1mStay RAD!\x1b[22m{/}");
}

#[test]
fn test_color_falls_back_to_literal_value() {
    let processor = processor().unwrap();
    assert_eq!(
        processor.expand("[color=green]ok[/color]", &palette()),
        "{green}ok{/}"
    );
    assert_eq!(processor.expand("[color]ok[/color]", &palette()), "ok");
}

#[test]
fn test_padding_shorthand() {
    let processor = processor().unwrap();
    assert_eq!(processor.expand("[pl=2]x[/pl]", &palette()), "  x");
    assert_eq!(processor.expand("[pl=abc]x[/pl]", &palette()), "x");
}

#[test]
fn test_mixed_document() {
    let processor = processor().unwrap();
    let input = "Use [[b]] for [b]bold[/b], array[0] stays, [b]unclosed";
    assert_eq!(
        processor.expand(input, &palette()),
        "Use [b] for \x1b[1mbold\x1b[22m, array[0] stays, [b]unclosed"
    );
    assert_eq!(
        strip_shortcodes(input),
        "Use [[b]] for bold, array[0] stays, unclosed"
    );
}

#[test]
fn test_crossing_tags_leave_brackets() {
    let processor = processor().unwrap();
    let output = processor.expand("[b][color=red]x[/b][/color]", &palette());
    assert_eq!(output, "\x1b[1m[color=red]x\x1b[22m[/color]");
}

#[test]
fn test_parse_exposes_tree() {
    let nodes = parse("a [color=red k=v]b[/color]");
    assert_eq!(nodes.len(), 2);
    let Node::Tag(tag) = &nodes[1] else {
        panic!("expected a tag");
    };
    assert_eq!(tag.name(), "color");
    assert_eq!(tag.parameters().bbcode(), Some("red"));
    assert_eq!(tag.parameters().get("k"), Some("v"));
    assert_eq!(tag.children(), &[Node::Text("b")]);
}

#[test]
fn test_registry_rejects_invalid_name() {
    let err = HandlerRegistry::<Palette>::new()
        .with("9lives", |inv: &Invocation<'_>, _: &Palette| inv.content().to_string())
        .unwrap_err();
    assert_eq!(err, RegistryError::InvalidName("9lives".to_string()));
}
