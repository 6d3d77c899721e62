//! Depth-first shortcode expansion.

use std::fmt;
use std::sync::Arc;

use crate::registry::{HandlerRegistry, Invocation};
use crate::tree::{parse, Node, Shortcode};

/// Expands shortcodes using a frozen [`HandlerRegistry`].
///
/// The registry is configured first and handed over; a processor never
/// mutates it. Cloning a processor shares the registry.
///
/// # Example
///
/// ```rust
/// use termage_shortcodes::{HandlerRegistry, Processor};
///
/// let registry = HandlerRegistry::<()>::new()
///     .with("up", |inv, _| inv.content().to_uppercase())?;
/// let processor = Processor::new(registry);
///
/// assert_eq!(processor.expand("a [up]b[/up] c", &()), "a B c");
/// assert_eq!(processor.expand("[nope]kept[/nope]", &()), "kept");
/// assert_eq!(processor.expand("[up]unclosed", &()), "[up]unclosed");
/// # Ok::<(), termage_shortcodes::RegistryError>(())
/// ```
pub struct Processor<C = ()> {
    registry: Arc<HandlerRegistry<C>>,
}

impl<C> Processor<C> {
    pub fn new(registry: HandlerRegistry<C>) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &HandlerRegistry<C> {
        &self.registry
    }

    /// Parses `input` into its node tree without expanding anything.
    pub fn parse<'a>(&self, input: &'a str) -> Vec<Node<'a>> {
        parse(input)
    }

    /// Expands every shortcode in `input`.
    ///
    /// Handlers run innermost first. Tags without a handler disappear and
    /// leave their expanded content behind. Unmatched markup is kept as-is.
    ///
    /// Unclosed tags cost nothing extra, but matched tags are expanded
    /// recursively: stack use grows with the nesting depth of matched pairs,
    /// so input nested tens of thousands of levels deep can exhaust the
    /// thread's stack. Text from untrusted sources should be depth-limited
    /// by the caller.
    pub fn expand(&self, input: &str, ctx: &C) -> String {
        if !input.contains('[') && !input.contains("]]") {
            return input.to_string();
        }

        let nodes = parse(input);
        let mut output = String::with_capacity(input.len());
        self.expand_nodes(&nodes, ctx, &mut output);
        output
    }

    fn expand_nodes(&self, nodes: &[Node<'_>], ctx: &C, output: &mut String) {
        for node in nodes {
            match node {
                Node::Text(text) => output.push_str(text),
                Node::Tag(shortcode) => output.push_str(&self.expand_tag(shortcode, ctx)),
            }
        }
    }

    fn expand_tag(&self, shortcode: &Shortcode<'_>, ctx: &C) -> String {
        let mut content = String::new();
        self.expand_nodes(shortcode.children(), ctx, &mut content);

        match self.registry.get(shortcode.name()) {
            Some(handler) => {
                let invocation = Invocation::new(shortcode.name(), shortcode.parameters(), &content)
                    .self_closing(shortcode.is_self_closing());
                handler(&invocation, ctx)
            }
            None => {
                tracing::trace!(target: "termage.shortcodes", tag = shortcode.name(), "unknown_shortcode");
                content
            }
        }
    }

    /// Removes shortcode markup. See [`crate::strip_shortcodes`].
    pub fn strip(&self, input: &str) -> String {
        crate::strip::strip_shortcodes(input)
    }
}

impl<C> Clone for Processor<C> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<C> Default for Processor<C> {
    fn default() -> Self {
        Self::new(HandlerRegistry::new())
    }
}

impl<C> fmt::Debug for Processor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor")
            .field("registry", &self.registry)
            .finish()
    }
}
