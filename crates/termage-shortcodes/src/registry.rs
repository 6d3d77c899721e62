//! Handler registry mapping shortcode names to expansion functions.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::params::Parameters;
use crate::tokenizer::is_valid_tag_name;

/// What a handler sees when its shortcode is expanded.
///
/// `content` is already fully expanded: nested shortcodes have been resolved
/// before the enclosing handler runs.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    name: &'a str,
    parameters: &'a Parameters,
    content: &'a str,
    self_closing: bool,
}

impl<'a> Invocation<'a> {
    pub fn new(name: &'a str, parameters: &'a Parameters, content: &'a str) -> Self {
        Self {
            name,
            parameters,
            content,
            self_closing: false,
        }
    }

    /// Marks the invocation as coming from a self-closing tag.
    pub fn self_closing(mut self, value: bool) -> Self {
        self.self_closing = value;
        self
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn parameters(&self) -> &'a Parameters {
        self.parameters
    }

    /// Shorthand for `parameters().get(key)`.
    pub fn param(&self, key: &str) -> Option<&'a str> {
        self.parameters.get(key)
    }

    /// Shorthand for `parameters().bbcode()`.
    pub fn bbcode(&self) -> Option<&'a str> {
        self.parameters.bbcode()
    }

    pub fn content(&self) -> &'a str {
        self.content
    }

    pub fn is_self_closing(&self) -> bool {
        self.self_closing
    }
}

/// A shortcode handler.
///
/// `C` is the context passed through every expansion (for styling handlers,
/// the theme).
pub type Handler<C> = Arc<dyn Fn(&Invocation<'_>, &C) -> String + Send + Sync>;

/// Errors raised while configuring a registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The name would never be produced by the tokenizer.
    #[error("invalid shortcode name '{0}': expected a letter or '_' followed by letters, digits, '_' or '-'")]
    InvalidName(String),

    /// An alias points at a name with no registered handler.
    #[error("cannot alias '{alias}' to unregistered shortcode '{target}'")]
    UnknownTarget { alias: String, target: String },
}

/// Mapping from shortcode name to handler.
///
/// Registering a name that already exists replaces the previous handler,
/// which is how applications override the built-in tags.
pub struct HandlerRegistry<C = ()> {
    handlers: HashMap<String, Handler<C>>,
}

impl<C> HandlerRegistry<C> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers `handler` under `name`, returning the handler it replaced.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidName`] if `name` is not a valid tag name.
    pub fn register<F>(&mut self, name: &str, handler: F) -> Result<Option<Handler<C>>, RegistryError>
    where
        F: Fn(&Invocation<'_>, &C) -> String + Send + Sync + 'static,
    {
        self.register_arc(name, Arc::new(handler))
    }

    /// Registers an already shared handler.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidName`] if `name` is not a valid tag name.
    pub fn register_arc(
        &mut self,
        name: &str,
        handler: Handler<C>,
    ) -> Result<Option<Handler<C>>, RegistryError> {
        if !is_valid_tag_name(name) {
            return Err(RegistryError::InvalidName(name.to_string()));
        }
        Ok(self.handlers.insert(name.to_string(), handler))
    }

    /// Builder form of [`register`](Self::register).
    ///
    /// ```rust
    /// use termage_shortcodes::HandlerRegistry;
    ///
    /// let registry = HandlerRegistry::<()>::new()
    ///     .with("shout", |inv, _| inv.content().to_uppercase())?
    ///     .with("quiet", |inv, _| inv.content().to_lowercase())?;
    /// assert!(registry.contains("shout"));
    /// # Ok::<(), termage_shortcodes::RegistryError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidName`] if `name` is not a valid tag name.
    pub fn with<F>(mut self, name: &str, handler: F) -> Result<Self, RegistryError>
    where
        F: Fn(&Invocation<'_>, &C) -> String + Send + Sync + 'static,
    {
        self.register(name, handler)?;
        Ok(self)
    }

    /// Registers `alias` with the handler currently registered as `target`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownTarget`] if `target` has no handler, or
    /// [`RegistryError::InvalidName`] if `alias` is not a valid tag name.
    pub fn alias(&mut self, alias: &str, target: &str) -> Result<(), RegistryError> {
        let handler = self
            .handlers
            .get(target)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownTarget {
                alias: alias.to_string(),
                target: target.to_string(),
            })?;
        self.register_arc(alias, handler)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Handler<C>> {
        self.handlers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Handler<C>> {
        self.handlers.remove(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<C> Default for HandlerRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for HandlerRegistry<C> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<C> fmt::Debug for HandlerRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upper(inv: &Invocation<'_>, _: &()) -> String {
        inv.content().to_uppercase()
    }

    #[test]
    fn register_and_get() {
        let mut registry = HandlerRegistry::<()>::new();
        assert!(registry.register("up", upper).unwrap().is_none());
        let handler = registry.get("up").unwrap();
        let params = Parameters::new();
        assert_eq!(handler(&Invocation::new("up", &params, "abc"), &()), "ABC");
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = HandlerRegistry::<()>::new();
        registry.register("x", |_: &Invocation<'_>, _: &()| "first".to_string()).unwrap();
        let replaced = registry
            .register("x", |_: &Invocation<'_>, _: &()| "second".to_string())
            .unwrap();
        assert!(replaced.is_some());
        let params = Parameters::new();
        let out = registry.get("x").unwrap()(&Invocation::new("x", &params, ""), &());
        assert_eq!(out, "second");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn invalid_names_are_rejected() {
        let mut registry = HandlerRegistry::<()>::new();
        for bad in ["", "1x", "-x", "a b", "a.b", "a]"] {
            assert_eq!(
                registry.register(bad, upper).err().unwrap(),
                RegistryError::InvalidName(bad.to_string())
            );
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn alias_shares_handler() {
        let mut registry = HandlerRegistry::<()>::new();
        registry.register("bold", upper).unwrap();
        registry.alias("b", "bold").unwrap();
        assert!(Arc::ptr_eq(
            registry.get("b").unwrap(),
            registry.get("bold").unwrap()
        ));
    }

    #[test]
    fn alias_to_missing_target_fails() {
        let mut registry = HandlerRegistry::<()>::new();
        let err = registry.alias("b", "bold").unwrap_err();
        assert!(err.to_string().contains("bold"));
    }

    #[test]
    fn names_are_sorted() {
        let registry = HandlerRegistry::<()>::new()
            .with("zeta", upper)
            .unwrap()
            .with("alpha", upper)
            .unwrap();
        assert_eq!(registry.names(), vec!["alpha", "zeta"]);
        assert!(format!("{:?}", registry).contains("alpha"));
    }

    #[test]
    fn remove_handler() {
        let mut registry = HandlerRegistry::<()>::new().with("x", upper).unwrap();
        assert!(registry.remove("x").is_some());
        assert!(!registry.contains("x"));
    }
}
