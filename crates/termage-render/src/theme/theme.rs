//! Theme variables addressed by dotted path.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

/// Error type for theme loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// YAML parse error.
    #[error("failed to parse theme{}: {message}", location(.path))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    /// File could not be read.
    #[error("failed to read theme {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document root is not a mapping.
    #[error("theme{} must be a mapping of variables, found {found}", location(.path))]
    NotAMapping {
        path: Option<PathBuf>,
        found: String,
    },
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

/// A nested key-value store of styling variables.
///
/// Values are addressed by dotted path (`alert.type.info.bg`). The `colors`
/// table maps semantic names to color values and is consulted by
/// [`resolve_color`](Theme::resolve_color).
///
/// [`Theme::default`] carries the built-in variables; [`Theme::new`] is
/// empty. Lookups never fail: callers pass the default they want.
///
/// # Example
///
/// ```rust
/// use termage_render::Theme;
///
/// let theme = Theme::from_yaml(r#"
/// colors:
///   primary: magenta
/// alert:
///   width: 60
/// "#).unwrap();
///
/// assert_eq!(theme.resolve_color("primary"), "magenta");
/// assert_eq!(theme.resolve_color("red"), "red");
/// assert_eq!(theme.get_or("alert.width", 50usize), 60);
/// assert_eq!(theme.get_or("alert.padding", 2usize), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Theme name (optional, typically derived from filename).
    name: Option<String>,
    /// Source file path.
    source_path: Option<PathBuf>,
    variables: Mapping,
}

impl Theme {
    /// Creates an empty, unnamed theme.
    pub fn new() -> Self {
        Self {
            name: None,
            source_path: None,
            variables: Mapping::new(),
        }
    }

    /// Creates an empty theme with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new().with_name(name)
    }

    /// Sets the name on this theme, returning `self` for chaining.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The built-in variables: color palette, spacing multipliers and
    /// element defaults.
    pub fn builtin() -> Self {
        let mut theme = Theme::named("default");

        for name in [
            "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white", "gray",
        ] {
            theme.set(&format!("colors.{}", name), name);
        }
        for (name, color) in [
            ("info", "blue"),
            ("warning", "yellow"),
            ("danger", "red"),
            ("success", "green"),
            ("primary", "blue"),
            ("secondary", "gray"),
        ] {
            theme.set(&format!("colors.{}", name), color);
        }

        for group in ["padding", "margin"] {
            for side in ["global", "left", "right"] {
                theme.set(&format!("{}.{}", group, side), 1);
            }
        }

        theme.set("alert.text-align", "left");
        theme.set("alert.width-full", false);
        theme.set("alert.width", 50);
        for (kind, color) in [
            ("info", "black"),
            ("warning", "black"),
            ("danger", "white"),
            ("success", "black"),
            ("primary", "white"),
            ("secondary", "white"),
        ] {
            theme.set(&format!("alert.type.{}.bg", kind), kind);
            theme.set(&format!("alert.type.{}.color", kind), color);
        }

        for side in ["padding-left", "padding-right", "margin-left", "margin-right"] {
            theme.set(&format!("el.{}", side), 0);
        }
        theme.set("el.text-align", "left");
        theme.set("el.display", "inline");

        theme.set("heading.size", 1);
        theme.set("heading.spacing", 1);

        theme.set("rule.character", "─");
        theme.set("rule.text-align", "left");
        theme.set("rule.width-full", true);
        theme.set("rule.width", 50);

        theme
    }

    /// Loads a theme from a YAML file.
    ///
    /// The theme name is derived from the filename (without extension).
    ///
    /// # Errors
    ///
    /// Returns a [`ThemeError`] if the file cannot be read or parsed.
    ///
    /// ```rust,ignore
    /// use termage_render::Theme;
    ///
    /// let theme = Theme::from_file("./themes/sunset.yaml")?;
    /// assert_eq!(theme.name(), Some("sunset"));
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ThemeError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string());

        let variables = parse_variables(&content, Some(path))?;
        tracing::debug!(target: "termage.theme", path = %path.display(), "theme_loaded");

        Ok(Self {
            name,
            source_path: Some(path.to_path_buf()),
            variables,
        })
    }

    /// Creates a theme from YAML content. An empty document is an empty theme.
    ///
    /// # Errors
    ///
    /// Returns a [`ThemeError`] if the YAML is invalid or its root is not a
    /// mapping.
    pub fn from_yaml(yaml: &str) -> Result<Self, ThemeError> {
        Ok(Self {
            name: None,
            source_path: None,
            variables: parse_variables(yaml, None)?,
        })
    }

    /// Returns the theme name, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the source file path, if this theme was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// The raw variable tree.
    pub fn variables(&self) -> &Mapping {
        &self.variables
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Sets the variable at `path`, creating intermediate tables.
    ///
    /// A non-table value in the way is replaced by a table.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        let mut segments: Vec<&str> = path.split('.').collect();
        let Some(last) = segments.pop() else {
            return;
        };

        let mut current = &mut self.variables;
        for segment in segments {
            let entry = current
                .entry(Value::String(segment.to_string()))
                .or_insert_with(|| Value::Mapping(Mapping::new()));
            if !entry.is_mapping() {
                *entry = Value::Mapping(Mapping::new());
            }
            current = match entry {
                Value::Mapping(table) => table,
                _ => return,
            };
        }
        current.insert(Value::String(last.to_string()), value.into());
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.set(path, value);
        self
    }

    /// Returns the value at `path`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.variables.get(first)?;
        for segment in segments {
            current = current.as_mapping()?.get(segment)?;
        }
        Some(current)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Returns the value at `path` deserialized as `T`, or `default` when it
    /// is absent or has the wrong shape.
    pub fn get_or<T: DeserializeOwned>(&self, path: &str, default: T) -> T {
        let Some(value) = self.get(path) else {
            return default;
        };
        match serde_yaml::from_value(value.clone()) {
            Ok(v) => v,
            Err(err) => {
                tracing::trace!(target: "termage.theme", path, error = %err, "variable_type_mismatch");
                default
            }
        }
    }

    /// Returns a scalar value as a string.
    pub fn get_str(&self, path: &str) -> Option<String> {
        match self.get(path)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Returns a numeric value. Numeric strings count.
    pub fn get_number(&self, path: &str) -> Option<f64> {
        match self.get(path)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Looks `name` up in the `colors` table, falling back to `name` itself.
    pub fn resolve_color(&self, name: &str) -> String {
        self.get_str(&format!("colors.{}", name))
            .unwrap_or_else(|| name.to_string())
    }

    /// Deep-merges another theme into this one.
    ///
    /// Tables merge key by key; any other value in `other` replaces the one
    /// in `self`. The name and source path of `other` win when set.
    ///
    /// ```rust
    /// use termage_render::Theme;
    ///
    /// let base = Theme::new().with("alert.width", 50).with("alert.text-align", "left");
    /// let user = Theme::new().with("alert.width", 70);
    ///
    /// let merged = base.merge(user);
    /// assert_eq!(merged.get_number("alert.width"), Some(70.0));
    /// assert_eq!(merged.get_str("alert.text-align").as_deref(), Some("left"));
    /// ```
    pub fn merge(mut self, other: Theme) -> Self {
        merge_mappings(&mut self.variables, other.variables);
        if other.name.is_some() {
            self.name = other.name;
        }
        if other.source_path.is_some() {
            self.source_path = other.source_path;
        }
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin()
    }
}

fn parse_variables(yaml: &str, path: Option<&Path>) -> Result<Mapping, ThemeError> {
    let value: Value = serde_yaml::from_str(yaml).map_err(|e| ThemeError::Parse {
        path: path.map(Path::to_path_buf),
        message: e.to_string(),
    })?;
    match value {
        Value::Mapping(variables) => Ok(variables),
        Value::Null => Ok(Mapping::new()),
        other => Err(ThemeError::NotAMapping {
            path: path.map(Path::to_path_buf),
            found: kind_of(&other).to_string(),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn merge_mappings(base: &mut Mapping, overlay: Mapping) {
    for (key, value) in overlay {
        match value {
            Value::Mapping(over) => {
                if let Some(Value::Mapping(existing)) = base.get_mut(&key) {
                    merge_mappings(existing, over);
                    continue;
                }
                base.insert(key, Value::Mapping(over));
            }
            other => {
                base.insert(key, other);
            }
        }
    }
}
