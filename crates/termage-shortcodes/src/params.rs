//! Shortcode parameters.
//!
//! A tag carries named `key=value` pairs and at most one unnamed value. The
//! unnamed value comes either from the BBCode form `[color=red]` or from the
//! first bare word in the parameter list (`[color red]`).

/// Parameters attached to a shortcode tag.
///
/// Named parameters keep their document order. Setting a key twice keeps the
/// first position and the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    named: Vec<(String, String)>,
    bbcode: Option<String>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the raw parameter string that follows a tag name.
    ///
    /// Parsing is total: stray `=` signs and unterminated quotes are
    /// absorbed rather than rejected.
    ///
    /// ```rust
    /// use termage_shortcodes::Parameters;
    ///
    /// let params = Parameters::parse(r#" l=2 title="two words" wide"#);
    /// assert_eq!(params.get("l"), Some("2"));
    /// assert_eq!(params.get("title"), Some("two words"));
    /// assert_eq!(params.bbcode(), Some("wide"));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let mut params = Self::new();
        let mut rest = raw;

        if let Some(value) = rest.strip_prefix('=') {
            let (value, remaining) = take_value(value);
            params.bbcode = Some(value.to_string());
            rest = remaining;
        }

        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }

            if rest.starts_with(['"', '\'']) {
                let (value, remaining) = take_value(rest);
                params.push_bare(value);
                rest = remaining;
                continue;
            }

            let word_end = rest
                .find(|c: char| c == '=' || c.is_whitespace())
                .unwrap_or(rest.len());

            if word_end == 0 {
                // stray `=` with no key: treat what follows as a bare value
                let (value, remaining) = take_value(&rest[1..]);
                if !value.is_empty() {
                    params.push_bare(value);
                }
                rest = remaining;
            } else if rest[word_end..].starts_with('=') {
                let key = &rest[..word_end];
                let (value, remaining) = take_value(&rest[word_end + 1..]);
                params.insert(key, value);
                rest = remaining;
            } else {
                params.push_bare(&rest[..word_end]);
                rest = &rest[word_end..];
            }
        }

        params
    }

    fn push_bare(&mut self, value: &str) {
        if self.bbcode.is_none() {
            self.bbcode = Some(value.to_string());
        } else {
            self.insert(value, "");
        }
    }

    /// Sets a named parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.named.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.named.push((key, value)),
        }
    }

    /// Sets the unnamed (BBCode-style) value.
    pub fn set_bbcode(&mut self, value: impl Into<String>) {
        self.bbcode = Some(value.into());
    }

    /// Returns a named parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.named
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the unnamed value, e.g. `red` in `[color=red]`.
    pub fn bbcode(&self) -> Option<&str> {
        self.bbcode.as_deref()
    }

    /// Named parameter parsed as a non-negative number; absent or invalid is `None`.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).map(parse_number)
    }

    /// Unnamed value parsed as a non-negative number; absent or invalid is `None`.
    pub fn bbcode_number(&self) -> Option<f64> {
        self.bbcode().map(parse_number)
    }

    /// Iterates over named parameters in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.named.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of named parameters.
    pub fn len(&self) -> usize {
        self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.bbcode.is_none()
    }
}

/// Parses a numeric parameter. Non-numeric, negative and non-finite input is zero.
pub fn parse_number(value: &str) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => n,
        _ => 0.0,
    }
}

/// Reads one value (quoted or bare) from the start of `s`.
fn take_value(s: &str) -> (&str, &str) {
    if let Some(quote) = s.chars().next().filter(|c| *c == '"' || *c == '\'') {
        let body = &s[1..];
        return match body.find(quote) {
            Some(close) => (&body[..close], &body[close + 1..]),
            None => (body, ""),
        };
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    (&s[..end], &s[end..])
}
