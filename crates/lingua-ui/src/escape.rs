use std::fmt;

/// Escape a text node
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a double-quoted attribute payload
pub fn escape_attr(text: &str) -> String {
    text.replace('&', "&amp;").replace('"', "&quot;")
}

/// HTML under construction. Literal markup must be `&'static str`, so
/// anything computed at runtime goes through one of the escaping entry points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    html: String,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&mut self, markup: &'static str) -> &mut Self {
        self.html.push_str(markup);
        self
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        self.html.push_str(&escape_html(text));
        self
    }

    pub fn attr(&mut self, value: &str) -> &mut Self {
        self.html.push_str(&escape_attr(value));
        self
    }

    /// Append markup that was itself built through a `Markup`
    pub fn nest(&mut self, other: &Markup) -> &mut Self {
        self.html.push_str(&other.html);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}
