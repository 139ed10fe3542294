//! Rust literal builder utilities.
//!
//! Helpers for constructing struct, call and array expressions as source text.

/// Builder for Rust struct literals.
///
/// # Example
///
/// ```ignore
/// let code = StructBuilder::new("binclude::Config")
///     .field("debug", "false")
///     .build();
/// assert_eq!(code, "binclude::Config { debug: false }");
/// ```
pub struct StructBuilder {
    path: String,
    fields: Vec<String>,
}

impl StructBuilder {
    /// Create a builder for the struct at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field with raw Rust code as its value.
    pub fn field<V: AsRef<str>>(mut self, name: &str, value: V) -> Self {
        self.fields.push(format!("{name}: {}", value.as_ref()));
        self
    }

    /// Build the struct literal on one line.
    pub fn build(self) -> String {
        if self.fields.is_empty() {
            format!("{} {{}}", self.path)
        } else {
            format!("{} {{ {} }}", self.path, self.fields.join(", "))
        }
    }

    /// Build the struct literal with one field per line.
    pub fn build_multiline(self, indent: &str) -> String {
        if self.fields.is_empty() {
            return format!("{} {{}}", self.path);
        }
        let mut out = format!("{} {{\n", self.path);
        for field in &self.fields {
            out.push_str(indent);
            out.push_str("    ");
            out.push_str(field);
            out.push_str(",\n");
        }
        out.push_str(indent);
        out.push('}');
        out
    }
}

/// Format a call expression: `path(a, b, c)`.
pub fn call<I, S>(path: &str, args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<_> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
    format!("{path}({})", args.join(", "))
}

/// Format a tuple expression. A single item keeps its trailing comma.
pub fn tuple(items: Vec<String>) -> String {
    match items.len() {
        0 => "()".to_string(),
        1 => format!("({},)", items[0]),
        _ => format!("({})", items.join(", ")),
    }
}

/// Format items as a Rust array literal, one item per line.
pub fn format_array(items: Vec<String>, indent: &str) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }
    let mut out = String::from("[\n");
    for item in items {
        out.push_str(indent);
        out.push_str("    ");
        out.push_str(&item);
        out.push_str(",\n");
    }
    out.push_str(indent);
    out.push(']');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_builder() {
        let code = StructBuilder::new("Point").field("x", "1").field("y", "2").build();
        assert_eq!(code, "Point { x: 1, y: 2 }");
        assert_eq!(StructBuilder::new("Unit").build(), "Unit {}");
    }

    #[test]
    fn test_struct_builder_multiline() {
        let code = StructBuilder::new("P").field("x", "1").build_multiline("");
        assert_eq!(code, "P {\n    x: 1,\n}");
    }

    #[test]
    fn test_call() {
        assert_eq!(call("f", ["1", "2"]), "f(1, 2)");
        assert_eq!(call("g", Vec::<String>::new()), "g()");
    }

    #[test]
    fn test_tuple_formatting() {
        assert_eq!(tuple(vec![]), "()");
        assert_eq!(tuple(vec!["a".into()]), "(a,)");
        assert_eq!(tuple(vec!["a".into(), "b".into()]), "(a, b)");
    }

    #[test]
    fn test_array_formatting() {
        assert_eq!(format_array(vec![], ""), "[]");
        assert_eq!(format_array(vec!["a".into(), "b".into()], ""), "[\n    a,\n    b,\n]");
    }
}
