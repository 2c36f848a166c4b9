//! Validation of parsed configuration values.

use miette::{NamedSource, SourceSpan};

use crate::{CompilerOptions, Error, Result};

/// Validation context carrying the raw source for error reporting.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParseContext<'a> {
    src: &'a str,
    filename: &'a str,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self { src, filename }
    }

    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.filename, self.src.to_string())
    }

    /// Byte range of the array assigned to `key`, brackets excluded.
    fn array_body(&self, key: &str) -> Option<(usize, &'a str)> {
        let src: &'a str = self.src;
        src.match_indices(key).find_map(|(pos, _)| {
            let at_line_start = src[..pos]
                .chars()
                .rev()
                .take_while(|c| *c != '\n')
                .all(char::is_whitespace);
            if !at_line_start {
                return None;
            }
            let rest = src[pos + key.len()..].trim_start();
            let rest = rest.strip_prefix('=')?.trim_start();
            let body = rest.strip_prefix('[')?;
            let start = src.len() - body.len();
            let end = body.find(']').unwrap_or(body.len());
            Some((start, &body[..end]))
        })
    }

    /// Span of the `nth` quoted `value` inside the `key = [...]` array.
    fn find_in_array(&self, key: &str, value: &str, nth: usize) -> Option<SourceSpan> {
        let (start, body) = self.array_body(key)?;
        let needle = format!("\"{}\"", value);
        body.match_indices(&needle)
            .nth(nth)
            .map(|(pos, _)| SourceSpan::from((start + pos + 1, value.len())))
    }

    /// Check the invariants `CompilerOptions` promises.
    pub fn validate(&self, options: &CompilerOptions) -> Result<()> {
        for (i, name) in options.plugins.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(Box::new(Error::Validation {
                    src: self.named_source(),
                    span: None,
                    message: "plugin names cannot be empty".into(),
                }));
            }
            if options.plugins[..i].contains(name) {
                return Err(Box::new(Error::DuplicatePlugin {
                    src: self.named_source(),
                    span: self.find_in_array("plugins", name, 1),
                    name: name.clone(),
                }));
            }
        }

        for symbol in &options.define {
            if let Some(reason) = validate_symbol(symbol) {
                return Err(Box::new(Error::InvalidDefine {
                    src: self.named_source(),
                    span: self.find_in_array("define", symbol, 0),
                    symbol: symbol.clone(),
                    reason: reason.into(),
                }));
            }
        }

        if options.warn_passthrough.iter().any(|p| p.is_empty()) {
            return Err(Box::new(Error::Validation {
                src: self.named_source(),
                span: self.find_in_array("warn_passthrough", "", 0),
                message: "warn_passthrough prefixes cannot be empty".into(),
            }));
        }

        Ok(())
    }
}

/// Validate a conditional-compilation symbol.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_symbol(symbol: &str) -> Option<&'static str> {
    let mut chars = symbol.chars();

    match chars.next() {
        None => return Some("symbol cannot be empty"),
        Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
            return Some("symbol must start with a letter or underscore");
        }
        _ => {}
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Some("symbol contains invalid characters");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_symbol() {
        assert_eq!(validate_symbol("DEBUG"), None);
        assert_eq!(validate_symbol("_private_1"), None);
        assert_eq!(validate_symbol(""), Some("symbol cannot be empty"));
        assert_eq!(
            validate_symbol("1ST"),
            Some("symbol must start with a letter or underscore")
        );
        assert_eq!(
            validate_symbol("MY-FLAG"),
            Some("symbol contains invalid characters")
        );
    }

    #[test]
    fn test_find_in_array_nth() {
        let src = r#"plugins = ["a", "b", "a"]"#;
        let ctx = ParseContext::new(src, "graft.toml");

        assert_eq!(ctx.find_in_array("plugins", "a", 0), Some(SourceSpan::from((12, 1))));
        assert_eq!(ctx.find_in_array("plugins", "a", 1), Some(SourceSpan::from((22, 1))));
        assert_eq!(ctx.find_in_array("plugins", "c", 0), None);
        assert_eq!(ctx.find_in_array("define", "a", 0), None);
    }

    #[test]
    fn test_duplicate_plugin_points_into_plugins_array() {
        let src = "[compiler]\n\
                   define = [\"seeded_random\"]\n\
                   plugins = [\"seeded_random\", \"seeded_random\"]\n";
        let err = CompilerOptions::from_str_with_filename(src, "graft.toml").unwrap_err();

        let Error::DuplicatePlugin { span, .. } = err.as_ref() else {
            panic!("expected a duplicate plugin error, got {err:?}");
        };
        let second = src.rfind("\"seeded_random\"").unwrap() + 1;
        assert_eq!(*span, Some(SourceSpan::from((second, "seeded_random".len()))));
    }

    #[test]
    fn test_array_key_must_start_its_line() {
        let src = "xplugins = [\"a\"]\nplugins = [\"b\", \"a\"]";
        let ctx = ParseContext::new(src, "graft.toml");
        let expected = src.rfind("\"a\"").unwrap() + 1;

        assert_eq!(ctx.find_in_array("plugins", "a", 0), Some(SourceSpan::from((expected, 1))));
    }
}
