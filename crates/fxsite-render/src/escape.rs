//! Escaping for text nodes and double-quoted attribute values.

use std::borrow::Cow;

/// Escape for use inside an element body.
#[must_use]
pub fn text(s: &str) -> Cow<'_, str> {
    html_escape::encode_text(s)
}

/// Escape for use inside a double-quoted attribute value.
#[must_use]
pub fn attr(s: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_escapes_markup() {
        assert_eq!(text("USD/MXN <b>up</b> & away"), "USD/MXN &lt;b&gt;up&lt;/b&gt; &amp; away");
    }

    #[test]
    fn attr_escapes_quotes() {
        assert_eq!(attr(r#"The "carry" trade"#), "The &quot;carry&quot; trade");
    }

    #[test]
    fn plain_strings_are_borrowed() {
        assert!(matches!(text("Peso steady"), Cow::Borrowed(_)));
    }
}
