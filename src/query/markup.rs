use quick_xml::escape::{escape, resolve_predefined_entity};
use std::borrow::Cow;
use std::fmt::{Display, Formatter};

/// Longest entity reference looked at when decoding, `&` and `;` excluded.
const MAX_ENTITY_LEN: usize = 32;

/// HTML prepared to travel as the value of a query variable.
///
/// Variable values are sent inside an XML attribute, which must not contain a literal `<`
/// ([XML 1.0, AttValue](https://www.w3.org/TR/REC-xml/#NT-AttValue)). BaseX unescapes the attribute once, so the
/// HTML reaching the query must have its markup intact, while less-than signs that are text rather than markup
/// must still arrive as `&lt;`.
///
/// The input is therefore expected to carry markup as plain characters and text less-than signs as `&lt;`.
/// [`Markup::prepare`] turns that into the attribute-safe form. Preparing twice double-escapes, which is why the
/// result is its own type: the envelope emits it untouched, while plain strings are escaped by the envelope.
///
/// # Example
/// ```
/// use basex_rest::Markup;
///
/// let markup = Markup::prepare("<p>1 &lt; 2</p>");
/// assert_eq!("&lt;p&gt;1 &amp;lt; 2&lt;/p&gt;", markup.as_str());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Markup(String);

impl Markup {
    /// Makes `html` attribute-safe.
    ///
    /// Every `&lt;` is first protected as `&amp;lt;`, then entity references are decoded to characters and the
    /// result is escaped again, with tabs and line breaks as character references. Unknown named references such
    /// as `&nbsp;`, and references to characters XML does not allow, are kept as text.
    pub fn prepare(html: &str) -> Self {
        let protected = html.replace("&lt;", "&amp;lt;");
        let decoded = decode_entities(&protected);
        Markup(escape_attribute(&decoded).into_owned())
    }

    /// The prepared value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the markup, returning the prepared value.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for Markup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// XML-escapes `raw` for a double-quoted attribute value.
///
/// Tabs and line breaks are written as character references, otherwise attribute-value normalization on the
/// server would turn them into spaces.
pub(crate) fn escape_attribute(raw: &str) -> Cow<'_, str> {
    let escaped = escape(raw);
    if !escaped.contains(&['\t', '\n', '\r'][..]) {
        return escaped;
    }

    let mut output = String::with_capacity(escaped.len() + 8);
    for c in escaped.chars() {
        match c {
            '\t' => output.push_str("&#9;"),
            '\n' => output.push_str("&#10;"),
            '\r' => output.push_str("&#13;"),
            c => output.push(c),
        }
    }
    Cow::Owned(output)
}

/// Whether `c` matches the `Char` production of XML 1.0.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Replaces predefined entities and character references with the characters they stand for, in a single pass.
fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut decoded = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        let candidate = &rest[start + 1..];

        if let Some(end) = candidate.find(';').filter(|end| *end <= MAX_ENTITY_LEN) {
            if push_entity(&candidate[..end], &mut decoded) {
                rest = &candidate[end + 1..];
                continue;
            }
        }

        decoded.push('&');
        rest = candidate;
    }
    decoded.push_str(rest);

    Cow::Owned(decoded)
}

/// Appends the character(s) `name` refers to. Returns `false` when it is not a known reference.
fn push_entity(name: &str, output: &mut String) -> bool {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix('x').or_else(|| number.strip_prefix('X')) {
            Some(hex) if hex.bytes().all(|b| b.is_ascii_hexdigit()) => u32::from_str_radix(hex, 16).ok(),
            None if number.bytes().all(|b| b.is_ascii_digit()) => number.parse::<u32>().ok(),
            _ => None,
        };
        return match code.and_then(char::from_u32) {
            Some(c) if is_xml_char(c) => {
                output.push(c);
                true
            }
            _ => false,
        };
    }

    match resolve_predefined_entity(name) {
        Some(resolved) => {
            output.push_str(resolved);
            true
        }
        None => false,
    }
}
