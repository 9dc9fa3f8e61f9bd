use crate::query::markup::{escape_attribute, Markup};
use indexmap::IndexMap;
use std::borrow::Cow;

/// Value of a query variable.
///
/// Variables travel inside a double-quoted XML attribute of the query envelope, so every value is rendered
/// attribute-safe exactly once:
/// *  [`Value::Text`] is escaped when the envelope is built.
/// *  [`Value::Bool`] becomes the literal `true` or `false`.
/// *  [`Value::Markup`] was already prepared by [`Markup::prepare`] and is emitted as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A raw string.
    Text(String),
    /// A boolean, sent as `true` or `false`.
    Bool(bool),
    /// HTML already made attribute-safe.
    Markup(Markup),
}

impl Value {
    /// The attribute-safe form of the value.
    pub fn to_attribute(&self) -> Cow<'_, str> {
        match self {
            Value::Text(text) => escape_attribute(text),
            Value::Bool(true) => Cow::Borrowed("true"),
            Value::Bool(false) => Cow::Borrowed("false"),
            Value::Markup(markup) => Cow::Borrowed(markup.as_str()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Markup> for Value {
    fn from(value: Markup) -> Self {
        Value::Markup(value)
    }
}

macro_rules! numeric_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Text(value.to_string())
                }
            }
        )*
    };
}

numeric_value!(u8, i8, u16, i16, u32, i32, u64, i64, usize, f32, f64);

/// Named query variables, kept in insertion order.
///
/// # Example
/// ```
/// use basex_rest::{Parameters, Value};
///
/// let parameters = Parameters::new()
///     .with("bookId", "IBC2018")
///     .with("includeChildren", true);
///
/// assert_eq!(Some(&Value::Bool(true)), parameters.get("includeChildren"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters(IndexMap<String, Value>);

impl Parameters {
    /// Creates an empty set of parameters.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Adds a parameter and returns the parameters back, for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a parameter. An existing parameter of the same name keeps its position and gets the new value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Returns the value of the named parameter.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Whether the named parameter is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(name, value)| (name.into(), value.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Value::from("test"), "test")]
    #[test_case(Value::from("test".to_owned()), "test")]
    #[test_case(Value::from(5u8), "5")]
    #[test_case(Value::from(-5i64), "-5")]
    #[test_case(Value::from(5.5f64), "5.5")]
    #[test_case(Value::from(true), "true")]
    #[test_case(Value::from(false), "false")]
    #[test_case(Value::from("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;")]
    #[test_case(Value::from("line1\nline2\r\n\tend"), "line1&#10;line2&#13;&#10;&#9;end")]
    #[test_case(Value::from(Markup::prepare("<b>x</b>")), "&lt;b&gt;x&lt;/b&gt;")]
    fn test_value_renders_as_attribute(value: Value, expected: &str) {
        assert_eq!(expected, value.to_attribute());
    }

    #[test]
    fn test_parameters_keep_insertion_order() {
        let parameters = Parameters::new().with("z", "1").with("a", "2").with("m", "3");

        let names: Vec<&str> = parameters.iter().map(|(name, _)| name).collect();
        assert_eq!(vec!["z", "a", "m"], names);
    }

    #[test]
    fn test_replacing_parameter_keeps_position() {
        let mut parameters = Parameters::new().with("first", "1").with("second", "2");

        let previous = parameters.insert("first", "one");

        assert_eq!(Some(Value::from("1")), previous);
        assert_eq!(Some(("first", &Value::from("one"))), parameters.iter().next());
        assert_eq!(2, parameters.len());
    }

    #[test]
    fn test_parameters_collect_from_pairs() {
        let parameters: Parameters = vec![("bookId", "IBC"), ("sectionId", "s1")].into_iter().collect();

        assert!(parameters.contains("sectionId"));
        assert!(!parameters.is_empty());
    }
}
