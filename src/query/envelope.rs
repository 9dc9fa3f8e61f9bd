use crate::query::argument::Parameters;
use std::fmt::{Display, Formatter, Write};

/// Namespace of the BaseX REST query envelope.
pub const REST_NAMESPACE: &str = "http://basex.org/rest";

/// Name of the variable holding the database a query runs against.
pub const DATABASE_PARAMETER: &str = "dbname";

/// Returns `parameters` with [`DATABASE_PARAMETER`] set to `database`, unless the caller already provided one.
///
/// # Example
/// ```
/// use basex_rest::{with_default_database, Parameters, Value};
///
/// let parameters = with_default_database("library", Parameters::new());
/// assert_eq!(Some(&Value::from("library")), parameters.get("dbname"));
///
/// let parameters = with_default_database("library", Parameters::new().with("dbname", "archive"));
/// assert_eq!(Some(&Value::from("archive")), parameters.get("dbname"));
/// ```
pub fn with_default_database(database: &str, mut parameters: Parameters) -> Parameters {
    if !parameters.contains(DATABASE_PARAMETER) {
        parameters.insert(DATABASE_PARAMETER, database);
    }
    parameters
}

/// The XML document POSTed to `/rest` to run a query.
///
/// The query text goes verbatim into a CDATA section, each parameter becomes a `<variable>` element in insertion
/// order. Parameter names are written as given and must be valid XML names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope(String);

impl Envelope {
    /// Builds the envelope for `query` with the given variables.
    ///
    /// # Example
    /// ```
    /// use basex_rest::{Envelope, Parameters};
    ///
    /// let envelope = Envelope::new("count(//book)", &Parameters::new().with("verbose", false));
    /// assert_eq!(
    ///     "<query xmlns=\"http://basex.org/rest\">\n  <text><![CDATA[count(//book)]]></text>\n  \
    ///      <variable name=\"verbose\" value=\"false\" />\n</query>",
    ///     envelope.as_str()
    /// );
    /// ```
    pub fn new(query: &str, parameters: &Parameters) -> Self {
        let mut xml = String::with_capacity(query.len() + 64 * (parameters.len() + 2));
        let _ = write!(xml, "<query xmlns=\"{}\">\n  <text><![CDATA[", REST_NAMESPACE);
        // A CDATA section ends at the first `]]>`, split it across two sections.
        xml.push_str(&query.replace("]]>", "]]]]><![CDATA[>"));
        xml.push_str("]]></text>\n");
        for (name, value) in parameters.iter() {
            let _ = writeln!(xml, "  <variable name=\"{}\" value=\"{}\" />", name, value.to_attribute());
        }
        xml.push_str("</query>");

        Self(xml)
    }

    /// The envelope as XML text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the envelope, returning the XML text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for Envelope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
