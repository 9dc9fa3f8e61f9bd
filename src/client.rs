use crate::http::{ConnectionOptions, HttpTransport};
use crate::query::{with_default_database, Envelope, Parameters};
use crate::response::{normalize, RestResponse};
use crate::templates::QueryTemplates;
use crate::transport::{Method, Request, Transport};
use crate::Result;

pub(crate) const REST_ROOT: &str = "/rest";

/// Builds the query request for an envelope.
pub(crate) fn query_request(envelope: &Envelope) -> Request {
    Request::new(Method::Post, REST_ROOT)
        .with_header("Content-Type", "application/xml")
        .with_body(envelope.as_str())
}

/// URI of a document in the database: `/rest/{database}/{path}`.
pub(crate) fn document_uri(database: &str, path: &str) -> String {
    format!("{}/{}/{}", REST_ROOT, database, path)
}

/// Path of the document holding the entity with the given short code: `{code}/{code}.xml`.
pub(crate) fn entity_path(code: &str) -> String {
    format!("{0}/{0}.xml", code)
}

/// Names of the query templates and variables used by the entity shortcuts.
pub(crate) mod entity {
    pub(crate) const ID_EXISTS: &str = "IdExists";
    pub(crate) const GET_ENTITY: &str = "GetEntity";
    pub(crate) const GET_FRAGMENT: &str = "GetFragment";

    pub(crate) const XML_ID: &str = "xmlId";
    pub(crate) const ENTITY_ID: &str = "entityId";
    pub(crate) const FRAGMENT_ID: &str = "fragmentId";
    pub(crate) const INCLUDE_CHILDREN: &str = "includeChildren";
}

/// Represents an interface to the [REST API](https://docs.basex.org/wiki/REST) of a BaseX HTTP server, scoped to
/// a single database.
///
/// Queries are sent as envelopes, either from inline XQuery text or from a named template, and always carry a
/// `$dbname` variable. Documents of the database are written and deleted by path. Every operation is one blocking
/// round trip, whose response is handed back as a [`RestResponse`] without interpreting it.
///
/// # Example
/// ```no_run
/// use basex_rest::{Client, ClientError, ConnectionOptions, MemoryTemplates, Parameters};
///
/// fn main() -> Result<(), ClientError> {
///     let options = ConnectionOptions::new("localhost", 8984, "admin", "admin");
///     let client = Client::connect(options, "library", MemoryTemplates::new())?;
///
///     client.write_document("IBC2018/IBC2018.xml", "<book xml:id=\"IBC2018\"/>")?;
///     let response = client.run_query("count(db:get($dbname)//book)", Parameters::new())?;
///     assert_eq!("1", response.text()?);
///
///     client.delete_document("IBC2018/IBC2018.xml")?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client<T, L>
where
    T: Transport,
    L: QueryTemplates,
{
    database: String,
    transport: T,
    templates: L,
}

impl<L> Client<HttpTransport, L>
where
    L: QueryTemplates,
{
    /// Connects to the BaseX HTTP server described by `options`, targeting `database`.
    ///
    /// No request is sent until the first operation.
    ///
    /// # Example
    /// ```no_run
    /// use basex_rest::{Client, ConnectionOptions, TemplateDirectory};
    ///
    /// let client = Client::connect(ConnectionOptions::default(), "library", TemplateDirectory::new("xquery"));
    /// ```
    pub fn connect(options: ConnectionOptions, database: &str, templates: L) -> Result<Self> {
        let transport = HttpTransport::new(options)?;
        Ok(Client::new(database, transport, templates))
    }
}

impl<T, L> Client<T, L>
where
    T: Transport,
    L: QueryTemplates,
{
    /// Returns a new client sending requests through `transport` and resolving named queries with `templates`.
    ///
    /// Typically, you only need to use this method with a custom transport. For regular usage, refer to the
    /// [`Client::connect`] method.
    pub fn new(database: &str, transport: T, templates: L) -> Self {
        Self {
            database: database.to_owned(),
            transport,
            templates,
        }
    }

    /// The database every request targets.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Loads the query template `name` and runs it with the given `parameters`.
    ///
    /// Fails with [`ClientError::TemplateNotFound`] without contacting the server when there is no such template.
    ///
    /// [`ClientError::TemplateNotFound`]: crate::ClientError::TemplateNotFound
    pub fn run_named_query(&self, name: &str, parameters: Parameters) -> Result<RestResponse> {
        let query = self.templates.load(name)?;
        tracing::debug!(template = name, "running named query");
        self.run_query(&query, parameters)
    }

    /// Runs the XQuery `query` with the given `parameters` bound as external variables.
    ///
    /// A `dbname` variable holding the client's database is added unless `parameters` already has one. When the
    /// server rejects the query, the error carries the response body and the complete envelope that was sent.
    ///
    /// # Example
    /// ```no_run
    /// use basex_rest::{Client, ClientError, ConnectionOptions, MemoryTemplates, Parameters};
    ///
    /// fn main() -> Result<(), ClientError> {
    ///     let client = Client::connect(ConnectionOptions::default(), "library", MemoryTemplates::new())?;
    ///
    ///     let parameters = Parameters::new().with("title", "Dune").with("exact", true);
    ///     let response = client.run_query(
    ///         "declare variable $title external; declare variable $exact external; //book[title = $title]",
    ///         parameters,
    ///     )?;
    ///     println!("{}: {}", response.content_type(), response.text()?);
    ///     Ok(())
    /// }
    /// ```
    pub fn run_query(&self, query: &str, parameters: Parameters) -> Result<RestResponse> {
        let parameters = with_default_database(&self.database, parameters);
        let envelope = Envelope::new(query, &parameters);
        tracing::trace!(envelope = envelope.as_str(), "query envelope");

        let outcome = self.transport.send(query_request(&envelope));
        normalize(outcome, Some(envelope.as_str()))
    }

    /// Stores `content` at `path` in the database, replacing an existing document. The bytes are sent as they are.
    pub fn write_document(&self, path: &str, content: impl Into<Vec<u8>>) -> Result<RestResponse> {
        let request = Request::new(Method::Put, document_uri(&self.database, path)).with_body(content);
        normalize(self.transport.send(request), None)
    }

    /// Deletes the document at `path` from the database.
    pub fn delete_document(&self, path: &str) -> Result<RestResponse> {
        let request = Request::new(Method::Delete, document_uri(&self.database, path));
        normalize(self.transport.send(request), None)
    }

    /// Checks whether an element with the given `xml:id` exists, using the `IdExists` template.
    pub fn id_exists(&self, xml_id: &str) -> Result<RestResponse> {
        self.run_named_query(entity::ID_EXISTS, Parameters::new().with(entity::XML_ID, xml_id))
    }

    /// Returns an entity, using the `GetEntity` template.
    pub fn get_entity(&self, entity_id: &str) -> Result<RestResponse> {
        self.run_named_query(entity::GET_ENTITY, Parameters::new().with(entity::ENTITY_ID, entity_id))
    }

    /// Returns a fragment of an entity, optionally with its children, using the `GetFragment` template.
    pub fn get_fragment(&self, entity_id: &str, fragment_id: &str, include_children: bool) -> Result<RestResponse> {
        let parameters = Parameters::new()
            .with(entity::ENTITY_ID, entity_id)
            .with(entity::FRAGMENT_ID, fragment_id)
            .with(entity::INCLUDE_CHILDREN, include_children);
        self.run_named_query(entity::GET_FRAGMENT, parameters)
    }

    /// Stores the XML of the entity with short code `code` at `{code}/{code}.xml`.
    pub fn add_entity(&self, code: &str, xml: impl Into<Vec<u8>>) -> Result<RestResponse> {
        self.write_document(&entity_path(code), xml)
    }

    /// Deletes the entity with short code `code` from `{code}/{code}.xml`.
    pub fn delete_entity(&self, code: &str) -> Result<RestResponse> {
        self.delete_document(&entity_path(code))
    }
}
