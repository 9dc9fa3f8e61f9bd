use crate::asynchronous::templates::AsyncQueryTemplates;
use crate::asynchronous::transport::{AsyncHttpTransport, AsyncTransport};
use crate::client::{document_uri, entity, entity_path, query_request};
use crate::http::ConnectionOptions;
use crate::query::{with_default_database, Envelope, Parameters};
use crate::response::{normalize, RestResponse};
use crate::transport::{Method, Request};
use crate::Result;

/// Asynchronous counterpart of [`crate::Client`]: the same operations, each one non-blocking round trip.
///
/// # Examples
///
/// ```no_run
/// # use basex_rest::asynchronous::Client;
/// # use basex_rest::{ClientError, ConnectionOptions, MemoryTemplates, Parameters};
/// # async fn example() -> Result<(), ClientError> {
/// let client = Client::connect(ConnectionOptions::default(), "library", MemoryTemplates::new())?;
///
/// let response = client.run_query("count(db:get($dbname))", Parameters::new()).await?;
/// println!("{}", response.text()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client<T, L>
where
    T: AsyncTransport,
    L: AsyncQueryTemplates,
{
    database: String,
    transport: T,
    templates: L,
}

impl<L> Client<AsyncHttpTransport, L>
where
    L: AsyncQueryTemplates,
{
    /// Connects to the BaseX HTTP server described by `options`, targeting `database`.
    pub fn connect(options: ConnectionOptions, database: &str, templates: L) -> Result<Self> {
        let transport = AsyncHttpTransport::new(options)?;
        Ok(Client::new(database, transport, templates))
    }
}

impl<T, L> Client<T, L>
where
    T: AsyncTransport,
    L: AsyncQueryTemplates,
{
    /// Returns a new client sending requests through `transport` and resolving named queries with `templates`.
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
    pub async fn run_named_query(&self, name: &str, parameters: Parameters) -> Result<RestResponse> {
        let query = self.templates.load(name).await?;
        tracing::debug!(template = name, "running named query");
        self.run_query(&query, parameters).await
    }

    /// Runs the XQuery `query` with the given `parameters` bound as external variables.
    pub async fn run_query(&self, query: &str, parameters: Parameters) -> Result<RestResponse> {
        let parameters = with_default_database(&self.database, parameters);
        let envelope = Envelope::new(query, &parameters);
        tracing::trace!(envelope = envelope.as_str(), "query envelope");

        let outcome = self.transport.send(query_request(&envelope)).await;
        normalize(outcome, Some(envelope.as_str()))
    }

    /// Stores `content` at `path` in the database, replacing an existing document.
    pub async fn write_document(&self, path: &str, content: impl Into<Vec<u8>>) -> Result<RestResponse> {
        let request = Request::new(Method::Put, document_uri(&self.database, path)).with_body(content);
        normalize(self.transport.send(request).await, None)
    }

    /// Deletes the document at `path` from the database.
    pub async fn delete_document(&self, path: &str) -> Result<RestResponse> {
        let request = Request::new(Method::Delete, document_uri(&self.database, path));
        normalize(self.transport.send(request).await, None)
    }

    /// Checks whether an element with the given `xml:id` exists, using the `IdExists` template.
    pub async fn id_exists(&self, xml_id: &str) -> Result<RestResponse> {
        self.run_named_query(entity::ID_EXISTS, Parameters::new().with(entity::XML_ID, xml_id))
            .await
    }

    /// Returns an entity, using the `GetEntity` template.
    pub async fn get_entity(&self, entity_id: &str) -> Result<RestResponse> {
        self.run_named_query(entity::GET_ENTITY, Parameters::new().with(entity::ENTITY_ID, entity_id))
            .await
    }

    /// Returns a fragment of an entity, optionally with its children, using the `GetFragment` template.
    pub async fn get_fragment(&self, entity_id: &str, fragment_id: &str, include_children: bool) -> Result<RestResponse> {
        let parameters = Parameters::new()
            .with(entity::ENTITY_ID, entity_id)
            .with(entity::FRAGMENT_ID, fragment_id)
            .with(entity::INCLUDE_CHILDREN, include_children);
        self.run_named_query(entity::GET_FRAGMENT, parameters).await
    }

    /// Stores the XML of the entity with short code `code` at `{code}/{code}.xml`.
    pub async fn add_entity(&self, code: &str, xml: impl Into<Vec<u8>>) -> Result<RestResponse> {
        self.write_document(&entity_path(code), xml).await
    }

    /// Deletes the entity with short code `code` from `{code}/{code}.xml`.
    pub async fn delete_entity(&self, code: &str) -> Result<RestResponse> {
        self.delete_document(&entity_path(code)).await
    }
}
