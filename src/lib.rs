//! A client library for the [BaseX REST API](https://docs.basex.org/wiki/REST).
//!
//! The [`Client`] runs XQuery through query envelopes posted to `/rest`, and writes or deletes documents of a
//! single database. Queries are either passed inline or loaded by name from a [`QueryTemplates`] store. The HTTP
//! round trip itself is delegated to a [`Transport`], with [`HttpTransport`] as the default implementation.
//!
//! ```no_run
//! use basex_rest::{Client, ClientError, ConnectionOptions, MemoryTemplates, Parameters};
//!
//! # fn main() -> Result<(), ClientError> {
//! let templates = MemoryTemplates::new().with("CountBooks", "count(db:get($dbname)//book)");
//! let client = Client::connect(ConnectionOptions::default(), "library", templates)?;
//!
//! let response = client.run_named_query("CountBooks", Parameters::new())?;
//! assert_eq!(200, response.status());
//! println!("{}", response.text()?);
//! # Ok(())
//! # }
//! ```
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(unused)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::private_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_codeblock_attributes)]
#![warn(rustdoc::invalid_html_tags)]
#![warn(rustdoc::invalid_rust_codeblocks)]
#![warn(rustdoc::bare_urls)]
pub mod asynchronous;
mod client;
mod errors;
mod http;
mod query;
mod response;
mod templates;
#[cfg(test)]
mod tests;
mod transport;

pub use client::Client;
pub use errors::{ClientError, RemoteQueryError};
pub use http::{ConnectionOptions, HttpTransport};
pub use query::{with_default_database, Envelope, Markup, Parameters, Value, DATABASE_PARAMETER, REST_NAMESPACE};
pub use response::RestResponse;
pub use templates::{MemoryTemplates, QueryTemplates, TemplateDirectory};
pub use transport::{Method, Request, Response, Transport, TransportError};

/// A [`Result`] with its [`Err`] variant set to [`ClientError`].
///
/// [`Result`]: std::result::Result
/// [`Err`]: std::result::Result::Err
/// [`ClientError`]: crate::errors::ClientError
pub type Result<T> = std::result::Result<T, ClientError>;
