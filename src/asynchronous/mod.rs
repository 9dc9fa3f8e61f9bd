//! Non-blocking client over [`tokio`] and [`reqwest`].
pub(crate) mod client;
pub(crate) mod templates;
#[cfg(test)]
pub(crate) mod tests;
pub(crate) mod transport;

pub use client::Client;
pub use templates::AsyncQueryTemplates;
pub use transport::{AsyncHttpTransport, AsyncTransport};
