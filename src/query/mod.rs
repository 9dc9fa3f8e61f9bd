mod argument;
mod envelope;
mod markup;

pub use self::argument::{Parameters, Value};
pub use self::envelope::{with_default_database, Envelope, DATABASE_PARAMETER, REST_NAMESPACE};
pub use self::markup::Markup;
