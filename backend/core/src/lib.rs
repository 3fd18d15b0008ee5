pub mod document;
pub mod error;
pub mod record;

pub use document::{DocumentMatch, TokenCollection};
pub use error::EkycError;
pub use record::FieldRecord;
