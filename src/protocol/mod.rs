pub mod error;
pub mod response;
pub mod types;

pub use error::FetchError;
pub use response::{CharacterResult, Envelope, EventResult, PageData, Thumbnail};
pub use types::{CharacterRecord, EventRecord};
