pub mod client;
pub mod envelope;
pub mod request;

pub use client::ApiClient;
pub use envelope::{Envelope, PageMeta, Paginated};
pub use request::ApiRequest;
