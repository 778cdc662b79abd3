//! HTTP request construction, execution and response handling.
//!
//! A call flows through the layers in order: an [`Endpoint`] describes it,
//! [`RequestBuilder`] resolves it against a [`BaseUrl`] into a
//! [`PreparedRequest`], a [`Transport`] sends it, and [`NetworkService`]
//! validates and decodes the response.

pub mod codec;
pub mod endpoint;
pub mod error;
pub mod query;
pub mod request;
pub mod service;
pub mod transport;
pub mod url;

pub use codec::{PayloadEncoder, SnakeCaseJsonEncoder, decode_json, to_json_value};
pub use endpoint::{APP_VERSION_HEADER, Endpoint, HttpMethod, common_headers};
pub use error::NetworkingError;
pub use query::{QueryItem, QueryItems, QueryParameters};
pub use request::{PreparedRequest, REQUEST_TIMEOUT, RequestBuilder};
pub use service::NetworkService;
pub use transport::{ReqwestTransport, Transport, TransportError, TransportResponse};
pub use url::BaseUrl;
