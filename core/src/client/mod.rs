// farmlink/src/client/mod.rs

//! Resilient request client: per-attempt timeout, bounded retry with backoff, and
//! classified failures over a pluggable HTTP transport.

pub mod execution;
pub mod policy;
pub mod request;
pub mod response;
pub mod session;
pub mod transport;

pub use execution::{RequestClient, RequestClientBuilder};
pub use policy::{FailureKind, RetryPolicy};
pub use request::{ApiRequest, Method};
pub use session::{NoToken, SessionToken, StaticToken, TokenProvider};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
