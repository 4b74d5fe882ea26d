// # webhdfs: a WebHDFS client library
//
// Filesystem operations (list, read, write, rename, delete, mkdir) against a
// Hadoop-compatible cluster over its REST interface, optionally through a
// security gateway with HTTP Basic authentication.
//
// The HTTP implementation is behind the `reqwest` feature (on by default);
// without it, callers supply their own `Transport`.

/// The WebHDFS operation client.
pub mod client;

/// Client session configuration and credential parsing.
pub mod config;

/// Service URL construction.
pub mod endpoint;

/// Error kinds and status classification.
pub mod error;

/// reqwest-backed transport. Enabled with the `reqwest` feature.
#[cfg(feature = "reqwest")]
pub mod http;

/// The transport seam and its request/response types.
pub mod transport;

/// Wire types decoded from WebHDFS responses.
pub mod types;

pub use client::{Chunks, FileReader, WebHdfsClient};
pub use config::{ClientConfig, parse_auth};
pub use endpoint::ServiceEndpoint;
pub use error::{Result, WebHdfsError};
#[cfg(feature = "reqwest")]
pub use http::HttpTransport;
pub use transport::{Credentials, HeaderLog, Transport, TransportOptions};
pub use types::{DirectoryEntry, FileType};
