//! # WebHDFS Operation Client
//!
//! Translates filesystem verbs into WebHDFS REST calls.
//!
//! Metadata operations are a single call. Data operations (`OPEN`, `CREATE`,
//! `APPEND`) use the two-phase redirect protocol: the first call goes to the
//! service endpoint with redirects left unfollowed, and a `307` response names
//! the node that actually serves or receives the bytes. The second call goes
//! to that `Location` and nowhere else. Nothing is retried here.

use std::io::{self, Read};

use log::{debug, warn};

use crate::endpoint::{DEFAULT_VERSION, ServiceEndpoint};
use crate::error::{Result, WebHdfsError, classify};
use crate::transport::{Body, Method, Request, Response, Transport};
use crate::types::{BooleanResponse, DirectoryEntry, ListStatusResponse};

const TEMPORARY_REDIRECT: u16 = 307;
const OCTET_STREAM: (&str, &str) = ("Content-Type", "application/octet-stream");

pub struct WebHdfsClient<T> {
    endpoint: ServiceEndpoint,
    version: String,
    transport: T,
}

impl<T: Transport> WebHdfsClient<T> {
    pub fn new(endpoint: ServiceEndpoint, transport: T) -> Self {
        WebHdfsClient {
            endpoint,
            version: DEFAULT_VERSION.to_string(),
            transport,
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Full URL for `path` under the service endpoint.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint.resolve(&self.version), encode_path(path))
    }

    /// `GET <path>?op=LISTSTATUS`. Entries keep the server's order.
    ///
    /// Listing a file yields exactly one entry with an empty name; see
    /// [`DirectoryEntry::display_name`].
    pub fn list_directory(&self, path: &str) -> Result<Vec<DirectoryEntry>> {
        let url = self.url(path);
        debug!("LISTSTATUS {}", url);
        let response = check(self.transport.get(&url, &[("op", "LISTSTATUS")], true)?)?;
        let listing: ListStatusResponse = response.json()?;
        Ok(listing.file_statuses.file_status)
    }

    /// `GET <path>?op=OPEN`, following a `307` to the serving node by hand.
    ///
    /// A `2xx` on the first call means the data was served inline.
    pub fn open(&self, path: &str) -> Result<FileReader> {
        let url = self.url(path);
        debug!("OPEN {}", url);
        let first = self.transport.get(&url, &[("op", "OPEN")], false)?;
        let response = if first.status == TEMPORARY_REDIRECT {
            let location = location_of(&first, "OPEN")?;
            drop(first);
            debug!("OPEN redirected to {}", location);
            check(self.transport.get(&location, &[], true)?)?
        } else {
            check(first)?
        };
        Ok(FileReader {
            inner: response.body,
        })
    }

    /// Writes `size` bytes from `source` to `path`.
    ///
    /// `PUT <path>?op=CREATE&overwrite=..` must answer `307`; the content is
    /// then sent with `PUT <Location>`.
    pub fn copy<R>(&self, source: R, path: &str, size: u64, overwrite: bool) -> Result<()>
    where
        R: Read + Send + 'static,
    {
        let url = self.url(path);
        debug!("CREATE {} overwrite={} size={}", url, overwrite, size);
        let first = self.transport.put(
            &url,
            &[("op", "CREATE"), ("overwrite", bool_param(overwrite))],
            Body::Empty,
            &[],
            false,
        )?;
        let location = redirect_target(first, "CREATE")?;
        debug!("CREATE redirected to {}", location);
        let body = Body::Stream {
            reader: Box::new(source),
            size: Some(size),
        };
        check(self.transport.put(&location, &[], body, &[OCTET_STREAM], true)?)?;
        Ok(())
    }

    /// Appends `size` bytes from `source` to the existing file at `path`.
    ///
    /// Same choreography as [`copy`](Self::copy) with `POST ..?op=APPEND`.
    pub fn append<R>(&self, source: R, path: &str, size: u64) -> Result<()>
    where
        R: Read + Send + 'static,
    {
        let url = self.url(path);
        debug!("APPEND {} size={}", url, size);
        let first = self.transport.execute(Request {
            method: Method::Post,
            url,
            params: vec![("op".to_string(), "APPEND".to_string())],
            headers: Vec::new(),
            body: Body::Empty,
            follow_redirects: false,
        })?;
        let location = redirect_target(first, "APPEND")?;
        debug!("APPEND redirected to {}", location);
        let body = Body::Stream {
            reader: Box::new(source),
            size: Some(size),
        };
        check(self.transport.post(&location, &[], body, &[OCTET_STREAM])?)?;
        Ok(())
    }

    /// `PUT <path>?op=MKDIRS`
    pub fn make_directory(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        debug!("MKDIRS {}", url);
        let response = self
            .transport
            .put(&url, &[("op", "MKDIRS")], Body::Empty, &[], true)?;
        boolean_result(response, "MKDIRS", path)
    }

    /// `PUT <source>?op=RENAME&destination=<destination>`
    pub fn rename(&self, source: &str, destination: &str) -> Result<()> {
        let url = self.url(source);
        let destination = rooted(destination);
        debug!("RENAME {} -> {}", url, destination);
        let response = self.transport.put(
            &url,
            &[("op", "RENAME"), ("destination", destination.as_str())],
            Body::Empty,
            &[],
            true,
        )?;
        boolean_result(response, "RENAME", source)
    }

    /// `DELETE <path>?op=DELETE&recursive=..`
    ///
    /// A non-recursive delete of a non-empty directory is refused by the
    /// server and surfaces as an error.
    pub fn remove(&self, path: &str, recursive: bool) -> Result<()> {
        let url = self.url(path);
        debug!("DELETE {} recursive={}", url, recursive);
        let response = self.transport.delete(
            &url,
            &[("op", "DELETE"), ("recursive", bool_param(recursive))],
        )?;
        boolean_result(response, "DELETE", path)
    }
}

/// Byte stream of a remote file. Dropping it releases the connection.
pub struct FileReader {
    inner: Box<dyn Read + Send>,
}

impl Read for FileReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl FileReader {
    /// Iterates the stream in chunks of at most `size` bytes. The first
    /// error ends the iteration.
    pub fn chunks(self, size: usize) -> Chunks {
        Chunks {
            reader: self,
            size: size.max(1),
            done: false,
        }
    }
}

pub struct Chunks {
    reader: FileReader,
    size: usize,
    done: bool,
}

impl Iterator for Chunks {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut buf = vec![0u8; self.size];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(n) => {
                    buf.truncate(n);
                    return Some(Ok(buf));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

fn bool_param(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn rooted(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Passes `2xx` responses through and classifies everything else.
fn check(response: Response) -> Result<Response> {
    if response.is_success() {
        return Ok(response);
    }
    let status = response.status;
    let body = response.text().unwrap_or_default();
    Err(classify(status, &body))
}

fn location_of(response: &Response, op: &str) -> Result<String> {
    response.location().map(str::to_string).ok_or_else(|| {
        WebHdfsError::io(
            response.status,
            format!("{} redirect carried no Location header", op),
        )
    })
}

/// First phase of a write: only a `307` with a `Location` lets it proceed.
fn redirect_target(response: Response, op: &str) -> Result<String> {
    if response.status == TEMPORARY_REDIRECT {
        return location_of(&response, op);
    }
    let status = response.status;
    if response.is_success() {
        return Err(WebHdfsError::io(
            status,
            format!("{} answered {} instead of redirecting to a data node", op, status),
        ));
    }
    let body = response.text().unwrap_or_default();
    Err(classify(status, &body))
}

/// `{"boolean": true}` is the only success for MKDIRS, RENAME and DELETE.
fn boolean_result(response: Response, op: &str, path: &str) -> Result<()> {
    let response = check(response)?;
    let status = response.status;
    let result: BooleanResponse = response.json()?;
    if result.boolean {
        Ok(())
    } else {
        warn!("{} returned false for {}", op, path);
        Err(WebHdfsError::io(status, format!("{} failed: {}", op, path)))
    }
}

/// Percent-encodes each segment of `path` and roots it at `/`.
fn encode_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        out.push('/');
        for b in segment.as_bytes() {
            let c = *b as char;
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~') {
                out.push(c);
            } else {
                out.push_str(&format!("%{:02X}", b));
            }
        }
    }
    if out.is_empty() || path.ends_with('/') {
        out.push('/');
    }
    out
}
