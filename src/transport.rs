//! # Transport
//!
//! The seam between the WebHDFS client and HTTP. A [`Transport`] executes one
//! [`Request`] and hands back the raw [`Response`]; it never interprets status
//! codes. The reqwest-backed implementation lives in [`crate::http`].

use std::io::Read;
use std::time::Duration;

use log::{debug, log_enabled};
use serde::de::DeserializeOwned;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// HTTP Basic credentials. A missing password is sent as empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

/// Settings applied uniformly to every call a transport makes.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    pub credentials: Option<Credentials>,
    pub verify_tls: bool,
    /// Proxy URL used for both http and https targets.
    pub proxy: Option<String>,
    pub timeout: Option<Duration>,
}

impl Default for TransportOptions {
    fn default() -> Self {
        TransportOptions {
            credentials: None,
            verify_tls: true,
            proxy: None,
            timeout: None,
        }
    }
}

pub enum Body {
    Empty,
    /// Streamed from `reader`; `size` is sent as the content length when known.
    Stream {
        reader: Box<dyn Read + Send>,
        size: Option<u64>,
    },
}

pub struct Request {
    pub method: Method,
    pub url: String,
    pub params: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Body,
    pub follow_redirects: bool,
}

pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    /// Headers of the request as it was issued.
    pub request_headers: Vec<(String, String)>,
    pub body: Box<dyn Read + Send>,
}

impl Response {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(mut self) -> Result<String> {
        let mut s = String::new();
        self.body.read_to_string(&mut s)?;
        Ok(s)
    }

    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_reader(self.body)?)
    }
}

fn owned_pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub trait Transport: Send + Sync {
    fn execute(&self, request: Request) -> Result<Response>;

    fn get(&self, url: &str, params: &[(&str, &str)], follow_redirects: bool) -> Result<Response> {
        self.execute(Request {
            method: Method::Get,
            url: url.to_string(),
            params: owned_pairs(params),
            headers: Vec::new(),
            body: Body::Empty,
            follow_redirects,
        })
    }

    fn put(
        &self,
        url: &str,
        params: &[(&str, &str)],
        body: Body,
        headers: &[(&str, &str)],
        follow_redirects: bool,
    ) -> Result<Response> {
        self.execute(Request {
            method: Method::Put,
            url: url.to_string(),
            params: owned_pairs(params),
            headers: owned_pairs(headers),
            body,
            follow_redirects,
        })
    }

    fn post(
        &self,
        url: &str,
        params: &[(&str, &str)],
        body: Body,
        headers: &[(&str, &str)],
    ) -> Result<Response> {
        self.execute(Request {
            method: Method::Post,
            url: url.to_string(),
            params: owned_pairs(params),
            headers: owned_pairs(headers),
            body,
            follow_redirects: true,
        })
    }

    fn delete(&self, url: &str, params: &[(&str, &str)]) -> Result<Response> {
        self.execute(Request {
            method: Method::Delete,
            url: url.to_string(),
            params: owned_pairs(params),
            headers: Vec::new(),
            body: Body::Empty,
            follow_redirects: true,
        })
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: Request) -> Result<Response> {
        (**self).execute(request)
    }
}

/// Logs the headers of every issued request at debug level once the call
/// has completed. Does nothing unless `enabled`.
pub struct HeaderLog<T> {
    inner: T,
    enabled: bool,
}

impl<T: Transport> HeaderLog<T> {
    pub fn new(inner: T, enabled: bool) -> Self {
        HeaderLog { inner, enabled }
    }
}

impl<T: Transport> Transport for HeaderLog<T> {
    fn execute(&self, request: Request) -> Result<Response> {
        let method = request.method;
        let url = request.url.clone();
        let response = self.inner.execute(request)?;
        if self.enabled && log_enabled!(log::Level::Debug) {
            debug!("{} {} -> {}", method.as_str(), url, response.status);
            for line in header_lines(&response.request_headers) {
                debug!("{}", line);
            }
        }
        Ok(response)
    }
}

/// `key: value` lines as [`HeaderLog`] emits them, credentials redacted.
pub(crate) fn header_lines(headers: &[(String, String)]) -> Vec<String> {
    headers
        .iter()
        .map(|(key, value)| format!("{}: {}", key, redact(key, value)))
        .collect()
}

fn redact<'a>(key: &str, value: &'a str) -> &'a str {
    if key.eq_ignore_ascii_case("authorization") {
        match value.split_once(' ') {
            Some((scheme, _)) => scheme,
            None => "<redacted>",
        }
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Mutex;

    struct Echo {
        seen: Mutex<Vec<(Method, String, Vec<(String, String)>, bool)>>,
    }

    impl Transport for Echo {
        fn execute(&self, request: Request) -> Result<Response> {
            self.seen.lock().unwrap().push((
                request.method,
                request.url.clone(),
                request.params.clone(),
                request.follow_redirects,
            ));
            Ok(Response {
                status: 200,
                headers: vec![("Content-Type".into(), "application/json".into())],
                request_headers: vec![("authorization".into(), "Basic dXNlcjpwdw==".into())],
                body: Box::new(Cursor::new(br#"{"boolean":true}"#.to_vec())),
            })
        }
    }

    fn echo() -> Echo {
        Echo {
            seen: Mutex::new(Vec::new()),
        }
    }

    #[test]
    fn helper_methods_fill_requests() {
        let t = echo();
        t.get("http://h/x", &[("op", "OPEN")], false).unwrap();
        t.put("http://h/x", &[("op", "MKDIRS")], Body::Empty, &[], true)
            .unwrap();
        t.post(
            "http://h/x",
            &[],
            Body::Stream {
                reader: Box::new(Cursor::new(vec![1u8])),
                size: Some(1),
            },
            &[],
        )
        .unwrap();
        t.delete("http://h/x", &[("recursive", "true")]).unwrap();
        let seen = t.seen.lock().unwrap();
        assert_eq!(seen[0].0, Method::Get);
        assert!(!seen[0].3);
        assert_eq!(seen[0].2, vec![("op".to_string(), "OPEN".to_string())]);
        assert_eq!(seen[1].0, Method::Put);
        assert!(seen[1].3);
        assert_eq!(seen[2].0, Method::Post);
        assert!(seen[2].3);
        assert_eq!(seen[3].0, Method::Delete);
        assert!(seen[3].3);
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let r = echo().get("http://h/", &[], true).unwrap();
        assert_eq!(r.header("content-type"), Some("application/json"));
        assert_eq!(r.location(), None);
        assert!(r.is_success());
    }

    #[test]
    fn header_log_passes_response_through() {
        let t = HeaderLog::new(echo(), true);
        let r = t.get("http://h/", &[], true).unwrap();
        assert_eq!(r.status, 200);
        let v: serde_json::Value = r.json().unwrap();
        assert_eq!(v["boolean"], true);
    }

    #[test]
    fn boxed_transport_delegates() {
        let t: Box<dyn Transport> = Box::new(echo());
        assert_eq!(t.delete("http://h/", &[]).unwrap().status, 200);
    }

    #[test]
    fn authorization_is_redacted() {
        assert_eq!(redact("Authorization", "Basic abc"), "Basic");
        assert_eq!(redact("authorization", "opaque"), "<redacted>");
        assert_eq!(redact("accept", "*/*"), "*/*");
    }
}
