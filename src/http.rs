//! reqwest-backed [`Transport`].
//!
//! reqwest fixes its redirect policy per client, so two blocking clients are
//! kept: one that follows redirects and one that returns them as-is.

use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;

use crate::error::{Result, WebHdfsError};
use crate::transport::{Body, Credentials, Method, Request, Response, Transport, TransportOptions};

pub struct HttpTransport {
    following: Client,
    manual: Client,
    credentials: Option<Credentials>,
}

impl HttpTransport {
    pub fn new(options: &TransportOptions) -> Result<Self> {
        Ok(HttpTransport {
            following: build_client(options, Policy::default())?,
            manual: build_client(options, Policy::none())?,
            credentials: options.credentials.clone(),
        })
    }
}

fn build_client(options: &TransportOptions, policy: Policy) -> Result<Client> {
    let mut builder: ClientBuilder = Client::builder()
        .user_agent(concat!("webhdfs/", env!("CARGO_PKG_VERSION")))
        .redirect(policy)
        .danger_accept_invalid_certs(!options.verify_tls)
        .timeout(options.timeout);
    if let Some(proxy) = &options.proxy {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| WebHdfsError::Connection(format!("invalid proxy {}: {}", proxy, e)))?;
        builder = builder.proxy(proxy);
    }
    builder
        .build()
        .map_err(|e| WebHdfsError::Connection(format!("failed to build HTTP client: {}", e)))
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Put => reqwest::Method::PUT,
        Method::Post => reqwest::Method::POST,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_string(),
                v.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

fn transport_error(e: reqwest::Error) -> WebHdfsError {
    if e.is_connect() || e.is_timeout() {
        WebHdfsError::Connection(e.to_string())
    } else {
        WebHdfsError::Io {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: Request) -> Result<Response> {
        let client = if request.follow_redirects {
            &self.following
        } else {
            &self.manual
        };

        let mut builder = client.request(to_reqwest(request.method), &request.url);
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(c) = &self.credentials {
            builder = builder.basic_auth(&c.username, c.password.as_deref());
        }
        builder = match request.body {
            Body::Empty => builder,
            Body::Stream {
                reader,
                size: Some(size),
            } => builder.body(reqwest::blocking::Body::sized(reader, size)),
            Body::Stream { reader, size: None } => {
                builder.body(reqwest::blocking::Body::new(reader))
            }
        };

        let issued = builder.build().map_err(transport_error)?;
        let request_headers = header_pairs(issued.headers());
        let response = client.execute(issued).map_err(transport_error)?;

        Ok(Response {
            status: response.status().as_u16(),
            headers: header_pairs(response.headers()),
            request_headers,
            body: Box::new(response),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{HeaderLog, header_lines};
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Answers one connection per canned response and reports each request
    /// head, lowercased, over the channel.
    fn serve(listener: TcpListener, responses: Vec<String>) -> mpsc::Receiver<String> {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for response in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&buf[..n]);
                }
                tx.send(String::from_utf8_lossy(&head).to_lowercase()).unwrap();
                stream.write_all(response.as_bytes()).unwrap();
            }
        });
        rx
    }

    fn local() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        (listener, base)
    }

    fn redirect_to(location: &str) -> String {
        format!(
            "HTTP/1.1 307 Temporary Redirect\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            location
        )
    }

    fn ok(body: &str) -> String {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
    }

    #[test]
    fn unfollowed_redirect_is_returned_with_auth_attached() {
        let (listener, base) = local();
        // Following this Location would fail to connect.
        let seen = serve(listener, vec![redirect_to("http://127.0.0.1:1/x")]);
        let t = HeaderLog::new(
            HttpTransport::new(&TransportOptions {
                credentials: Some(Credentials {
                    username: "u".into(),
                    password: Some("p".into()),
                }),
                ..Default::default()
            })
            .unwrap(),
            true,
        );

        let r = t
            .get(&format!("{}/webhdfs/v1/f", base), &[("op", "OPEN")], false)
            .unwrap();
        assert_eq!(r.status, 307);
        assert_eq!(r.location(), Some("http://127.0.0.1:1/x"));

        let head = seen.recv().unwrap();
        assert!(head.starts_with("get /webhdfs/v1/f?op=open "), "{head}");
        assert!(head.contains("authorization: basic dtpw\r\n"), "{head}");

        let sent = r
            .request_headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("authorization"))
            .map(|(_, v)| v.as_str());
        assert_eq!(sent, Some("Basic dTpw"));
        let lines = header_lines(&r.request_headers);
        assert!(lines.iter().any(|l| l == "authorization: Basic"), "{lines:?}");
        assert!(lines.iter().all(|l| !l.contains("dTpw")));
    }

    #[test]
    fn no_credentials_means_no_auth_header() {
        let (listener, base) = local();
        let seen = serve(listener, vec![ok("hello")]);
        let t = HttpTransport::new(&TransportOptions::default()).unwrap();

        let r = t.get(&format!("{}/webhdfs/v1/f", base), &[], true).unwrap();
        assert_eq!(r.status, 200);
        assert!(
            r.request_headers
                .iter()
                .all(|(k, _)| !k.eq_ignore_ascii_case("authorization"))
        );
        assert_eq!(r.text().unwrap(), "hello");
        assert!(!seen.recv().unwrap().contains("authorization:"));
    }

    #[test]
    fn followed_redirect_reaches_the_data() {
        let (listener, base) = local();
        let seen = serve(
            listener,
            vec![redirect_to(&format!("{}/data?op=OPEN", base)), ok("payload")],
        );
        let t = HttpTransport::new(&TransportOptions::default()).unwrap();

        let r = t
            .get(&format!("{}/webhdfs/v1/f", base), &[("op", "OPEN")], true)
            .unwrap();
        assert_eq!(r.status, 200);
        assert_eq!(r.text().unwrap(), "payload");
        assert!(seen.recv().unwrap().starts_with("get /webhdfs/v1/f?op=open "));
        assert!(seen.recv().unwrap().starts_with("get /data?op=open "));
    }

    #[test]
    fn builds_with_proxy_and_insecure_tls() {
        let options = TransportOptions {
            credentials: Some(Credentials {
                username: "hdfs".into(),
                password: None,
            }),
            verify_tls: false,
            proxy: Some("http://proxy.local:3128".into()),
            timeout: None,
        };
        assert!(HttpTransport::new(&options).is_ok());
    }

    #[test]
    fn unreachable_service_is_a_connection_error() {
        let t = HttpTransport::new(&TransportOptions {
            timeout: Some(std::time::Duration::from_secs(5)),
            ..Default::default()
        })
        .unwrap();
        // Port 1 on loopback is closed on any sane test host.
        let err = t
            .get("http://127.0.0.1:1/webhdfs/v1/", &[("op", "LISTSTATUS")], true)
            .err()
            .unwrap();
        assert!(matches!(err, WebHdfsError::Connection(_)), "{err:?}");
    }
}
