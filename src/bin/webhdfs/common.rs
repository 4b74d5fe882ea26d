use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};
use webhdfs::WebHdfsError;

pub fn format_size(size: u64, raw_bytes: bool) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;
    if raw_bytes || size < KB {
        format!("{}B", size)
    } else if size < MB {
        format!("{:.1}KB", size as f64 / KB as f64)
    } else if size < GB {
        format!("{:.1}MB", size as f64 / MB as f64)
    } else {
        format!("{:.1}GB", size as f64 / GB as f64)
    }
}

/// Milliseconds since the epoch as local ISO-8601.
pub fn format_time(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(t) => t
            .with_timezone(&Local)
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string(),
        None => "-".to_string(),
    }
}

/// Remote target for `cp src dst`: a destination ending in `/` names a
/// directory, so the source file name is appended.
pub fn copy_target(src: &str, dst: &str) -> String {
    if !dst.ends_with('/') {
        return dst.to_string();
    }
    let name = Path::new(src)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| src.to_string());
    format!("{}{}", dst, name)
}

/// Exit code for a failed operation: the HTTP status when it is an error
/// status, otherwise 1.
pub fn exit_code(err: &WebHdfsError) -> i32 {
    match err.status() {
        Some(status) if status >= 400 => status as i32,
        _ => 1,
    }
}

/// Prints the user-facing message for `err` and returns the exit code.
pub fn report(err: &anyhow::Error, w: &mut impl Write) -> i32 {
    let Some(e) = err.downcast_ref::<WebHdfsError>() else {
        let _ = writeln!(w, "{:#}", err);
        return 1;
    };
    match e {
        WebHdfsError::Connection(detail) => {
            let _ = writeln!(w, "Cannot connect to service.");
            let _ = writeln!(w, "{}", detail);
            1
        }
        WebHdfsError::PermissionDenied { .. } => {
            let _ = writeln!(w, "Unauthorized");
            exit_code(e)
        }
        _ => {
            let _ = writeln!(w, "{:#}", err);
            match e {
                WebHdfsError::Forbidden { .. } => {
                    let _ = writeln!(w, "Forbidden!");
                }
                WebHdfsError::NotFound { .. } => {
                    let _ = writeln!(w, "Not found!");
                }
                _ => {}
            }
            exit_code(e)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(format_size(0, false), "0B");
        assert_eq!(format_size(1023, false), "1023B");
        assert_eq!(format_size(1536, false), "1.5KB");
        assert_eq!(format_size(1536, true), "1536B");
        assert_eq!(format_size(5 * 1024 * 1024, false), "5.0MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024, false), "3.0GB");
    }

    #[test]
    fn time_is_iso_like() {
        let s = format_time(1_700_000_000_000);
        assert_eq!(s.len(), "2023-11-14T22:13:20".len());
        assert_eq!(&s[4..5], "-");
        assert_eq!(&s[10..11], "T");
    }

    #[test]
    fn copy_target_appends_basename_for_directories() {
        assert_eq!(copy_target("localfile.txt", "/dir/"), "/dir/localfile.txt");
        assert_eq!(copy_target("some/where/a.csv", "/dir/"), "/dir/a.csv");
        assert_eq!(copy_target("a.csv", "/dir/b.csv"), "/dir/b.csv");
    }

    #[test]
    fn report_messages_and_codes() {
        let cases: Vec<(WebHdfsError, i32, &str)> = vec![
            (
                WebHdfsError::Connection("refused".into()),
                1,
                "Cannot connect to service.",
            ),
            (
                WebHdfsError::PermissionDenied {
                    status: 401,
                    message: "no".into(),
                },
                401,
                "Unauthorized",
            ),
            (
                WebHdfsError::Forbidden {
                    status: 403,
                    message: "denied".into(),
                },
                403,
                "Forbidden!",
            ),
            (
                WebHdfsError::NotFound {
                    status: 404,
                    message: "gone".into(),
                },
                404,
                "Not found!",
            ),
            (WebHdfsError::io(500, "boom"), 500, "boom"),
            (WebHdfsError::io(200, "MKDIRS failed: /x"), 1, "MKDIRS failed"),
        ];
        for (err, code, text) in cases {
            let mut buf = Vec::new();
            assert_eq!(report(&anyhow::Error::new(err), &mut buf), code);
            assert!(String::from_utf8(buf).unwrap().contains(text));
        }
    }

    #[test]
    fn report_sees_through_context() {
        use anyhow::Context;
        let err = Err::<(), _>(WebHdfsError::NotFound {
            status: 404,
            message: "gone".into(),
        })
        .context("cannot read /x")
        .unwrap_err();
        let mut buf = Vec::new();
        assert_eq!(report(&err, &mut buf), 404);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("cannot read /x: gone"));
        assert!(text.contains("Not found!"));
    }
}
