use std::io::Write;

use anyhow::{Context, Result};
use webhdfs::{Transport, WebHdfsClient};

use crate::common::{format_size, format_time};

pub fn run<T: Transport>(
    client: &WebHdfsClient<T>,
    paths: &[String],
    long: bool,
    raw_bytes: bool,
    out: &mut impl Write,
) -> Result<()> {
    let root = ["/".to_string()];
    let paths = if paths.is_empty() { &root[..] } else { paths };

    for path in paths {
        let entries = client
            .list_directory(path)
            .with_context(|| format!("cannot list {}", path))?;

        // Sorted on the bare name; the `/` suffix is display only.
        let mut rows: Vec<(String, bool, String, String)> = entries
            .iter()
            .map(|e| {
                let size = if e.is_dir() {
                    "0".to_string()
                } else {
                    format_size(e.length, raw_bytes)
                };
                (
                    e.display_name(path),
                    e.is_dir(),
                    size,
                    format_time(e.modification_time),
                )
            })
            .collect();
        rows.sort();

        let width = rows.iter().map(|r| r.0.chars().count()).max().unwrap_or(0);
        for (name, is_dir, size, modified) in &rows {
            let shown = if *is_dir {
                format!("{}/", name)
            } else {
                name.clone()
            };
            if long {
                writeln!(out, "{:width$}\t{}\t{}", shown, size, modified, width = width)?;
            } else {
                writeln!(out, "{}", shown)?;
            }
        }
    }
    Ok(())
}
