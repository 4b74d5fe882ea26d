use std::io::Write;

use anyhow::{Context, Result};
use webhdfs::{Transport, WebHdfsClient, WebHdfsError};

const CHUNK_SIZE: usize = 64 * 1024;

pub fn run<T: Transport>(
    client: &WebHdfsClient<T>,
    paths: &[String],
    out: &mut impl Write,
) -> Result<()> {
    for path in paths {
        let reader = client
            .open(path)
            .with_context(|| format!("cannot read {}", path))?;
        for chunk in reader.chunks(CHUNK_SIZE) {
            let chunk = chunk
                .map_err(WebHdfsError::from)
                .with_context(|| format!("read of {} aborted", path))?;
            out.write_all(&chunk)?;
        }
    }
    out.flush()?;
    Ok(())
}
