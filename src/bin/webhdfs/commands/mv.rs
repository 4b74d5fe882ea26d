use anyhow::{Context, Result};
use webhdfs::{Transport, WebHdfsClient};

pub fn run<T: Transport>(client: &WebHdfsClient<T>, src: &str, dst: &str) -> Result<()> {
    client
        .rename(src, dst)
        .with_context(|| format!("Move failed: {} -> {}", src, dst))
}
