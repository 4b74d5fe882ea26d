use anyhow::{Context, Result};
use webhdfs::{Transport, WebHdfsClient};

pub fn run<T: Transport>(client: &WebHdfsClient<T>, paths: &[String]) -> Result<()> {
    for path in paths {
        client
            .make_directory(path)
            .with_context(|| format!("mkdir failed: {}", path))?;
    }
    Ok(())
}
