use anyhow::{Context, Result};
use webhdfs::{Transport, WebHdfsClient};

pub fn run<T: Transport>(
    client: &WebHdfsClient<T>,
    paths: &[String],
    recursive: bool,
) -> Result<()> {
    for path in paths {
        client
            .remove(path, recursive)
            .with_context(|| format!("Cannot remove: {}", path))?;
    }
    Ok(())
}
