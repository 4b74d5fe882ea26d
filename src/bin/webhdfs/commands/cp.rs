use std::fs::File;

use anyhow::{Context, Result};
use webhdfs::{Transport, WebHdfsClient};

use crate::common::copy_target;

pub fn run<T: Transport>(
    client: &WebHdfsClient<T>,
    src: &str,
    dst: &str,
    force: bool,
) -> Result<()> {
    let size = std::fs::metadata(src)
        .with_context(|| format!("cannot stat {}", src))?
        .len();
    let input = File::open(src).with_context(|| format!("cannot open {}", src))?;
    let target = copy_target(src, dst);
    client
        .copy(input, &target, size, force)
        .with_context(|| format!("Copy failed: {} -> {}", src, target))
}
