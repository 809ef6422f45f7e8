use std::{fmt::Debug, io::BufWriter, path::PathBuf};

use anyhow::Context;
use fs_err::File;
use serde::Serialize;

pub fn write_json<P: Into<PathBuf> + Debug, T: Serialize>(path: P, value: &T) -> anyhow::Result<()> {
    let path = path.into();
    serde_json::to_writer(BufWriter::new(File::create(&path)?), value)
        .with_context(|| format!("While trying to write {path:?} as JSON"))
}

pub fn write_json_pretty<P: Into<PathBuf> + Debug, T: Serialize>(
    path: P,
    value: &T,
) -> anyhow::Result<()> {
    let path = path.into();
    serde_json::to_writer_pretty(BufWriter::new(File::create(&path)?), value)
        .with_context(|| format!("While trying to write {path:?} as JSON"))
}
