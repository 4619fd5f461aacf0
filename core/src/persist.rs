//! Index files for drivers and tests: `.json` is read and written with
//! serde_json, anything else with bincode.

use crate::InvertedIndex;
use anyhow::{Context, Result};
use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()).is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

pub fn save_index<P: AsRef<Path>>(path: P, index: &InvertedIndex) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }
    let mut f = BufWriter::new(File::create(path).with_context(|| format!("creating {}", path.display()))?);
    if is_json(path) {
        serde_json::to_writer(&mut f, index)?;
    } else {
        let bytes = bincode::serialize(index)?;
        f.write_all(&bytes)?;
    }
    f.flush()?;
    Ok(())
}

pub fn load_index<P: AsRef<Path>>(path: P) -> Result<InvertedIndex> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening index {}", path.display()))?;
    let index = if is_json(path) {
        serde_json::from_reader(BufReader::new(f)).with_context(|| format!("parsing {}", path.display()))?
    } else {
        let mut buf = Vec::new();
        BufReader::new(f).read_to_end(&mut buf)?;
        bincode::deserialize(&buf).with_context(|| format!("decoding {}", path.display()))?
    };
    tracing::debug!(path = %path.display(), "loaded index");
    Ok(index)
}
