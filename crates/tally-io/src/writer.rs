//! Sample file writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{IoError, IoResult};
use crate::sample::Sample;

/// Write one `primary secondary` line per sample
pub fn write_samples<W: Write>(writer: &mut W, samples: &[Sample]) -> IoResult<()> {
    for sample in samples {
        writeln!(writer, "{} {}", sample.primary, sample.secondary)
            .map_err(|e| IoError::Write(e.to_string()))?;
    }
    writer.flush().map_err(|e| IoError::Write(e.to_string()))
}

/// Create (or truncate) `path` and write `samples` to it
pub fn save_samples(path: impl AsRef<Path>, samples: &[Sample]) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| IoError::CreateFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut writer = BufWriter::new(file);
    write_samples(&mut writer, samples)?;
    tracing::debug!(path = %path.display(), records = samples.len(), "saved samples");
    Ok(())
}
