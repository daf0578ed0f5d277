//! Whitespace-pair sample reader
//!
//! Tokens are read in order and paired up as `(primary, secondary)`. Line
//! breaks carry no meaning beyond separating tokens.
//!
//! Reading stops at the first token that is not a finite number. Samples
//! read before that point are kept; a primary value still waiting for its
//! partner is dropped. The same happens to a lone trailing value at EOF.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{IoError, IoResult};
use crate::sample::{Sample, SampleSet, Truncation};

/// Open `path` and read every sample in it
pub fn load_samples(path: impl AsRef<Path>) -> IoResult<SampleSet> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path).map_err(|e| IoError::OpenFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let set = parse_samples(BufReader::new(file))?;
    tracing::debug!(path = %path.display(), records = set.len(), "loaded samples");
    Ok(set)
}

/// Read samples from any buffered source
///
/// Bytes that are not valid UTF-8 become replacement characters, so they
/// end the read like any other unparsable token. Only a failing reader
/// is an error.
pub fn parse_samples<R: BufRead>(mut reader: R) -> IoResult<SampleSet> {
    let mut samples = Vec::new();
    let mut pending: Option<f64> = None;
    let mut truncated = None;
    let mut buf = Vec::new();
    let mut line_no = 0;

    'lines: loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| IoError::Read(e.to_string()))?;
        if read == 0 {
            break;
        }
        line_no += 1;

        for token in String::from_utf8_lossy(&buf).split_whitespace() {
            let Some(value) = parse_value(token) else {
                truncated = Some(Truncation {
                    line: line_no,
                    token: token.to_string(),
                });
                break 'lines;
            };

            match pending.take() {
                None => pending = Some(value),
                Some(primary) => samples.push(Sample::new(primary, value)),
            }
        }
    }

    if let Some(stop) = &truncated {
        tracing::warn!(
            line = stop.line,
            token = %stop.token,
            records = samples.len(),
            "stopped reading at unparsable token"
        );
    } else if pending.is_some() {
        tracing::warn!(records = samples.len(), "ignoring trailing value without a pair");
    }

    Ok(SampleSet::new(samples).with_truncation(truncated))
}

fn parse_value(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}
