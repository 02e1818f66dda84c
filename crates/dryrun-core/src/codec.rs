#![forbid(unsafe_code)]

//! JSONL encoding of traces.
//!
//! A trace exported for inspection or replay is one JSON object per line:
//!
//! ```text
//! {"record":"trace_header","schema_version":"dryrun-trace-v1","algorithm":"bubble","original":[...],"origins":[...]}
//! {"record":"step","index":0,"kind":{"type":"compare","indices":[0,1]},"snapshot":[...],"message":"..."}
//! ...
//! {"record":"trace_summary","total_steps":18,"fingerprint":"blake3:..."}
//! ```
//!
//! The first line is always a `trace_header`, the last a `trace_summary`.
//! [`decode`] accepts a trace only if the schema matches, every step index is
//! in sequence, the counts agree, the trace invariants hold and the
//! fingerprint recomputes to the recorded value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::builder::Trace;
use crate::catalog::AlgorithmId;
use crate::invariants::InvariantViolation;
use crate::step::{Step, StepKind, Value};

// ---------------------------------------------------------------------------
// Schema version
// ---------------------------------------------------------------------------

/// Current schema version for trace files.
pub const SCHEMA_VERSION: &str = "dryrun-trace-v1";

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A single line of a trace file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "record")]
pub enum TraceRecord {
    /// Header record (first line).
    #[serde(rename = "trace_header")]
    Header {
        schema_version: String,
        algorithm: AlgorithmId,
        original: Vec<Value>,
        origins: Vec<usize>,
    },

    /// One step, in trace order.
    #[serde(rename = "step")]
    Step {
        index: usize,
        kind: StepKind,
        snapshot: Vec<Value>,
        message: String,
    },

    /// Summary record (last line).
    #[serde(rename = "trace_summary")]
    Summary {
        total_steps: usize,
        fingerprint: String,
    },
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported schema version `{found}` (expected `{expected}`)", expected = SCHEMA_VERSION)]
    Schema { found: String },

    #[error("malformed trace: {0}")]
    Structure(String),

    #[error("fingerprint mismatch: recorded {recorded}, computed {computed}")]
    Fingerprint { recorded: String, computed: String },

    #[error("trace violates its invariants: {0}")]
    Invariant(#[from] InvariantViolation),
}

fn structure(reason: impl Into<String>) -> CodecError {
    CodecError::Structure(reason.into())
}

/// Records for `trace`, header first and summary last.
#[must_use]
pub fn records(trace: &Trace) -> Vec<TraceRecord> {
    let mut out = Vec::with_capacity(trace.len() + 2);
    out.push(TraceRecord::Header {
        schema_version: SCHEMA_VERSION.to_string(),
        algorithm: trace.algorithm(),
        original: trace.original().to_vec(),
        origins: trace.origins().to_vec(),
    });
    out.extend(trace.steps().iter().enumerate().map(|(index, step)| {
        TraceRecord::Step {
            index,
            kind: step.kind.clone(),
            snapshot: step.snapshot.clone(),
            message: step.message.clone(),
        }
    }));
    out.push(TraceRecord::Summary {
        total_steps: trace.len(),
        fingerprint: trace.fingerprint(),
    });
    out
}

/// Encode `trace` as JSONL, one record per line with a trailing newline.
pub fn encode(trace: &Trace) -> Result<String, CodecError> {
    let mut out = String::new();
    for (i, record) in records(trace).iter().enumerate() {
        let line = serde_json::to_string(record)
            .map_err(|source| CodecError::Json { line: i + 1, source })?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Decode and fully validate a JSONL trace.
pub fn decode(input: &str) -> Result<Trace, CodecError> {
    let mut parsed = Vec::new();
    for (i, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: TraceRecord = serde_json::from_str(line)
            .map_err(|source| CodecError::Json { line: i + 1, source })?;
        parsed.push(record);
    }

    let mut iter = parsed.into_iter();
    let Some(TraceRecord::Header {
        schema_version,
        algorithm,
        original,
        origins,
    }) = iter.next()
    else {
        return Err(structure("first record must be a trace_header"));
    };
    if schema_version != SCHEMA_VERSION {
        return Err(CodecError::Schema {
            found: schema_version,
        });
    }

    let mut steps = Vec::new();
    let mut summary = None;
    for record in iter {
        if summary.is_some() {
            return Err(structure("records after trace_summary"));
        }
        match record {
            TraceRecord::Step {
                index,
                kind,
                snapshot,
                message,
            } => {
                if index != steps.len() {
                    return Err(structure(format!(
                        "step index {index} out of sequence, expected {}",
                        steps.len()
                    )));
                }
                steps.push(Step::new(kind, snapshot, message));
            }
            TraceRecord::Summary {
                total_steps,
                fingerprint,
            } => summary = Some((total_steps, fingerprint)),
            TraceRecord::Header { .. } => return Err(structure("duplicate trace_header")),
        }
    }

    let Some((total_steps, recorded)) = summary else {
        return Err(structure("missing trace_summary"));
    };
    if total_steps != steps.len() {
        return Err(structure(format!(
            "summary counts {total_steps} steps, found {}",
            steps.len()
        )));
    }

    let trace = Trace::from_parts(algorithm, original, origins, steps);
    trace.verify()?;
    let computed = trace.fingerprint();
    if computed != recorded {
        return Err(CodecError::Fingerprint { recorded, computed });
    }
    tracing::debug!(
        target: "dryrun.codec",
        algorithm = algorithm.as_str(),
        steps = trace.len(),
        "trace decoded"
    );
    Ok(trace)
}
