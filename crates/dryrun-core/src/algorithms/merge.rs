#![forbid(unsafe_code)]

use super::{SortAlgorithm, Sorted, WorkArray, fmt_values};
use crate::catalog::AlgorithmId;
use crate::error::Result;
use crate::recorder::Recorder;
use crate::step::{StepKind, Value};

/// Top-down merge sort over index ranges of the full working array.
///
/// The left half is the smaller one (`len / 2` elements). Steps appear in
/// call order: a split, everything inside the left half, everything inside
/// the right half, then the combine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Merge;

impl SortAlgorithm for Merge {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::Merge
    }

    fn run(&self, input: &[Value], rec: &mut Recorder) -> Result<Sorted> {
        let mut work = WorkArray::new(input);
        if work.len() > 1 {
            let high = work.len() - 1;
            sort_range(&mut work, 0, high, rec)?;
        }
        Ok(work.into_sorted())
    }
}

fn sort_range(work: &mut WorkArray, low: usize, high: usize, rec: &mut Recorder) -> Result<()> {
    if low >= high {
        return Ok(());
    }
    let mid = low + (high - low + 1) / 2;
    let left_part = work.range(low, mid - 1);
    let right_part = work.range(mid, high);
    let message = format!(
        "Splitting [{}] into [{}] and [{}]",
        fmt_values(&work.values()[low..=high]),
        fmt_values(&left_part),
        fmt_values(&right_part)
    );
    rec.record(
        StepKind::MergeSplit {
            range_low: low,
            range_high: high,
            left_part,
            right_part,
        },
        work.values(),
        message,
    )?;

    sort_range(work, low, mid - 1, rec)?;
    sort_range(work, mid, high, rec)?;
    combine(work, low, mid, high, rec)
}

/// Stable two-pointer merge of `low..mid` and `mid..=high`; ties prefer the left.
fn combine(
    work: &mut WorkArray,
    low: usize,
    mid: usize,
    high: usize,
    rec: &mut Recorder,
) -> Result<()> {
    let left = work.slots(low, mid - 1);
    let right = work.slots(mid, high);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if left[i].0 <= right[j].0 {
            merged.push(left[i]);
            i += 1;
        } else {
            merged.push(right[j]);
            j += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    work.write_slots(low, &merged);

    let left_part: Vec<Value> = left.iter().map(|&(v, _)| v).collect();
    let right_part: Vec<Value> = right.iter().map(|&(v, _)| v).collect();
    let merged_values: Vec<Value> = merged.iter().map(|&(v, _)| v).collect();
    let message = format!(
        "Merging [{}] and [{}] → [{}]",
        fmt_values(&left_part),
        fmt_values(&right_part),
        fmt_values(&merged_values)
    );
    rec.record(
        StepKind::MergeCombine {
            range_low: low,
            range_high: high,
            left_part,
            right_part,
            merged: merged_values,
        },
        work.values(),
        message,
    )
}
