#![forbid(unsafe_code)]

//! Structural checks over a finished trace.
//!
//! [`check_steps`] replays the [`Conservation`] rule of every step against the
//! previous snapshot (the original input for step 0), so a trace that passes
//! never invents, loses or duplicates a value. [`check_origins`] confirms the
//! origin map agrees with the final array.
//!
//! The builder runs both in debug builds; the codec runs both on every decode.

use std::cmp::Ordering;

use thiserror::Error;

use crate::step::{Conservation, Step, Value};

/// First broken rule found in a trace.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("step {step}: {reason}")]
pub struct InvariantViolation {
    /// Step index, or the step count for trace-level problems.
    pub step: usize,
    pub reason: String,
}

fn violation(step: usize, reason: impl Into<String>) -> InvariantViolation {
    InvariantViolation {
        step,
        reason: reason.into(),
    }
}

fn sorted_copy(values: &[Value]) -> Vec<Value> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

fn is_ascending(values: &[Value]) -> bool {
    values
        .windows(2)
        .all(|w| w[0].total_cmp(&w[1]) != Ordering::Greater)
}

/// Check every step of a trace built from `original`.
pub fn check_steps(original: &[Value], steps: &[Step]) -> Result<(), InvariantViolation> {
    let n = original.len();
    let Some(last) = steps.last() else {
        return Err(violation(0, "trace has no steps"));
    };
    if !last.is_done() {
        return Err(violation(steps.len() - 1, "last step is not done"));
    }

    let multiset = sorted_copy(original);
    let mut prev = original;
    for (index, step) in steps.iter().enumerate() {
        let snapshot = step.snapshot.as_slice();
        if snapshot.len() != n {
            return Err(violation(
                index,
                format!("snapshot has {} values, expected {n}", snapshot.len()),
            ));
        }
        if sorted_copy(snapshot) != multiset {
            return Err(violation(index, "snapshot is not a permutation of the input"));
        }
        if step.is_done() && index + 1 != steps.len() {
            return Err(violation(index, "done step before the end of the trace"));
        }
        check_conservation(index, step, prev)?;
        prev = snapshot;
    }
    Ok(())
}

fn check_conservation(index: usize, step: &Step, prev: &[Value]) -> Result<(), InvariantViolation> {
    let n = prev.len();
    let snapshot = step.snapshot.as_slice();
    let in_bounds = |slots: &[usize]| slots.iter().all(|&s| s < n);

    match step.kind.conservation() {
        Conservation::Unchanged => {
            if snapshot != prev {
                return Err(violation(index, "array changed on a read-only step"));
            }
        }
        Conservation::Transposition { i, j } => {
            if !in_bounds(&[i, j]) {
                return Err(violation(index, format!("swap [{i}, {j}] out of bounds")));
            }
            let mut expected = prev.to_vec();
            expected.swap(i, j);
            if snapshot != expected.as_slice() {
                return Err(violation(index, format!("snapshot is not prev with {i} and {j} exchanged")));
            }
        }
        Conservation::Rotation { from, to } => {
            if !in_bounds(&[from, to]) {
                return Err(violation(index, format!("shift {from} -> {to} out of bounds")));
            }
            let mut expected = prev.to_vec();
            let moved = expected.remove(from);
            expected.insert(to, moved);
            if snapshot != expected.as_slice() {
                return Err(violation(index, format!("snapshot is not prev with {from} moved to {to}")));
            }
        }
        Conservation::Reorder { order } => {
            let mut seen = vec![false; n];
            if order.len() != n {
                return Err(violation(index, "reorder does not cover the array"));
            }
            for &k in order {
                if k >= n || std::mem::replace(&mut seen[k], true) {
                    return Err(violation(index, "reorder is not a permutation of 0..n"));
                }
            }
            if order.iter().zip(snapshot).any(|(&k, &v)| prev[k] != v) {
                return Err(violation(index, "snapshot does not follow the recorded order"));
            }
        }
        Conservation::RangeRewrite { low, high } => {
            if low > high || high >= n {
                return Err(violation(index, format!("range {low}..={high} out of bounds")));
            }
            let outside_kept = (0..n)
                .filter(|k| !(low..=high).contains(k))
                .all(|k| snapshot[k] == prev[k]);
            if !outside_kept {
                return Err(violation(index, "values changed outside the rewritten range"));
            }
            if sorted_copy(&snapshot[low..=high]) != sorted_copy(&prev[low..=high]) {
                return Err(violation(index, "rewritten range is not a rearrangement of itself"));
            }
        }
        Conservation::Terminal => {
            let crate::step::StepKind::Done { final_array } = &step.kind else {
                return Err(violation(index, "terminal rule on a non-done step"));
            };
            if final_array.as_slice() != snapshot || snapshot != prev {
                return Err(violation(index, "done step does not repeat the final array"));
            }
            if !is_ascending(final_array) {
                return Err(violation(index, "final array is not ascending"));
            }
        }
    }
    Ok(())
}

/// Check that `origins` maps every final slot back to an equal input value.
pub fn check_origins(
    original: &[Value],
    final_array: &[Value],
    origins: &[usize],
) -> Result<(), InvariantViolation> {
    let n = original.len();
    if origins.len() != n || final_array.len() != n {
        return Err(violation(n, "origin map does not cover the array"));
    }
    let mut seen = vec![false; n];
    for (slot, &origin) in origins.iter().enumerate() {
        if origin >= n || std::mem::replace(&mut seen[origin], true) {
            return Err(violation(n, format!("origin {origin} at slot {slot} is not unique")));
        }
        if original[origin] != final_array[slot] {
            return Err(violation(
                n,
                format!("slot {slot} holds {} but origin {origin} was {}", final_array[slot], original[origin]),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;

    fn step(kind: StepKind, snapshot: &[Value]) -> Step {
        Step::new(kind, snapshot.to_vec(), "")
    }

    #[test]
    fn accepts_a_swap_then_done() {
        let original = [2.0, 1.0];
        let steps = vec![
            step(StepKind::Compare { indices: [0, 1] }, &[2.0, 1.0]),
            step(StepKind::Swap { indices: [0, 1] }, &[1.0, 2.0]),
            Step::done(vec![1.0, 2.0]),
        ];
        assert_eq!(check_steps(&original, &steps), Ok(()));
    }

    #[test]
    fn rejects_missing_done() {
        let steps = vec![step(StepKind::Note, &[1.0])];
        assert_eq!(check_steps(&[1.0], &steps).unwrap_err().step, 0);
        assert!(check_steps(&[1.0], &[]).is_err());
    }

    #[test]
    fn rejects_invented_value() {
        let steps = vec![
            step(StepKind::Swap { indices: [0, 1] }, &[1.0, 1.0]),
            Step::done(vec![1.0, 1.0]),
        ];
        let err = check_steps(&[2.0, 1.0], &steps).unwrap_err();
        assert_eq!(err.step, 0);
        assert!(err.reason.contains("permutation"));
    }

    #[test]
    fn rejects_compare_that_moves_values() {
        let steps = vec![
            step(StepKind::Compare { indices: [0, 1] }, &[1.0, 2.0]),
            Step::done(vec![1.0, 2.0]),
        ];
        let err = check_steps(&[2.0, 1.0], &steps).unwrap_err();
        assert!(err.reason.contains("read-only"));
    }

    #[test]
    fn rotation_matches_remove_insert() {
        let original = [3.0, 1.0, 2.0];
        let steps = vec![
            step(StepKind::Shift { from: 0, to: 2 }, &[1.0, 2.0, 3.0]),
            Step::done(vec![1.0, 2.0, 3.0]),
        ];
        assert_eq!(check_steps(&original, &steps), Ok(()));
    }

    #[test]
    fn reorder_must_be_a_permutation() {
        let kind = StepKind::BucketConcat {
            order: vec![1, 1],
            bucket_sizes: vec![2],
        };
        let steps = vec![step(kind, &[1.0, 1.0]), Step::done(vec![1.0, 1.0])];
        assert!(check_steps(&[1.0, 1.0], &steps).is_err());
    }

    #[test]
    fn origins_must_point_at_equal_values() {
        assert_eq!(check_origins(&[2.0, 1.0], &[1.0, 2.0], &[1, 0]), Ok(()));
        assert!(check_origins(&[2.0, 1.0], &[1.0, 2.0], &[0, 1]).is_err());
        assert!(check_origins(&[2.0, 1.0], &[1.0, 2.0], &[1, 1]).is_err());
    }
}
