#![forbid(unsafe_code)]

use super::{SortAlgorithm, Sorted, WorkArray};
use crate::catalog::AlgorithmId;
use crate::error::Result;
use crate::recorder::Recorder;
use crate::step::{StepKind, Value};

/// Key insertion into the sorted prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct Insertion;

impl SortAlgorithm for Insertion {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::Insertion
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

/// Insertion-sort `low..=high` in place. Shared with bucket sort.
///
/// The key travels left by adjacent exchanges, so every snapshot stays a
/// permutation of the input while the larger neighbour shifts right.
pub(crate) fn sort_range(
    work: &mut WorkArray,
    low: usize,
    high: usize,
    rec: &mut Recorder,
) -> Result<()> {
    for i in low + 1..=high {
        let key = work.get(i);
        rec.record(
            StepKind::KeyPick { index: i },
            work.values(),
            format!("Picking key = {key} for insertion"),
        )?;

        let mut j = i;
        while j > low && work.get(j - 1) > key {
            let moved = work.get(j - 1);
            work.swap(j - 1, j);
            rec.record(
                StepKind::Shift { from: j - 1, to: j },
                work.values(),
                format!("Since {moved} > {key}, shifting {moved} right"),
            )?;
            j -= 1;
        }

        rec.record(
            StepKind::KeyPlace { index: j },
            work.values(),
            format!("Placing key = {key} at position {j}"),
        )?;
    }
    Ok(())
}
