#![forbid(unsafe_code)]

use super::{SortAlgorithm, Sorted, WorkArray};
use crate::catalog::AlgorithmId;
use crate::error::Result;
use crate::recorder::Recorder;
use crate::step::{StepKind, Value};

/// Lomuto quicksort: the pivot is always the last element of the range.
///
/// Already-sorted input degrades to O(n²); that is the textbook behavior
/// this dry run shows.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quick;

impl SortAlgorithm for Quick {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::Quick
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
    let p = partition(work, low, high, rec)?;
    if p > low {
        sort_range(work, low, p - 1, rec)?;
    }
    sort_range(work, p + 1, high, rec)
}

/// Partition `low..=high` around `a[high]`; returns the pivot's resting index.
fn partition(work: &mut WorkArray, low: usize, high: usize, rec: &mut Recorder) -> Result<usize> {
    let pivot = work.get(high);
    rec.record(
        StepKind::PartitionPivot {
            pivot_index: high,
            range_low: low,
            range_high: high,
        },
        work.values(),
        format!("Choosing pivot = {pivot} at index {high}"),
    )?;

    let mut store = low;
    for j in low..high {
        let value = work.get(j);
        rec.record(
            StepKind::Compare { indices: [j, high] },
            work.values(),
            format!("Comparing {value} with pivot {pivot}"),
        )?;
        if value <= pivot {
            if store != j {
                work.swap(store, j);
                rec.record(
                    StepKind::Swap {
                        indices: [store, j],
                    },
                    work.values(),
                    format!("Since {value} ≤ {pivot}, swapping positions {store} and {j}"),
                )?;
            } else {
                rec.note(
                    work.values(),
                    format!("Since {value} ≤ {pivot}, {value} stays at index {j}"),
                )?;
            }
            store += 1;
        }
    }

    if store != high {
        work.swap(store, high);
    }
    rec.record(
        StepKind::PivotPlaced {
            from: high,
            to: store,
        },
        work.values(),
        format!("Placing pivot {pivot} at index {store}"),
    )?;
    Ok(store)
}
