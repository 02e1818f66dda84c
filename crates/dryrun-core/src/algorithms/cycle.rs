#![forbid(unsafe_code)]

use super::{SortAlgorithm, Sorted, WorkArray};
use crate::catalog::AlgorithmId;
use crate::error::Result;
use crate::recorder::Recorder;
use crate::step::{StepKind, Value};

/// Cycle sort, minimising writes.
///
/// Each element is routed to its final slot, counted as the number of
/// smaller elements to its right. Placements are recorded as swaps with the
/// cycle-start slot, so the array stays a permutation of the input between
/// steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cycle;

impl SortAlgorithm for Cycle {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::Cycle
    }

    fn run(&self, input: &[Value], rec: &mut Recorder) -> Result<Sorted> {
        let mut work = WorkArray::new(input);
        let n = work.len();

        for start in 0..n.saturating_sub(1) {
            let item = work.get(start);
            let mut pos = target(&work, start);
            if pos == start {
                rec.note(
                    work.values(),
                    format!("{item} at index {start} is already in its final position"),
                )?;
                continue;
            }
            rec.note(
                work.values(),
                format!(
                    "Starting cycle at index {start}: {} smaller elements, so {item} belongs at index {pos}",
                    pos - start
                ),
            )?;

            loop {
                let item = work.get(start);
                while work.get(pos) == item {
                    pos += 1;
                }
                work.swap(start, pos);
                rec.record(
                    StepKind::Swap {
                        indices: [start, pos],
                    },
                    work.values(),
                    format!("Placing {item} at index {pos}, picking up {}", work.get(start)),
                )?;

                pos = target(&work, start);
                if pos == start {
                    rec.note(
                        work.values(),
                        format!("Cycle at index {start} closed with {}", work.get(start)),
                    )?;
                    break;
                }
            }
        }

        Ok(work.into_sorted())
    }
}

/// Final slot of `a[start]`: `start` plus the count of smaller elements after it.
fn target(work: &WorkArray, start: usize) -> usize {
    let item = work.get(start);
    start
        + work.values()[start + 1..]
            .iter()
            .filter(|&&v| v < item)
            .count()
}
