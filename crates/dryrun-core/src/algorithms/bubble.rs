#![forbid(unsafe_code)]

use super::{SortAlgorithm, Sorted, WorkArray};
use crate::catalog::AlgorithmId;
use crate::error::Result;
use crate::recorder::Recorder;
use crate::step::{StepKind, Value};

/// Adjacent compare-and-swap passes. Equal neighbours never swap.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bubble;

impl SortAlgorithm for Bubble {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::Bubble
    }

    fn run(&self, input: &[Value], rec: &mut Recorder) -> Result<Sorted> {
        let mut work = WorkArray::new(input);
        let n = work.len();

        for pass in 0..n.saturating_sub(1) {
            for j in 0..n - 1 - pass {
                let (a, b) = (work.get(j), work.get(j + 1));
                rec.record(
                    StepKind::Compare { indices: [j, j + 1] },
                    work.values(),
                    format!("Comparing {a} and {b}"),
                )?;
                if a > b {
                    work.swap(j, j + 1);
                    rec.record(
                        StepKind::Swap { indices: [j, j + 1] },
                        work.values(),
                        format!("Since {a} > {b}, swapping them"),
                    )?;
                }
            }
        }

        Ok(work.into_sorted())
    }
}
