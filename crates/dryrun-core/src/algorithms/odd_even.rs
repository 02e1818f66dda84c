#![forbid(unsafe_code)]

use super::{SortAlgorithm, Sorted, WorkArray};
use crate::catalog::AlgorithmId;
use crate::error::Result;
use crate::recorder::Recorder;
use crate::step::{StepKind, Value};

/// Brick sort: alternating odd and even compare-and-swap phases.
///
/// A round is one odd phase followed by one even phase. Rounds repeat until
/// one makes no swap, bounded by `2n` rounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct OddEven;

/// How the round loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OddEvenOutcome {
    pub rounds: usize,
    /// True when the `2n` ceiling stopped the loop instead of a swap-free round.
    pub hit_ceiling: bool,
}

impl OddEven {
    /// Run and also report how the round loop terminated.
    pub fn run_with_outcome(
        &self,
        input: &[Value],
        rec: &mut Recorder,
    ) -> Result<(Sorted, OddEvenOutcome)> {
        let mut work = WorkArray::new(input);
        let n = work.len();
        let ceiling = 2 * n;
        let mut rounds = 0;

        loop {
            let mut swapped = false;
            for (phase, start) in [("Odd", 1), ("Even", 0)] {
                let mut i = start;
                while i + 1 < n {
                    let (a, b) = (work.get(i), work.get(i + 1));
                    rec.record(
                        StepKind::Compare { indices: [i, i + 1] },
                        work.values(),
                        format!("{phase} phase: comparing {a} and {b}"),
                    )?;
                    if a > b {
                        work.swap(i, i + 1);
                        swapped = true;
                        rec.record(
                            StepKind::Swap { indices: [i, i + 1] },
                            work.values(),
                            format!("{phase} phase: swapping {a} and {b}"),
                        )?;
                    }
                    i += 2;
                }
            }
            rounds += 1;

            if !swapped {
                let outcome = OddEvenOutcome {
                    rounds,
                    hit_ceiling: false,
                };
                return Ok((work.into_sorted(), outcome));
            }
            if rounds >= ceiling {
                tracing::warn!(
                    target: "dryrun.algorithm",
                    rounds,
                    len = n,
                    "odd-even sort stopped at its round ceiling"
                );
                let outcome = OddEvenOutcome {
                    rounds,
                    hit_ceiling: true,
                };
                return Ok((work.into_sorted(), outcome));
            }
        }
    }
}

impl SortAlgorithm for OddEven {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::OddEven
    }

    fn run(&self, input: &[Value], rec: &mut Recorder) -> Result<Sorted> {
        self.run_with_outcome(input, rec).map(|(sorted, _)| sorted)
    }
}
