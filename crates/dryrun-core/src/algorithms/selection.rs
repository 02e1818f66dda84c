#![forbid(unsafe_code)]

use super::{SortAlgorithm, Sorted, WorkArray};
use crate::catalog::AlgorithmId;
use crate::error::Result;
use crate::recorder::Recorder;
use crate::step::{StepKind, Value};

/// Running-minimum scan of the unsorted suffix, one swap per pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Selection;

impl SortAlgorithm for Selection {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::Selection
    }

    fn run(&self, input: &[Value], rec: &mut Recorder) -> Result<Sorted> {
        let mut work = WorkArray::new(input);
        let n = work.len();

        for i in 0..n.saturating_sub(1) {
            let mut min = i;
            rec.record(
                StepKind::MinCandidate { index: i },
                work.values(),
                format!(
                    "Starting pass {}, assuming index {i} ({}) is the minimum",
                    i + 1,
                    work.get(i)
                ),
            )?;

            for j in i + 1..n {
                rec.record(
                    StepKind::Compare { indices: [min, j] },
                    work.values(),
                    format!(
                        "Comparing {} with current minimum {}",
                        work.get(j),
                        work.get(min)
                    ),
                )?;
                if work.get(j) < work.get(min) {
                    min = j;
                    rec.record(
                        StepKind::MinCandidate { index: min },
                        work.values(),
                        format!("New minimum found: {} at index {min}", work.get(min)),
                    )?;
                }
            }

            if min != i {
                work.swap(i, min);
                rec.record(
                    StepKind::Swap { indices: [i, min] },
                    work.values(),
                    format!("Swapping {} and {}", work.get(i), work.get(min)),
                )?;
            } else {
                rec.note(
                    work.values(),
                    format!("No swap needed, {} is already the smallest", work.get(i)),
                )?;
            }
        }

        Ok(work.into_sorted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::{assert_permutations, count, run};

    #[test]
    fn one_swap_or_note_per_pass() {
        let input = [5.0, 3.0, 8.0, 4.0, 2.0];
        let (sorted, steps) = run(&Selection, &input);

        assert_eq!(sorted.values, vec![2.0, 3.0, 4.0, 5.0, 8.0]);
        let closers = count(&steps, |k| matches!(k, StepKind::Swap { .. } | StepKind::Note));
        assert_eq!(closers, 4);
        assert_permutations(&input, &steps);
    }

    #[test]
    fn pass_starts_with_assumed_minimum() {
        let (_, steps) = run(&Selection, &[5.0, 3.0, 8.0]);
        assert_eq!(steps[0].kind, StepKind::MinCandidate { index: 0 });
        assert_eq!(
            steps[0].message,
            "Starting pass 1, assuming index 0 (5) is the minimum"
        );
        assert_eq!(steps[1].kind, StepKind::Compare { indices: [0, 1] });
        assert_eq!(steps[2].kind, StepKind::MinCandidate { index: 1 });
        assert_eq!(steps[3].kind, StepKind::Compare { indices: [1, 2] });
        assert_eq!(steps[4].kind, StepKind::Swap { indices: [0, 1] });
    }

    #[test]
    fn sorted_input_reports_no_swap_needed() {
        let (_, steps) = run(&Selection, &[1.0, 2.0]);
        let last = steps.last().unwrap();
        assert_eq!(last.kind, StepKind::Note);
        assert_eq!(last.message, "No swap needed, 1 is already the smallest");
    }
}
