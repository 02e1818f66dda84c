#![forbid(unsafe_code)]

use super::{SortAlgorithm, Sorted, WorkArray, fmt_values};
use crate::catalog::AlgorithmId;
use crate::error::Result;
use crate::recorder::Recorder;
use crate::step::{StepKind, Value};

/// Max-heap sort: bottom-up heap build, then root extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Heap;

impl SortAlgorithm for Heap {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::Heap
    }

    fn run(&self, input: &[Value], rec: &mut Recorder) -> Result<Sorted> {
        let mut work = WorkArray::new(input);
        let n = work.len();
        if n < 2 {
            return Ok(work.into_sorted());
        }

        rec.note(work.values(), "Building max heap from array")?;
        for i in (0..n / 2).rev() {
            sift_down(&mut work, i, n, rec)?;
        }
        rec.note(
            work.values(),
            format!("Max heap built: [{}]", fmt_values(work.values())),
        )?;

        for end in (1..n).rev() {
            work.swap(0, end);
            rec.record(
                StepKind::Swap { indices: [0, end] },
                work.values(),
                format!(
                    "Swapped root ({}) with last unsorted element at index {end}, heapify remaining part",
                    work.get(end)
                ),
            )?;
            sift_down(&mut work, 0, end, rec)?;
        }

        Ok(work.into_sorted())
    }
}

/// Restore the max-heap property below `root` within `0..size`.
fn sift_down(work: &mut WorkArray, root: usize, size: usize, rec: &mut Recorder) -> Result<()> {
    let mut parent = root;
    loop {
        let mut largest = parent;
        let (left, right) = (2 * parent + 1, 2 * parent + 2);
        if left < size && work.get(left) > work.get(largest) {
            largest = left;
        }
        if right < size && work.get(right) > work.get(largest) {
            largest = right;
        }
        if largest == parent {
            return Ok(());
        }

        work.swap(parent, largest);
        rec.record(
            StepKind::HeapifySwap {
                parent,
                child: largest,
            },
            work.values(),
            format!(
                "Swapped {} with {} to maintain heap property",
                work.get(largest),
                work.get(parent)
            ),
        )?;
        parent = largest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::{assert_permutations, count, run};

    #[test]
    fn builds_heap_before_extracting() {
        let input = [5.0, 3.0, 8.0, 4.0, 2.0];
        let (sorted, steps) = run(&Heap, &input);

        assert_eq!(sorted.values, vec![2.0, 3.0, 4.0, 5.0, 8.0]);
        assert_eq!(steps[0].message, "Building max heap from array");
        // i = 1: 3 < 4, swap with left child; i = 0: 5 < 8, swap with right child.
        assert_eq!(steps[1].kind, StepKind::HeapifySwap { parent: 1, child: 3 });
        assert_eq!(steps[2].kind, StepKind::HeapifySwap { parent: 0, child: 2 });
        assert_eq!(steps[3].message, "Max heap built: [8, 4, 5, 3, 2]");
        assert_eq!(steps[4].kind, StepKind::Swap { indices: [0, 4] });
        assert_permutations(&input, &steps);
    }

    #[test]
    fn one_root_swap_per_extraction() {
        let (_, steps) = run(&Heap, &[5.0, 3.0, 8.0, 4.0, 2.0, 7.0]);
        assert_eq!(count(&steps, |k| matches!(k, StepKind::Swap { .. })), 5);
    }

    #[test]
    fn heap_property_holds_after_build() {
        let (_, steps) = run(&Heap, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let built = steps
            .iter()
            .find(|s| s.message.starts_with("Max heap built"))
            .unwrap();
        let a = &built.snapshot;
        for i in 0..a.len() {
            for child in [2 * i + 1, 2 * i + 2] {
                if child < a.len() {
                    assert!(a[i] >= a[child], "heap violated at {i}: {a:?}");
                }
            }
        }
    }
}
