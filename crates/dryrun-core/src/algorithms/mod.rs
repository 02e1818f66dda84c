#![forbid(unsafe_code)]

//! Algorithm modules.
//!
//! Each algorithm is a [`SortAlgorithm`]: it copies the input into a private
//! [`WorkArray`], sorts the copy while emitting one step per meaningful
//! operation into the shared [`Recorder`], and returns the sorted values with
//! the original index of every element ([`Sorted::origins`]).
//!
//! # Contract
//!
//! 1. The caller's input is never mutated.
//! 2. Every snapshot handed to the recorder is a permutation of the input.
//! 3. Inputs of length 0 or 1 emit no steps.
//! 4. A fixed input always produces the same steps (no randomness).
//!
//! Distribution sorts additionally require non-negative integers no larger
//! than [`DistributionConfig::max_value`]; values above it are reported as
//! [`TraceError::BucketRange`] before any step is emitted.

use crate::catalog::AlgorithmId;
use crate::config::DistributionConfig;
use crate::error::{Result, TraceError};
use crate::recorder::Recorder;
use crate::step::Value;

mod bubble;
mod bucket;
mod counting;
mod cycle;
mod heap;
mod insertion;
mod merge;
mod odd_even;
mod quick;
mod radix;
mod selection;

pub use bubble::Bubble;
pub use bucket::Bucket;
pub use counting::Counting;
pub use cycle::Cycle;
pub use heap::Heap;
pub use insertion::Insertion;
pub use merge::Merge;
pub use odd_even::{OddEven, OddEvenOutcome};
pub use quick::Quick;
pub use radix::Radix;
pub use selection::Selection;

/// A sorting strategy that records its own dry run.
pub trait SortAlgorithm {
    fn id(&self) -> AlgorithmId;

    /// Sort a private copy of `input`, emitting steps into `recorder`.
    fn run(&self, input: &[Value], recorder: &mut Recorder) -> Result<Sorted>;
}

/// Output of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Sorted {
    /// Input values in ascending order.
    pub values: Vec<Value>,
    /// `origins[k]` is the input index of the element now at position `k`.
    pub origins: Vec<usize>,
}

/// Resolve the algorithm module for `id`.
#[must_use]
pub fn for_id(id: AlgorithmId, config: &DistributionConfig) -> Box<dyn SortAlgorithm> {
    match id {
        AlgorithmId::Bubble => Box::new(Bubble),
        AlgorithmId::Selection => Box::new(Selection),
        AlgorithmId::Insertion => Box::new(Insertion),
        AlgorithmId::OddEven => Box::new(OddEven),
        AlgorithmId::Quick => Box::new(Quick),
        AlgorithmId::Merge => Box::new(Merge),
        AlgorithmId::Heap => Box::new(Heap),
        AlgorithmId::Cycle => Box::new(Cycle),
        AlgorithmId::Counting => Box::new(Counting::new(config.clone())),
        AlgorithmId::Radix => Box::new(Radix::new(config.clone())),
        AlgorithmId::Bucket => Box::new(Bucket::new(config.clone())),
    }
}

/// Private working copy that tracks where every element came from.
#[derive(Debug, Clone)]
pub(crate) struct WorkArray {
    values: Vec<Value>,
    origins: Vec<usize>,
}

impl WorkArray {
    pub(crate) fn new(input: &[Value]) -> Self {
        Self {
            values: input.to_vec(),
            origins: (0..input.len()).collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn get(&self, index: usize) -> Value {
        self.values[index]
    }

    pub(crate) fn values(&self) -> &[Value] {
        &self.values
    }

    pub(crate) fn range(&self, low: usize, high: usize) -> Vec<Value> {
        self.values[low..=high].to_vec()
    }

    pub(crate) fn swap(&mut self, i: usize, j: usize) {
        self.values.swap(i, j);
        self.origins.swap(i, j);
    }

    /// Rearrange so that slot `k` holds the element previously at `order[k]`.
    pub(crate) fn reorder(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.values.len());
        self.values = order.iter().map(|&k| self.values[k]).collect();
        self.origins = order.iter().map(|&k| self.origins[k]).collect();
    }

    /// Overwrite `low..low + slots.len()` with `(value, origin)` pairs.
    pub(crate) fn write_slots(&mut self, low: usize, slots: &[(Value, usize)]) {
        for (offset, &(value, origin)) in slots.iter().enumerate() {
            self.values[low + offset] = value;
            self.origins[low + offset] = origin;
        }
    }

    pub(crate) fn slots(&self, low: usize, high: usize) -> Vec<(Value, usize)> {
        (low..=high)
            .map(|k| (self.values[k], self.origins[k]))
            .collect()
    }

    pub(crate) fn into_sorted(self) -> Sorted {
        Sorted {
            values: self.values,
            origins: self.origins,
        }
    }
}

/// Stable order that groups slots by `bucket_of`, buckets in ascending order.
pub(crate) fn stable_bucket_order(buckets: &[usize], bucket_count: usize) -> Vec<usize> {
    let mut grouped: Vec<Vec<usize>> = vec![Vec::new(); bucket_count];
    for (slot, &bucket) in buckets.iter().enumerate() {
        grouped[bucket].push(slot);
    }
    grouped.concat()
}

/// Validate distribution-sort input and convert it to integer keys.
pub(crate) fn distribution_keys(input: &[Value], max_value: u64) -> Result<Vec<u64>> {
    input
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            if !(value >= 0.0) || value.fract() != 0.0 {
                return Err(TraceError::invalid_at(
                    index,
                    format!("{value} is not a non-negative integer"),
                ));
            }
            if value > max_value as f64 {
                return Err(TraceError::BucketRange {
                    index,
                    value,
                    max: max_value,
                });
            }
            Ok(value as u64)
        })
        .collect()
}

/// `[5, 3, 8]` rendered as `5, 3, 8`.
pub(crate) fn fmt_values(values: &[Value]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::step::{Step, StepKind};

    pub(crate) fn run(algo: &dyn SortAlgorithm, input: &[Value]) -> (Sorted, Vec<Step>) {
        let mut rec = Recorder::new();
        let sorted = algo.run(input, &mut rec).expect("run should succeed");
        (sorted, rec.drain().expect("first drain"))
    }

    pub(crate) fn labels(steps: &[Step]) -> Vec<&'static str> {
        steps.iter().map(|s| s.kind.label()).collect()
    }

    pub(crate) fn assert_permutations(input: &[Value], steps: &[Step]) {
        let mut expected = input.to_vec();
        expected.sort_by(f64::total_cmp);
        for (i, step) in steps.iter().enumerate() {
            let mut got = step.snapshot.clone();
            got.sort_by(f64::total_cmp);
            assert_eq!(got, expected, "step {i} ({:?}) lost or invented a value", step.kind);
        }
    }

    pub(crate) fn count(steps: &[Step], pred: impl Fn(&StepKind) -> bool) -> usize {
        steps.iter().filter(|s| pred(&s.kind)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_array_tracks_origins() {
        let mut work = WorkArray::new(&[3.0, 1.0, 2.0]);
        work.swap(0, 1);
        work.reorder(&[0, 2, 1]);
        let sorted = work.into_sorted();
        assert_eq!(sorted.values, vec![1.0, 2.0, 3.0]);
        assert_eq!(sorted.origins, vec![1, 2, 0]);
    }

    #[test]
    fn stable_bucket_order_keeps_input_order_within_bucket() {
        assert_eq!(stable_bucket_order(&[1, 0, 1, 0], 2), vec![1, 3, 0, 2]);
    }

    #[test]
    fn distribution_keys_reject_negative_and_fractional() {
        assert!(matches!(
            distribution_keys(&[1.0, -2.0], 10),
            Err(TraceError::InvalidInput { index: Some(1), .. })
        ));
        assert!(matches!(
            distribution_keys(&[1.5], 10),
            Err(TraceError::InvalidInput { index: Some(0), .. })
        ));
    }

    #[test]
    fn distribution_keys_report_out_of_range() {
        assert_eq!(
            distribution_keys(&[3.0, 11.0], 10),
            Err(TraceError::BucketRange {
                index: 1,
                value: 11.0,
                max: 10
            })
        );
        assert_eq!(distribution_keys(&[0.0, 10.0], 10), Ok(vec![0, 10]));
    }

    #[test]
    fn values_format_without_trailing_zeroes() {
        assert_eq!(fmt_values(&[5.0, 3.5, -1.0]), "5, 3.5, -1");
    }

    #[test]
    fn every_id_resolves_to_its_module() {
        let config = DistributionConfig::default();
        for id in AlgorithmId::ALL {
            assert_eq!(for_id(id, &config).id(), id);
        }
    }
}
