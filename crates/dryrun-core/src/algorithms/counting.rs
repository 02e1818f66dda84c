#![forbid(unsafe_code)]

use super::{SortAlgorithm, Sorted, WorkArray, distribution_keys, fmt_values, stable_bucket_order};
use crate::catalog::AlgorithmId;
use crate::config::DistributionConfig;
use crate::error::Result;
use crate::recorder::Recorder;
use crate::step::{StepKind, Value};

/// Stable counting sort over `0..=max(input)`.
///
/// One tally slot per possible value: every element is counted into the slot
/// equal to its value, then the tallies are replayed in ascending order.
#[derive(Debug, Clone, Default)]
pub struct Counting {
    config: DistributionConfig,
}

impl Counting {
    #[must_use]
    pub fn new(config: DistributionConfig) -> Self {
        Self { config }
    }
}

impl SortAlgorithm for Counting {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::Counting
    }

    fn run(&self, input: &[Value], rec: &mut Recorder) -> Result<Sorted> {
        let keys = distribution_keys(input, self.config.max_value)?;
        let mut work = WorkArray::new(input);
        if keys.len() < 2 {
            return Ok(work.into_sorted());
        }

        let max_key = keys.iter().copied().max().unwrap_or(0) as usize;
        rec.note(
            work.values(),
            format!("Counting occurrences over the range 0..={max_key}"),
        )?;

        let mut counts = vec![0usize; max_key + 1];
        let mut buckets = Vec::with_capacity(keys.len());
        for (index, &key) in keys.iter().enumerate() {
            let slot = key as usize;
            counts[slot] += 1;
            buckets.push(slot);
            rec.record(
                StepKind::BucketAssign {
                    value: work.get(index),
                    source_index: index,
                    bucket_index: slot,
                    bucket_len: counts[slot],
                    assigned: index + 1,
                },
                work.values(),
                format!(
                    "Counting {} (count of {slot} is now {})",
                    work.get(index),
                    counts[slot]
                ),
            )?;
        }

        let order = stable_bucket_order(&buckets, counts.len());
        work.reorder(&order);
        let message = format!("Rebuilding array from counts: [{}]", fmt_values(work.values()));
        rec.record(
            StepKind::BucketConcat {
                order,
                bucket_sizes: counts,
            },
            work.values(),
            message,
        )?;

        Ok(work.into_sorted())
    }
}
