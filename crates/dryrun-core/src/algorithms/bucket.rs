#![forbid(unsafe_code)]

use super::{
    SortAlgorithm, Sorted, WorkArray, distribution_keys, fmt_values, insertion, stable_bucket_order,
};
use crate::catalog::AlgorithmId;
use crate::config::DistributionConfig;
use crate::error::Result;
use crate::recorder::Recorder;
use crate::step::{StepKind, Value};

/// Bucket sort with equal-width buckets over `0..=max_value`.
///
/// Elements are scattered into `bucket_count` buckets, concatenated back, and
/// each bucket's range is then insertion-sorted in place.
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    config: DistributionConfig,
}

impl Bucket {
    #[must_use]
    pub fn new(config: DistributionConfig) -> Self {
        Self { config }
    }

    /// `floor(key * bucket_count / (max_value + 1))`, always `< bucket_count`.
    fn bucket_of(&self, key: u64) -> usize {
        let count = self.config.bucket_count as u128;
        let span = u128::from(self.config.max_value) + 1;
        (u128::from(key) * count / span) as usize
    }
}

impl SortAlgorithm for Bucket {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::Bucket
    }

    fn run(&self, input: &[Value], rec: &mut Recorder) -> Result<Sorted> {
        let keys = distribution_keys(input, self.config.max_value)?;
        let mut work = WorkArray::new(input);
        if keys.len() < 2 {
            return Ok(work.into_sorted());
        }

        let bucket_count = self.config.bucket_count;
        rec.note(
            work.values(),
            format!(
                "Scattering into {bucket_count} buckets over 0..={}",
                self.config.max_value
            ),
        )?;

        let mut sizes = vec![0usize; bucket_count];
        let mut buckets = Vec::with_capacity(keys.len());
        for (index, &key) in keys.iter().enumerate() {
            let bucket = self.bucket_of(key);
            sizes[bucket] += 1;
            buckets.push(bucket);
            rec.record(
                StepKind::BucketAssign {
                    value: work.get(index),
                    source_index: index,
                    bucket_index: bucket,
                    bucket_len: sizes[bucket],
                    assigned: index + 1,
                },
                work.values(),
                format!("Placing {} into bucket {bucket}", work.get(index)),
            )?;
        }

        let order = stable_bucket_order(&buckets, bucket_count);
        work.reorder(&order);
        let message = format!(
            "Concatenating buckets: [{}]",
            fmt_values(work.values())
        );
        rec.record(
            StepKind::BucketConcat {
                order,
                bucket_sizes: sizes.clone(),
            },
            work.values(),
            message,
        )?;

        let mut low = 0;
        for (bucket, &size) in sizes.iter().enumerate() {
            if size >= 2 {
                let high = low + size - 1;
                rec.note(
                    work.values(),
                    format!(
                        "Sorting bucket {bucket} [{}] with insertion sort",
                        fmt_values(&work.values()[low..=high])
                    ),
                )?;
                insertion::sort_range(&mut work, low, high, rec)?;
            }
            low += size;
        }

        Ok(work.into_sorted())
    }
}
