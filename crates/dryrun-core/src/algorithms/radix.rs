#![forbid(unsafe_code)]

use super::{SortAlgorithm, Sorted, WorkArray, distribution_keys, fmt_values, stable_bucket_order};
use crate::catalog::AlgorithmId;
use crate::config::DistributionConfig;
use crate::error::Result;
use crate::recorder::Recorder;
use crate::step::{StepKind, Value};

/// Least-significant-digit radix sort in the configured base.
///
/// Each pass distributes the array into `base` digit buckets and collects
/// them back in order. Passes are stable, so after the pass for the highest
/// digit of the largest key the array is sorted.
#[derive(Debug, Clone, Default)]
pub struct Radix {
    config: DistributionConfig,
}

impl Radix {
    #[must_use]
    pub fn new(config: DistributionConfig) -> Self {
        Self { config }
    }
}

/// Number of digits of `key` in `base`; zero still has one digit.
fn digit_count(mut key: u64, base: u64) -> usize {
    let mut digits = 1;
    while key >= base {
        key /= base;
        digits += 1;
    }
    digits
}

impl SortAlgorithm for Radix {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::Radix
    }

    fn run(&self, input: &[Value], rec: &mut Recorder) -> Result<Sorted> {
        let mut keys = distribution_keys(input, self.config.max_value)?;
        let mut work = WorkArray::new(input);
        if keys.len() < 2 {
            return Ok(work.into_sorted());
        }

        let base = u64::from(self.config.radix_base);
        let max_key = keys.iter().copied().max().unwrap_or(0);
        let passes = digit_count(max_key, base);
        rec.note(
            work.values(),
            format!("Largest value is {max_key}: {passes} digit pass(es) in base {base}"),
        )?;

        let mut place: u64 = 1;
        for pass in 0..passes {
            let mut tally = vec![0usize; base as usize];
            let mut digits = Vec::with_capacity(keys.len());
            for (index, &key) in keys.iter().enumerate() {
                let digit = ((key / place) % base) as usize;
                tally[digit] += 1;
                digits.push(digit);
                rec.record(
                    StepKind::BucketAssign {
                        value: work.get(index),
                        source_index: index,
                        bucket_index: digit,
                        bucket_len: tally[digit],
                        assigned: index + 1,
                    },
                    work.values(),
                    format!(
                        "Digit at place {place} of {} is {digit}, placing it in bucket {digit}",
                        work.get(index)
                    ),
                )?;
            }

            let order = stable_bucket_order(&digits, tally.len());
            work.reorder(&order);
            keys = order.iter().map(|&k| keys[k]).collect();
            let message = format!(
                "After sorting by digit place {place}: [{}]",
                fmt_values(work.values())
            );
            rec.record(
                StepKind::DigitPass {
                    digit_place: place,
                    counts_tally: tally,
                    order,
                },
                work.values(),
                message,
            )?;

            if pass + 1 < passes {
                // digit_count guarantees base^(passes - 1) <= max_key.
                place = place.saturating_mul(base);
            }
        }

        Ok(work.into_sorted())
    }
}
