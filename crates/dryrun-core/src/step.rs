#![forbid(unsafe_code)]

//! Step model: the vocabulary describing one observable operation.
//!
//! A [`Step`] pairs a [`StepKind`] with the full array state *after* the
//! operation and a human-readable message. Steps are pure data; the only
//! behavior here derives views of a step (highlights, conservation rule)
//! from its own fields, so a renderer never has to re-run the algorithm.
//!
//! # Invariants
//!
//! 1. `snapshot.len()` equals the input length for every step of a trace.
//! 2. `snapshot` is a permutation of the input multiset.
//! 3. The last step of a trace is [`StepKind::Done`].
//!
//! # Wire format
//!
//! Steps serialize as `{"kind": {"type": "...", ...}, "snapshot": [...], "message": "..."}`
//! with snake_case variant tags.

use serde::{Deserialize, Serialize};

/// A totally ordered scalar. Only finite values are accepted by the builder.
pub type Value = f64;

/// One recorded operation and the array state it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    /// Array state after this operation.
    pub snapshot: Vec<Value>,
    pub message: String,
}

/// The operation a step describes.
///
/// Index ranges (`range_low..=range_high`) are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepKind {
    /// Two slots are being compared.
    Compare { indices: [usize; 2] },
    /// Two slots exchanged values.
    Swap { indices: [usize; 2] },
    /// One element moved from `from` to `to`, shifting the slots between.
    Shift { from: usize, to: usize },
    /// Lomuto partition announced its pivot (the last slot of the range).
    PartitionPivot {
        pivot_index: usize,
        range_low: usize,
        range_high: usize,
    },
    /// The pivot moved to its resting slot.
    PivotPlaced { from: usize, to: usize },
    /// A range was split into two halves before recursing.
    MergeSplit {
        range_low: usize,
        range_high: usize,
        left_part: Vec<Value>,
        right_part: Vec<Value>,
    },
    /// Two sorted halves were merged back into `range_low..=range_high`.
    MergeCombine {
        range_low: usize,
        range_high: usize,
        left_part: Vec<Value>,
        right_part: Vec<Value>,
        merged: Vec<Value>,
    },
    /// A sift-down exchanged a parent with its larger child.
    HeapifySwap { parent: usize, child: usize },
    /// An element was placed into a bucket. The array is unchanged.
    BucketAssign {
        value: Value,
        source_index: usize,
        bucket_index: usize,
        /// Size of the target bucket after this assignment.
        bucket_len: usize,
        /// Elements assigned so far in this pass, including this one.
        assigned: usize,
    },
    /// Buckets were concatenated back into the array.
    BucketConcat {
        /// `snapshot[k] == previous[order[k]]`.
        order: Vec<usize>,
        bucket_sizes: Vec<usize>,
    },
    /// A radix pass redistributed the array by one digit.
    DigitPass {
        digit_place: u64,
        counts_tally: Vec<usize>,
        /// `snapshot[k] == previous[order[k]]`.
        order: Vec<usize>,
    },
    /// Insertion sort lifted the key at `index`.
    KeyPick { index: usize },
    /// Insertion sort dropped the key into `index`.
    KeyPlace { index: usize },
    /// Selection sort's current minimum for this pass.
    MinCandidate { index: usize },
    /// Message-only step; the array is unchanged.
    Note,
    /// Terminal step carrying the sorted array.
    Done { final_array: Vec<Value> },
}

/// How a step's snapshot relates to the previous snapshot.
///
/// Each rule is enough to confirm that no value was added or lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conservation<'a> {
    /// Snapshot equals the previous snapshot.
    Unchanged,
    /// Two slots exchanged.
    Transposition { i: usize, j: usize },
    /// One element relocated; the slots between shifted by one.
    Rotation { from: usize, to: usize },
    /// Whole array reordered by a permutation of `0..n`.
    Reorder { order: &'a [usize] },
    /// A contiguous range was rewritten with a rearrangement of itself.
    RangeRewrite { low: usize, high: usize },
    /// Terminal step; snapshot equals `final_array`.
    Terminal,
}

/// What a renderer should emphasize for one step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Highlights {
    pub comparing: Vec<usize>,
    pub swapped: Vec<usize>,
    pub pivot: Option<usize>,
    /// Active inclusive range.
    pub range: Option<(usize, usize)>,
    pub key: Option<usize>,
    pub minimum: Option<usize>,
    pub bucket: Option<usize>,
    pub sorted: bool,
}

/// Visual role of one slot, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Comparing,
    Swapped,
    Pivot,
    Key,
    Minimum,
    InRange,
    Sorted,
}

impl Highlights {
    /// Role of slot `index`; comparisons win over swaps, as in the dry-run view.
    #[must_use]
    pub fn role(&self, index: usize) -> Option<Role> {
        if self.comparing.contains(&index) {
            Some(Role::Comparing)
        } else if self.swapped.contains(&index) {
            Some(Role::Swapped)
        } else if self.pivot == Some(index) {
            Some(Role::Pivot)
        } else if self.key == Some(index) {
            Some(Role::Key)
        } else if self.minimum == Some(index) {
            Some(Role::Minimum)
        } else if self.sorted {
            Some(Role::Sorted)
        } else if self
            .range
            .is_some_and(|(low, high)| (low..=high).contains(&index))
        {
            Some(Role::InRange)
        } else {
            None
        }
    }
}

impl Step {
    #[must_use]
    pub fn new(kind: StepKind, snapshot: Vec<Value>, message: impl Into<String>) -> Self {
        Self {
            kind,
            snapshot,
            message: message.into(),
        }
    }

    /// Terminal step for `final_array`.
    #[must_use]
    pub fn done(final_array: Vec<Value>) -> Self {
        Self {
            snapshot: final_array.clone(),
            kind: StepKind::Done { final_array },
            message: "Array is fully sorted".to_string(),
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self.kind, StepKind::Done { .. })
    }

    /// Indices and roles the renderer should emphasize.
    #[must_use]
    pub fn highlights(&self) -> Highlights {
        let mut h = Highlights::default();
        match &self.kind {
            StepKind::Compare { indices } => h.comparing = indices.to_vec(),
            StepKind::Swap { indices } => h.swapped = indices.to_vec(),
            StepKind::Shift { from, to } => {
                h.swapped = vec![*to];
                h.range = Some((*from.min(to), *from.max(to)));
            }
            StepKind::PartitionPivot {
                pivot_index,
                range_low,
                range_high,
            } => {
                h.pivot = Some(*pivot_index);
                h.range = Some((*range_low, *range_high));
            }
            StepKind::PivotPlaced { from, to } => {
                h.pivot = Some(*to);
                if from != to {
                    h.swapped = vec![*from, *to];
                }
            }
            StepKind::MergeSplit {
                range_low,
                range_high,
                ..
            }
            | StepKind::MergeCombine {
                range_low,
                range_high,
                ..
            } => h.range = Some((*range_low, *range_high)),
            StepKind::HeapifySwap { parent, child } => h.swapped = vec![*parent, *child],
            StepKind::BucketAssign {
                source_index,
                bucket_index,
                ..
            } => {
                h.comparing = vec![*source_index];
                h.bucket = Some(*bucket_index);
            }
            StepKind::KeyPick { index } | StepKind::KeyPlace { index } => h.key = Some(*index),
            StepKind::MinCandidate { index } => h.minimum = Some(*index),
            StepKind::Done { .. } => h.sorted = true,
            StepKind::BucketConcat { .. } | StepKind::DigitPass { .. } | StepKind::Note => {}
        }
        h
    }
}

impl StepKind {
    /// Short snake_case label, matching the serialized tag.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Compare { .. } => "compare",
            Self::Swap { .. } => "swap",
            Self::Shift { .. } => "shift",
            Self::PartitionPivot { .. } => "partition_pivot",
            Self::PivotPlaced { .. } => "pivot_placed",
            Self::MergeSplit { .. } => "merge_split",
            Self::MergeCombine { .. } => "merge_combine",
            Self::HeapifySwap { .. } => "heapify_swap",
            Self::BucketAssign { .. } => "bucket_assign",
            Self::BucketConcat { .. } => "bucket_concat",
            Self::DigitPass { .. } => "digit_pass",
            Self::KeyPick { .. } => "key_pick",
            Self::KeyPlace { .. } => "key_place",
            Self::MinCandidate { .. } => "min_candidate",
            Self::Note => "note",
            Self::Done { .. } => "done",
        }
    }

    /// The rule that proves this step conserved the array's multiset.
    #[must_use]
    pub fn conservation(&self) -> Conservation<'_> {
        match self {
            Self::Swap { indices: [i, j] } => Conservation::Transposition { i: *i, j: *j },
            Self::HeapifySwap { parent, child } => Conservation::Transposition {
                i: *parent,
                j: *child,
            },
            Self::PivotPlaced { from, to } => Conservation::Transposition { i: *from, j: *to },
            Self::Shift { from, to } => Conservation::Rotation {
                from: *from,
                to: *to,
            },
            Self::MergeCombine {
                range_low,
                range_high,
                ..
            } => Conservation::RangeRewrite {
                low: *range_low,
                high: *range_high,
            },
            Self::BucketConcat { order, .. } | Self::DigitPass { order, .. } => {
                Conservation::Reorder { order }
            }
            Self::Done { .. } => Conservation::Terminal,
            Self::Compare { .. }
            | Self::PartitionPivot { .. }
            | Self::MergeSplit { .. }
            | Self::BucketAssign { .. }
            | Self::KeyPick { .. }
            | Self::KeyPlace { .. }
            | Self::MinCandidate { .. }
            | Self::Note => Conservation::Unchanged,
        }
    }
}
