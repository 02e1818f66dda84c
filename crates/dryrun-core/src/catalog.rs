#![forbid(unsafe_code)]

//! Algorithm identifiers and descriptive metadata.
//!
//! [`AlgorithmId`] is the closed set of algorithms the builder can run. Each
//! id maps to a static [`AlgorithmInfo`] card (name, family, stability and
//! complexity notation) that a consumer can show next to the dry run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TraceError;

/// Supported sorting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlgorithmId {
    Bubble,
    Selection,
    Insertion,
    OddEven,
    Quick,
    Merge,
    Heap,
    Cycle,
    Counting,
    Radix,
    Bucket,
}

/// Broad strategy an algorithm belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Orders elements only by comparing pairs.
    Comparison,
    /// Distributes non-negative integers into buckets or digit counts.
    Distribution,
}

/// Static description of one algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub id: AlgorithmId,
    pub name: &'static str,
    pub family: Family,
    pub stable: bool,
    pub in_place: bool,
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
    pub space: &'static str,
    pub summary: &'static str,
}

static CATALOG: [AlgorithmInfo; 11] = [
    AlgorithmInfo {
        id: AlgorithmId::Bubble,
        name: "Bubble Sort",
        family: Family::Comparison,
        stable: true,
        in_place: true,
        best: "O(n)",
        average: "O(n²)",
        worst: "O(n²)",
        space: "O(1)",
        summary: "Repeatedly steps through the list, compares adjacent elements and swaps them when they are out of order.",
    },
    AlgorithmInfo {
        id: AlgorithmId::Selection,
        name: "Selection Sort",
        family: Family::Comparison,
        stable: false,
        in_place: true,
        best: "O(n²)",
        average: "O(n²)",
        worst: "O(n²)",
        space: "O(1)",
        summary: "Finds the minimum of the unsorted suffix on every pass and swaps it to the front of that suffix.",
    },
    AlgorithmInfo {
        id: AlgorithmId::Insertion,
        name: "Insertion Sort",
        family: Family::Comparison,
        stable: true,
        in_place: true,
        best: "O(n)",
        average: "O(n²)",
        worst: "O(n²)",
        space: "O(1)",
        summary: "Takes one key at a time and shifts larger elements right until the key fits into the sorted prefix.",
    },
    AlgorithmInfo {
        id: AlgorithmId::OddEven,
        name: "Odd-Even Sort",
        family: Family::Comparison,
        stable: true,
        in_place: true,
        best: "O(n)",
        average: "O(n²)",
        worst: "O(n²)",
        space: "O(1)",
        summary: "Alternates compare-and-swap phases over odd and even index pairs until a full round makes no swap.",
    },
    AlgorithmInfo {
        id: AlgorithmId::Quick,
        name: "Quick Sort",
        family: Family::Comparison,
        stable: false,
        in_place: true,
        best: "O(n log n)",
        average: "O(n log n)",
        worst: "O(n²)",
        space: "O(log n)",
        summary: "Partitions the range around its last element (Lomuto) and recurses into the left part, then the right part.",
    },
    AlgorithmInfo {
        id: AlgorithmId::Merge,
        name: "Merge Sort",
        family: Family::Comparison,
        stable: true,
        in_place: false,
        best: "O(n log n)",
        average: "O(n log n)",
        worst: "O(n log n)",
        space: "O(n)",
        summary: "Splits the range in half, sorts both halves recursively and merges them with a stable two-pointer scan.",
    },
    AlgorithmInfo {
        id: AlgorithmId::Heap,
        name: "Heap Sort",
        family: Family::Comparison,
        stable: false,
        in_place: true,
        best: "O(n log n)",
        average: "O(n log n)",
        worst: "O(n log n)",
        space: "O(1)",
        summary: "Builds a max heap, then repeatedly swaps the root behind the heap and restores the heap property.",
    },
    AlgorithmInfo {
        id: AlgorithmId::Cycle,
        name: "Cycle Sort",
        family: Family::Comparison,
        stable: false,
        in_place: true,
        best: "O(n²)",
        average: "O(n²)",
        worst: "O(n²)",
        space: "O(1)",
        summary: "Counts the smaller elements to find each value's final slot and rotates every cycle into place with minimal writes.",
    },
    AlgorithmInfo {
        id: AlgorithmId::Counting,
        name: "Counting Sort",
        family: Family::Distribution,
        stable: true,
        in_place: false,
        best: "O(n + k)",
        average: "O(n + k)",
        worst: "O(n + k)",
        space: "O(n + k)",
        summary: "Tallies how often each value occurs and rebuilds the array from the tallies in value order.",
    },
    AlgorithmInfo {
        id: AlgorithmId::Radix,
        name: "Radix Sort",
        family: Family::Distribution,
        stable: true,
        in_place: false,
        best: "O(d·(n + b))",
        average: "O(d·(n + b))",
        worst: "O(d·(n + b))",
        space: "O(n + b)",
        summary: "Distributes values by one digit at a time, least significant first, keeping each pass stable.",
    },
    AlgorithmInfo {
        id: AlgorithmId::Bucket,
        name: "Bucket Sort",
        family: Family::Distribution,
        stable: true,
        in_place: false,
        best: "O(n + k)",
        average: "O(n + k)",
        worst: "O(n²)",
        space: "O(n + k)",
        summary: "Scatters values into equal-width buckets, concatenates them and insertion-sorts each bucket.",
    },
];

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 11] = [
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::OddEven,
        Self::Quick,
        Self::Merge,
        Self::Heap,
        Self::Cycle,
        Self::Counting,
        Self::Radix,
        Self::Bucket,
    ];

    /// Canonical identifier, as used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Selection => "selection",
            Self::Insertion => "insertion",
            Self::OddEven => "oddEven",
            Self::Quick => "quick",
            Self::Merge => "merge",
            Self::Heap => "heap",
            Self::Cycle => "cycle",
            Self::Counting => "counting",
            Self::Radix => "radix",
            Self::Bucket => "bucket",
        }
    }

    #[must_use]
    pub fn info(self) -> &'static AlgorithmInfo {
        &CATALOG[self as usize]
    }

    #[must_use]
    pub fn family(self) -> Family {
        self.info().family
    }

    #[must_use]
    pub fn is_stable(self) -> bool {
        self.info().stable
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = TraceError;

    /// Case-insensitive; `-`, `_` and spaces are ignored and a trailing
    /// `sort` is accepted (`odd-even`, `Odd_Even`, `quicksort`, `brick`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        let key = folded.strip_suffix("sort").unwrap_or(&folded);
        let id = match key {
            "bubble" => Self::Bubble,
            "selection" => Self::Selection,
            "insertion" => Self::Insertion,
            "oddeven" | "brick" => Self::OddEven,
            "quick" | "lomuto" => Self::Quick,
            "merge" => Self::Merge,
            "heap" => Self::Heap,
            "cycle" => Self::Cycle,
            "counting" => Self::Counting,
            "radix" => Self::Radix,
            "bucket" => Self::Bucket,
            _ => {
                return Err(TraceError::UnknownAlgorithm {
                    name: s.to_string(),
                });
            }
        };
        Ok(id)
    }
}
