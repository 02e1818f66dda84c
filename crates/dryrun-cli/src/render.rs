#![forbid(unsafe_code)]

//! Plain-text rendering of steps and the catalog.
//!
//! Highlighted slots are wrapped in role markers so the dry run reads
//! without colour: `[5]` comparing, `*5*` swapped, `(5)` pivot, `{5}` key,
//! `<5>` current minimum. Everything else prints bare.

use std::fmt::Write as _;

use dryrun_core::step::Role;
use dryrun_core::{AlgorithmId, PlaybackController, Step, Trace};

/// One slot with its role marker.
fn slot(value: f64, role: Option<Role>) -> String {
    match role {
        Some(Role::Comparing) => format!("[{value}]"),
        Some(Role::Swapped) => format!("*{value}*"),
        Some(Role::Pivot) => format!("({value})"),
        Some(Role::Key) => format!("{{{value}}}"),
        Some(Role::Minimum) => format!("<{value}>"),
        Some(Role::InRange | Role::Sorted) | None => value.to_string(),
    }
}

/// `5 [3] 8` style array line for one step.
#[must_use]
pub fn array_line(step: &Step) -> String {
    let highlights = step.highlights();
    step.snapshot
        .iter()
        .enumerate()
        .map(|(i, &v)| slot(v, highlights.role(i)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per step: index, kind, array, message.
#[must_use]
pub fn trace_text(trace: &Trace) -> String {
    let mut out = String::new();
    let width = trace.len().to_string().len();
    for (i, step) in trace.steps().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>width$}  {:<15} {}  | {}",
            i + 1,
            step.kind.label(),
            array_line(step),
            step.message
        );
    }
    let _ = writeln!(
        out,
        "{} steps, {}",
        trace.len(),
        trace.fingerprint()
    );
    out
}

/// Detail view of the controller's current step.
#[must_use]
pub fn step_text(playback: &PlaybackController) -> String {
    let step = playback.current();
    format!(
        "{} ({})\n{}\n{}\n",
        playback.label(),
        step.kind.label(),
        array_line(step),
        step.message
    )
}

/// Aligned catalog table.
#[must_use]
pub fn catalog_text() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<20} {:<13} {:<7} {:<9} {}",
        "ID", "NAME", "FAMILY", "STABLE", "IN-PLACE", "AVERAGE"
    );
    for id in AlgorithmId::ALL {
        let info = id.info();
        let _ = writeln!(
            out,
            "{:<10} {:<20} {:<13} {:<7} {:<9} {}",
            id.as_str(),
            info.name,
            format!("{:?}", info.family).to_lowercase(),
            if info.stable { "yes" } else { "no" },
            if info.in_place { "yes" } else { "no" },
            info.average
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dryrun_core::build_trace;

    #[test]
    fn compare_step_brackets_both_slots() {
        let trace = build_trace(AlgorithmId::Bubble, &[5.0, 3.0, 8.0]).unwrap();
        assert_eq!(array_line(&trace.steps()[0]), "[5] [3] 8");
        assert_eq!(array_line(&trace.steps()[1]), "*3* *5* 8");
    }

    #[test]
    fn done_step_prints_bare_values() {
        let trace = build_trace(AlgorithmId::Heap, &[2.0, 1.0]).unwrap();
        assert_eq!(array_line(trace.steps().last().unwrap()), "1 2");
    }

    #[test]
    fn trace_text_ends_with_summary() {
        let trace = build_trace(AlgorithmId::Insertion, &[2.0, 1.0]).unwrap();
        let text = trace_text(&trace);
        let last = text.lines().last().unwrap();
        assert!(last.starts_with("4 steps, blake3:"), "{last}");
        assert!(text.lines().next().unwrap().contains("key_pick"));
    }

    #[test]
    fn catalog_lists_every_algorithm() {
        let text = catalog_text();
        assert_eq!(text.lines().count(), AlgorithmId::ALL.len() + 1);
        assert!(text.contains("oddEven"));
    }
}
