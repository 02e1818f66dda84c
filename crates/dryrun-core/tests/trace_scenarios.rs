#![forbid(unsafe_code)]

//! Worked examples from the classic dry-run walkthroughs.

use dryrun_core::{
    AlgorithmId, CancellationSource, DistributionConfig, EngineConfig, PlaybackController, PlaybackPosition, Session,
    StepKind, TraceBuilder, TraceError, build_trace, build_trace_named,
};

const CLASSIC: [f64; 5] = [5.0, 3.0, 8.0, 4.0, 2.0];

#[test]
fn bubble_opens_with_compare_then_swap() {
    let trace = build_trace(AlgorithmId::Bubble, &CLASSIC).unwrap();
    let steps = trace.steps();

    assert_eq!(steps[0].kind, StepKind::Compare { indices: [0, 1] });
    assert_eq!(steps[0].snapshot, CLASSIC.to_vec());
    assert_eq!(steps[0].message, "Comparing 5 and 3");

    assert_eq!(steps[1].kind, StepKind::Swap { indices: [0, 1] });
    assert_eq!(steps[1].snapshot, vec![3.0, 5.0, 8.0, 4.0, 2.0]);
    assert_eq!(steps[1].message, "Since 5 > 3, swapping them");

    assert_eq!(trace.final_array(), &[2.0, 3.0, 4.0, 5.0, 8.0]);
}

#[test]
fn quick_announces_last_element_as_pivot() {
    let trace = build_trace(AlgorithmId::Quick, &CLASSIC).unwrap();
    let first = &trace.steps()[0];
    assert_eq!(
        first.kind,
        StepKind::PartitionPivot {
            pivot_index: 4,
            range_low: 0,
            range_high: 4
        }
    );
    assert_eq!(first.message, "Choosing pivot = 2 at index 4");
}

#[test]
fn empty_input_plays_a_single_done_step() {
    for id in AlgorithmId::ALL {
        let mut playback = PlaybackController::new(build_trace(id, &[]).unwrap());
        assert_eq!(playback.len(), 1);
        assert!(playback.current().is_done());
        playback.next();
        playback.prev();
        assert_eq!(playback.cursor(), 0);
        assert_eq!(playback.position(), PlaybackPosition::AtStart);
    }
}

#[test]
fn singleton_plays_a_single_done_step() {
    let trace = build_trace(AlgorithmId::Cycle, &[42.0]).unwrap();
    assert_eq!(trace.len(), 1);
    assert_eq!(
        trace.steps()[0].kind,
        StepKind::Done {
            final_array: vec![42.0]
        }
    );
}

#[test]
fn walking_forward_visits_every_step_once() {
    let trace = build_trace(AlgorithmId::Merge, &CLASSIC).unwrap();
    let expected = trace.steps().to_vec();
    let mut playback = PlaybackController::new(trace);

    let mut seen = vec![playback.current().clone()];
    while playback.next() {
        seen.push(playback.current().clone());
    }
    assert_eq!(seen, expected);
    assert_eq!(playback.position(), PlaybackPosition::AtEnd);
}

#[test]
fn distribution_sorts_reject_out_of_range_values() {
    for id in [AlgorithmId::Counting, AlgorithmId::Radix, AlgorithmId::Bucket] {
        let err = build_trace(id, &[3.0, 1000.0]).unwrap_err();
        assert_eq!(
            err,
            TraceError::BucketRange {
                index: 1,
                value: 1000.0,
                max: 999
            },
            "{id}"
        );
        assert!(build_trace(id, &[3.0, -1.0]).is_err(), "{id}");
        assert!(build_trace(id, &[0.5, 1.0]).is_err(), "{id}");
    }
}

#[test]
fn hand_built_config_is_checked_before_sorting() {
    let cases = [
        (AlgorithmId::Bucket, DistributionConfig { bucket_count: 0, ..DistributionConfig::default() }),
        (AlgorithmId::Radix, DistributionConfig { radix_base: 0, ..DistributionConfig::default() }),
        (AlgorithmId::Radix, DistributionConfig { radix_base: 1, ..DistributionConfig::default() }),
        (AlgorithmId::Counting, DistributionConfig { max_value: u64::MAX, ..DistributionConfig::default() }),
    ];
    for (id, distribution) in cases {
        let builder = TraceBuilder::new(EngineConfig {
            distribution: distribution.clone(),
            ..EngineConfig::default()
        });
        let err = builder.build(id, &[1e15, 21.0, 1.0]).unwrap_err();
        assert!(
            matches!(err, TraceError::InvalidConfig { .. }),
            "{id} with {distribution:?}: {err:?}"
        );
    }
}

#[test]
fn comparison_sorts_accept_negatives_and_fractions() {
    let input = [0.5, -3.0, 2.25, -3.0, 0.0];
    for id in AlgorithmId::ALL
        .into_iter()
        .filter(|id| id.family() == dryrun_core::Family::Comparison)
    {
        let trace = build_trace(id, &input).unwrap();
        assert_eq!(trace.final_array(), &[-3.0, -3.0, 0.0, 0.5, 2.25], "{id}");
    }
}

#[test]
fn names_resolve_case_and_separator_insensitively() {
    for name in ["Odd-Even", "odd_even", "oddEven", "brick sort"] {
        let trace = build_trace_named(name, &[2.0, 1.0]).unwrap();
        assert_eq!(trace.algorithm(), AlgorithmId::OddEven, "{name}");
    }
}

#[test]
fn cancellation_from_another_handle_stops_the_build() {
    let source = CancellationSource::new();
    let builder = TraceBuilder::new(EngineConfig::default()).with_cancellation(source.token());
    assert!(builder.build(AlgorithmId::Heap, &CLASSIC).is_ok());

    source.cancel();
    assert_eq!(
        builder.build(AlgorithmId::Heap, &CLASSIC),
        Err(TraceError::Cancelled { steps: 0 })
    );
}

#[test]
fn session_rebuilds_on_input_change() {
    let mut session = Session::new(EngineConfig::default());
    session.select(AlgorithmId::Insertion, &CLASSIC).unwrap().go_to_end();

    let controller = session.select(AlgorithmId::Insertion, &[2.0, 1.0]).unwrap();
    assert_eq!(controller.cursor(), 0);
    assert_eq!(controller.trace().original(), &[2.0, 1.0]);
}
