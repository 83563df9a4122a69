//! Typewriter behaviour over many inputs
//!
//! Runs are driven entirely by `ManualScheduler`, so reveal times are exact.

use std::time::Duration;

use pretty_assertions::assert_eq;

use disclosure_core::{ManualScheduler, Phase, RevealTiming, Scheduler, TimerId, Typewriter};

const TEXTS: &[&str] = &[
    "A",
    "Hello",
    "Solar kiosks for rural cafés",
    "Informacion i ndjeshëm i zbuluar",
    "emoji 🚀 inside",
    "  leading and trailing  ",
    "line one\nline two",
];

const TIMINGS: &[(u64, u64)] = &[(40, 0), (20, 300), (1, 1), (100, 5), (0, 0)];

/// Fire timers one at a time, recording (time, visible text) per reveal
fn run_punctually(typewriter: &mut Typewriter, scheduler: &mut ManualScheduler) -> Vec<(Duration, String)> {
    let mut reveals = Vec::new();
    while let Some(id) = scheduler.fire_next() {
        if let Some(frame) = typewriter.on_timer(scheduler, id) {
            reveals.push((scheduler.now(), frame.visible_text));
        }
    }
    reveals
}

#[test]
fn test_every_reveal_extends_prefix_by_one_char() {
    for text in TEXTS {
        for &(char_ms, start_ms) in TIMINGS {
            let timing = RevealTiming::new(Duration::from_millis(char_ms), Duration::from_millis(start_ms));
            let mut scheduler = ManualScheduler::new();
            let mut typewriter = Typewriter::new();
            typewriter.start(&mut scheduler, text, timing);

            let reveals = run_punctually(&mut typewriter, &mut scheduler);
            let expected: Vec<String> = text
                .char_indices()
                .map(|(i, c)| text[..i + c.len_utf8()].to_string())
                .collect();
            let visible: Vec<String> = reveals.iter().map(|(_, v)| v.clone()).collect();

            assert_eq!(visible, expected, "text {text:?} timing {timing:?}");
            assert!(typewriter.is_complete());
            assert_eq!(typewriter.visible_text(), *text);
            assert_eq!(scheduler.pending(), 0);
        }
    }
}

#[test]
fn test_reveal_times_follow_cadence() {
    for text in TEXTS {
        for &(char_ms, start_ms) in TIMINGS {
            let mut scheduler = ManualScheduler::new();
            let mut typewriter = Typewriter::new();
            typewriter.start(
                &mut scheduler,
                text,
                RevealTiming::new(Duration::from_millis(char_ms), Duration::from_millis(start_ms)),
            );

            let reveals = run_punctually(&mut typewriter, &mut scheduler);
            for (k, (at, _)) in reveals.iter().enumerate() {
                let k = k as u64 + 1;
                assert_eq!(*at, Duration::from_millis(start_ms + k * char_ms));
            }
        }
    }
}

#[test]
fn test_nothing_visible_during_start_delay() {
    let mut scheduler = ManualScheduler::new();
    let mut typewriter = Typewriter::new();
    typewriter.start(&mut scheduler, "Pitch", RevealTiming::pitch_coach());

    assert!(scheduler.advance(Duration::from_millis(299)).is_empty());
    assert_eq!(typewriter.visible_text(), "");
    assert!(!typewriter.has_started());
    assert_eq!(typewriter.phase(), Phase::Waiting);
}

#[test]
fn test_restart_never_mixes_runs() {
    for cut in 0..12 {
        let mut scheduler = ManualScheduler::new();
        let mut typewriter = Typewriter::new();
        let timing = RevealTiming::new(Duration::from_millis(10), Duration::from_millis(25));
        typewriter.start(&mut scheduler, "first pitch text", timing);

        let mut abandoned: Vec<TimerId> = Vec::new();
        for _ in 0..cut {
            if let Some(id) = scheduler.fire_next() {
                typewriter.on_timer(&mut scheduler, id);
            }
        }
        abandoned.extend(typewriter.pending_timer());

        typewriter.start(&mut scheduler, "second", timing);
        assert_eq!(typewriter.visible_text(), "");

        // Late delivery of an abandoned id must be ignored.
        for id in &abandoned {
            assert_eq!(typewriter.on_timer(&mut scheduler, *id), None);
        }

        let reveals = run_punctually(&mut typewriter, &mut scheduler);
        assert!(reveals.iter().all(|(_, v)| "second".starts_with(v.as_str())));
        assert_eq!(typewriter.visible_text(), "second");
    }
}

#[test]
fn test_late_host_reveals_one_char_per_callback() {
    let mut scheduler = ManualScheduler::new();
    let mut typewriter = Typewriter::new();
    typewriter.start(
        &mut scheduler,
        "abcdef",
        RevealTiming::new(Duration::from_millis(10), Duration::ZERO),
    );

    let mut visible = Vec::new();
    while scheduler.pending() > 0 {
        for id in scheduler.advance(Duration::from_millis(45)) {
            if let Some(frame) = typewriter.on_timer(&mut scheduler, id) {
                visible.push(frame.revealed);
            }
        }
    }

    assert_eq!(visible, vec![1, 2, 3, 4, 5, 6]);
    assert!(typewriter.is_complete());
}

/// A scheduler that only counts calls, for checking idempotence
#[derive(Default)]
struct CountingScheduler {
    scheduled: usize,
    cancelled: usize,
}

impl Scheduler for CountingScheduler {
    fn schedule_once(&mut self, _delay: Duration) -> TimerId {
        self.scheduled += 1;
        let mut real = ManualScheduler::new();
        real.schedule_once(Duration::ZERO)
    }

    fn cancel(&mut self, _id: TimerId) {
        self.cancelled += 1;
    }
}

#[test]
fn test_repeated_start_schedules_nothing_new() {
    let mut scheduler = CountingScheduler::default();
    let mut typewriter = Typewriter::new();
    let timing = RevealTiming::default();

    for _ in 0..5 {
        typewriter.start(&mut scheduler, "same text", timing);
    }

    assert_eq!(scheduler.scheduled, 1);
    assert_eq!(scheduler.cancelled, 0);
    assert_eq!(typewriter.generation(), 1);
}
