// Host-side tests for the frame throttle. A fake 60 Hz display drives
// `tick` with monotonically increasing timestamps.

use ambient_motion::core::*;

const DISPLAY_MS: f64 = 1000.0 / 60.0;

fn run(scheduler: &mut FrameScheduler, duration_ms: f64, display_ms: f64) -> u32 {
    let mut calls = 0;
    let mut task = |_ts: f64, _dt: f64| calls += 1;
    let frames = (duration_ms / display_ms).round() as u32;
    for i in 1..=frames {
        scheduler.tick(display_ms * i as f64, &mut task);
    }
    calls
}

#[test]
fn field_runs_near_thirty_fps_on_a_sixty_hz_display() {
    let mut s = FrameScheduler::new(FrameProfile::FIELD, false);
    let calls = run(&mut s, 1000.0, DISPLAY_MS);
    assert!((25..=31).contains(&calls), "field ran {calls} times");
    assert_eq!(s.frames(), calls as u64);
}

#[test]
fn field_drops_to_five_fps_under_reduced_motion() {
    let mut s = FrameScheduler::new(FrameProfile::FIELD, true);
    assert!(!s.is_dormant());
    assert_eq!(s.interval_ms(), Some(200.0));
    let calls = run(&mut s, 1000.0, DISPLAY_MS);
    assert!((4..=5).contains(&calls), "reduced field ran {calls} times");
}

#[test]
fn particles_and_cursor_are_dormant_under_reduced_motion() {
    for profile in [FrameProfile::PARTICLES, FrameProfile::CURSOR] {
        let mut s = FrameScheduler::new(profile, true);
        assert!(s.is_dormant());
        assert!(!s.is_active());
        assert_eq!(run(&mut s, 5000.0, DISPLAY_MS), 0);
    }
}

#[test]
fn scroll_sampler_keeps_running_under_reduced_motion() {
    let mut s = FrameScheduler::new(FrameProfile::SCROLL_SAMPLER, true);
    assert!(!s.is_dormant());
    assert_eq!(run(&mut s, 1000.0, DISPLAY_MS), 60);
}

#[test]
fn cursor_runs_every_display_frame() {
    let mut s = FrameScheduler::new(FrameProfile::CURSOR, false);
    assert_eq!(run(&mut s, 1000.0, DISPLAY_MS), 60);
}

#[test]
fn work_never_runs_faster_than_the_interval() {
    let mut s = FrameScheduler::new(FrameProfile::PARTICLES, false);
    let mut stamps = Vec::new();
    let mut task = |ts: f64, _dt: f64| stamps.push(ts);
    // 144 Hz display
    let mut ts = 0.0;
    while ts < 2000.0 {
        ts += 1000.0 / 144.0;
        s.tick(ts, &mut task);
    }
    let interval = 1000.0 / 60.0;
    for pair in stamps.windows(2) {
        assert!(pair[1] - pair[0] >= interval - 1e-9);
    }
    assert!(stamps.len() <= 120);
}

#[test]
fn dt_is_time_since_last_frame_that_ran() {
    let mut s = FrameScheduler::new(FrameProfile::FIELD, false);
    let mut dts = Vec::new();
    let mut task = |_ts: f64, dt: f64| dts.push(dt);
    s.tick(40.0, &mut task);
    s.tick(50.0, &mut task);
    s.tick(80.0, &mut task);
    assert_eq!(dts, vec![40.0, 40.0]);
}

#[test]
fn cancel_stops_all_further_work() {
    let mut s = FrameScheduler::new(FrameProfile::FIELD, false);
    assert!(run(&mut s, 500.0, DISPLAY_MS) > 0);
    s.cancel();
    assert!(!s.is_active());
    let mut ran = false;
    let mut task = |_ts: f64, _dt: f64| ran = true;
    assert!(!s.tick(10_000.0, &mut task));
    assert!(!ran);
}

#[test]
fn configured_rate_overrides_target_only() {
    let profile = FrameProfile::FIELD.with_target_fps(10.0);
    assert_eq!(FrameScheduler::new(profile, false).interval_ms(), Some(100.0));
    assert_eq!(FrameScheduler::new(profile, true).interval_ms(), Some(200.0));
}

struct Counter(u32);

impl FrameTask for Counter {
    fn frame(&mut self, _timestamp_ms: f64, _dt_ms: f64) {
        self.0 += 1;
    }
}

#[test]
fn custom_tasks_implement_the_trait() {
    let mut s = FrameScheduler::new(FrameProfile::CURSOR, false);
    let mut c = Counter(0);
    assert!(s.tick(10.0, &mut c));
    assert!(!s.tick(12.0, &mut c));
    assert_eq!(c.0, 1);
}

#[test]
fn cursor_runs_every_other_frame_on_a_144_hz_display() {
    let mut s = FrameScheduler::new(FrameProfile::CURSOR, false);
    let calls = run(&mut s, 1000.0, 1000.0 / 144.0);
    assert!((70..=73).contains(&calls), "cursor ran {calls} times");
}
