//! Frame scheduler for animating time evolution.
//!
//! A [`Playback`] owns the simulated time `t` fed to
//! [`evolve`][crate::timedep::evolve]. While playing, each call to
//! [`Playback::tick`] checks an injected [`Clock`] and, if at least one frame
//! interval has passed since the last frame, advances `t` by
//! `step * speed` and reports the new value. Nothing runs in the background;
//! the caller drives the loop.
//!
//! ```
//! use std::cell::Cell;
//! use qlab::{ config::PlaybackParams, playback::{ Clock, Playback } };
//!
//! struct Manual(Cell<f64>);
//! impl Clock for Manual {
//!     fn now(&self) -> f64 { self.0.get() }
//! }
//!
//! let clock = Manual(Cell::new(0.0));
//! let mut playback = Playback::new(&clock, &PlaybackParams::default());
//! playback.start();
//! assert_eq!(playback.tick(), None);
//! clock.0.set(0.1);
//! assert_eq!(playback.tick(), Some(0.05));
//! ```

use std::time::Instant;
use crate::config::PlaybackParams;

/// A monotonic source of time, in seconds.
pub trait Clock {
    /// Get the current time.
    fn now(&self) -> f64;
}

impl<C> Clock for &C
where C: Clock + ?Sized
{
    fn now(&self) -> f64 { (**self).now() }
}

/// Wall-clock time measured from the moment of construction.
#[derive(Copy, Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a new clock reading zero now.
    pub fn new() -> Self { Self { origin: Instant::now() } }
}

impl Default for SystemClock {
    fn default() -> Self { Self::new() }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 { self.origin.elapsed().as_secs_f64() }
}

/// Playback state for a time-evolution animation.
#[derive(Clone, Debug)]
pub struct Playback<C>
where C: Clock
{
    clock: C,
    // simulated time
    time: f64,
    // simulated time per frame at unit speed
    step: f64,
    speed: f64,
    // wall-clock seconds between frames
    frame_interval: f64,
    playing: bool,
    // clock reading at the last emitted frame (or at start)
    last_frame: f64,
}

impl<C> Playback<C>
where C: Clock
{
    /// Create a new, stopped `Playback` at `t = 0`.
    pub fn new(clock: C, params: &PlaybackParams) -> Self {
        Self {
            clock,
            time: 0.0,
            step: params.step,
            speed: params.speed,
            frame_interval: params.frame_interval.max(0.0),
            playing: false,
            last_frame: 0.0,
        }
    }

    /// Get the current simulated time.
    pub fn time(&self) -> f64 { self.time }

    /// Get the playback speed multiplier.
    pub fn speed(&self) -> f64 { self.speed }

    /// Return `true` if frames are being emitted.
    pub fn is_playing(&self) -> bool { self.playing }

    /// Begin emitting frames. The first frame comes one frame interval after
    /// this call.
    pub fn start(&mut self) {
        if !self.playing {
            self.playing = true;
            self.last_frame = self.clock.now();
            log::debug!("playback::start: t = {}", self.time);
        }
    }

    /// Stop emitting frames, keeping the current time.
    pub fn stop(&mut self) {
        if self.playing {
            self.playing = false;
            log::debug!("playback::stop: t = {}", self.time);
        }
    }

    /// Stop and rewind to `t = 0`.
    pub fn reset(&mut self) {
        self.stop();
        self.time = 0.0;
    }

    /// Jump to a simulated time without changing the play state. Non-finite
    /// times are ignored.
    pub fn seek(&mut self, t: f64) {
        if t.is_finite() { self.time = t; }
    }

    /// Set the speed multiplier. Non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() { self.speed = speed; }
    }

    /// Advance by one frame if playing and at least one frame interval has
    /// elapsed since the last frame, returning the new simulated time.
    ///
    /// At most one frame is emitted per call, regardless of how much time has
    /// passed.
    pub fn tick(&mut self) -> Option<f64> {
        if !self.playing { return None; }
        let now = self.clock.now();
        if now - self.last_frame < self.frame_interval { return None; }
        self.last_frame = now;
        self.time += self.step * self.speed;
        Some(self.time)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use approx::assert_abs_diff_eq;
    use super::*;

    struct ManualClock(Cell<f64>);

    impl ManualClock {
        fn advance(&self, dt: f64) { self.0.set(self.0.get() + dt); }
    }

    impl Clock for ManualClock {
        fn now(&self) -> f64 { self.0.get() }
    }

    fn params() -> PlaybackParams {
        PlaybackParams { step: 0.1, speed: 1.0, frame_interval: 0.5 }
    }

    #[test]
    fn stopped_playback_never_ticks() {
        let clock = ManualClock(Cell::new(0.0));
        let mut playback = Playback::new(&clock, &params());
        clock.advance(10.0);
        assert_eq!(playback.tick(), None);
        assert_eq!(playback.time(), 0.0);
    }

    #[test]
    fn frames_respect_interval() {
        let clock = ManualClock(Cell::new(3.0));
        let mut playback = Playback::new(&clock, &params());
        playback.start();
        clock.advance(0.3);
        assert_eq!(playback.tick(), None);
        clock.advance(0.3);
        assert_abs_diff_eq!(playback.tick().unwrap(), 0.1);
        assert_eq!(playback.tick(), None);
        // a long pause still yields a single frame
        clock.advance(5.0);
        assert_abs_diff_eq!(playback.tick().unwrap(), 0.2, epsilon = 1e-12);
        assert_eq!(playback.tick(), None);
    }

    #[test]
    fn stop_start_and_reset() {
        let clock = ManualClock(Cell::new(0.0));
        let mut playback = Playback::new(&clock, &params());
        playback.set_speed(3.0);
        playback.start();
        clock.advance(1.0);
        assert_abs_diff_eq!(playback.tick().unwrap(), 0.3, epsilon = 1e-12);
        playback.stop();
        clock.advance(1.0);
        assert_eq!(playback.tick(), None);
        assert!(!playback.is_playing());

        playback.seek(2.0);
        playback.set_speed(f64::NAN);
        assert_eq!(playback.speed(), 3.0);
        playback.start();
        clock.advance(0.5);
        assert_abs_diff_eq!(playback.tick().unwrap(), 2.3, epsilon = 1e-12);

        playback.reset();
        assert!(!playback.is_playing());
        assert_eq!(playback.time(), 0.0);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(a >= 0.0 && b >= a);
    }
}
