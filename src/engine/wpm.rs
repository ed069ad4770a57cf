use std::collections::VecDeque;
use std::time::Instant;

/// Standard word length used to turn keystrokes into words.
pub const AVERAGE_WORD_LEN: f64 = 5.0;

/// One recorded key event. The label is the decoded key name, not the
/// display glyph; symbolic keys arrive as names like `"space"`.
#[derive(Clone, Debug)]
pub struct Keystroke {
    pub at: Instant,
    pub label: String,
}

/// Sliding keystroke window with one WPM sample per full round.
///
/// The window fills to `round_size`, then is archived into a bounded
/// history and cleared. A one-shot timer pair brackets each round: start
/// is armed when the window first becomes non-empty, end when it reaches
/// capacity, and both are cleared the moment the sample is computed.
#[derive(Debug)]
pub struct WpmTracker {
    round_size: usize,
    window: Vec<Keystroke>,
    history: VecDeque<Vec<Keystroke>>,
    history_cap: usize,
    timer_start: Option<Instant>,
    timer_end: Option<Instant>,
    current_wpm: f64,
}

impl WpmTracker {
    pub fn new(round_size: usize, history_cap: usize) -> Self {
        assert!(round_size > 0, "round size must be non-zero");
        Self {
            round_size,
            window: Vec::with_capacity(round_size),
            history: VecDeque::with_capacity(history_cap),
            history_cap,
            timer_start: None,
            timer_end: None,
            current_wpm: 0.0,
        }
    }

    /// Append one keystroke. Called for every key event, paused or not;
    /// pausing only affects the visual world, never accounting.
    pub fn record(&mut self, label: String, at: Instant) {
        self.window.push(Keystroke { at, label });
    }

    pub fn keys_in_round(&self) -> usize {
        self.window.len()
    }

    pub fn round_size(&self) -> usize {
        self.round_size
    }

    /// Most recent completed-round sample, 0.0 before the first round.
    pub fn current_wpm(&self) -> f64 {
        self.current_wpm
    }

    pub fn archived_rounds(&self) -> usize {
        self.history.len()
    }

    /// Per-tick bookkeeping: arm the start timer, archive a full window,
    /// and emit the round's sample once both timers are set. Returns the
    /// new sample on the tick it is produced, `None` otherwise.
    pub fn update(&mut self, now: Instant) -> Option<f64> {
        if self.timer_start.is_none() && !self.window.is_empty() {
            self.timer_start = Some(now);
        }

        if self.window.len() >= self.round_size {
            self.timer_end = Some(now);
            if self.history.len() >= self.history_cap {
                self.history.pop_front();
            }
            self.history.push_back(std::mem::replace(
                &mut self.window,
                Vec::with_capacity(self.round_size),
            ));
        }

        if self.timer_start.is_some() && self.timer_end.is_some() {
            let sample = self.round_wpm();
            self.timer_start = None;
            self.timer_end = None;
            self.current_wpm = sample;
            return Some(sample);
        }
        None
    }

    /// WPM for the round bracketed by the timer pair. The caller gates on
    /// both timers being set; hitting this with either unset means a
    /// broken gate somewhere else in the engine, so it fails loudly.
    fn round_wpm(&self) -> f64 {
        let (start, end) = match (self.timer_start, self.timer_end) {
            (Some(start), Some(end)) => (start, end),
            _ => panic!("round WPM computed with an unset timer"),
        };
        let elapsed = end.duration_since(start).as_secs_f64();
        if elapsed < 0.1 {
            return 0.0;
        }
        let words = self.round_size as f64 / AVERAGE_WORD_LEN;
        round2(words / (elapsed / 60.0))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fill(tracker: &mut WpmTracker, count: usize, start: Instant) {
        for i in 0..count {
            tracker.record(format!("k{i}"), start + Duration::from_millis(i as u64));
        }
    }

    #[test]
    fn test_no_sample_before_round_completes() {
        let t0 = Instant::now();
        let mut tracker = WpmTracker::new(200, 5);
        fill(&mut tracker, 199, t0);
        assert_eq!(tracker.update(t0), None);
        assert_eq!(tracker.keys_in_round(), 199);
        assert_eq!(tracker.current_wpm(), 0.0);
    }

    #[test]
    fn test_one_sample_per_round() {
        let t0 = Instant::now();
        let mut tracker = WpmTracker::new(200, 5);

        tracker.record("a".to_string(), t0);
        assert_eq!(tracker.update(t0), None); // arms start timer
        fill(&mut tracker, 199, t0);

        let sample = tracker.update(t0 + Duration::from_secs(60));
        assert_eq!(sample, Some(40.0));
        assert_eq!(tracker.keys_in_round(), 0);

        // One-shot: further ticks emit nothing until the next full round.
        for i in 1..10 {
            assert_eq!(tracker.update(t0 + Duration::from_secs(60 + i)), None);
        }
        assert_eq!(tracker.current_wpm(), 40.0);
    }

    #[test]
    fn test_known_timing_yields_exact_wpm() {
        // 200 keys over 60 seconds: (200 / 5) words per minute = 40.0.
        let t0 = Instant::now();
        let mut tracker = WpmTracker::new(200, 5);
        tracker.record("a".to_string(), t0);
        tracker.update(t0);
        fill(&mut tracker, 199, t0);
        assert_eq!(tracker.update(t0 + Duration::from_secs(60)), Some(40.0));
    }

    #[test]
    fn test_sample_is_rounded_to_two_decimals() {
        // 30 keys over 7 seconds: 6 words / (7/60) min = 51.42857... -> 51.43.
        let t0 = Instant::now();
        let mut tracker = WpmTracker::new(30, 5);
        tracker.record("a".to_string(), t0);
        tracker.update(t0);
        fill(&mut tracker, 29, t0);
        assert_eq!(tracker.update(t0 + Duration::from_secs(7)), Some(51.43));
    }

    #[test]
    fn test_history_is_bounded_with_ring_eviction() {
        let t0 = Instant::now();
        let mut tracker = WpmTracker::new(10, 3);
        for round in 0..6 {
            tracker.record("a".to_string(), t0);
            tracker.update(t0);
            fill(&mut tracker, 9, t0);
            let at = t0 + Duration::from_secs(10 * (round + 1));
            assert!(tracker.update(at).is_some());
        }
        assert_eq!(tracker.archived_rounds(), 3);
    }

    #[test]
    fn test_start_timer_arms_on_first_nonempty_update() {
        let t0 = Instant::now();
        let mut tracker = WpmTracker::new(10, 5);
        // Empty window: update must not arm anything.
        assert_eq!(tracker.update(t0), None);
        tracker.record("a".to_string(), t0);
        // Armed here; completing the round 30s later gives a 30s round.
        tracker.update(t0);
        fill(&mut tracker, 9, t0);
        // 2 words / 0.5 min = 4.0.
        assert_eq!(tracker.update(t0 + Duration::from_secs(30)), Some(4.0));
    }

    #[test]
    #[should_panic(expected = "unset timer")]
    fn test_wpm_with_unset_timer_panics() {
        let tracker = WpmTracker::new(10, 5);
        tracker.round_wpm();
    }

    #[test]
    fn test_degenerate_instant_round_reports_zero() {
        let t0 = Instant::now();
        let mut tracker = WpmTracker::new(10, 5);
        tracker.record("a".to_string(), t0);
        tracker.update(t0);
        fill(&mut tracker, 9, t0);
        assert_eq!(tracker.update(t0), Some(0.0));
    }
}
