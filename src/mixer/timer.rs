pub const MIN_DURATION_MINS: u32 = 5;
pub const MAX_DURATION_MINS: u32 = 120;
pub const DEFAULT_DURATION_MINS: u32 = 30;

/// Countdown state machine: Idle -> Running -> (cancel -> Idle, or hit zero
/// -> report Expired and return to Idle). The one-second granularity here
/// only drives the countdown display; the audible fade that follows expiry
/// runs on the audio clock, not on this ticker.
#[derive(Clone, Debug)]
pub struct SleepTimer {
    pub duration_mins: u32,
    pub remaining_secs: u32,
    pub initial_secs: u32,
    pub running: bool,
    carry: f64, // sub-second remainder between ticks
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerTick {
    Idle,
    Running,
    Expired,
}

impl Default for SleepTimer {
    fn default() -> Self {
        Self {
            duration_mins: DEFAULT_DURATION_MINS,
            remaining_secs: 0,
            initial_secs: 0,
            running: false,
            carry: 0.0,
        }
    }
}

impl SleepTimer {
    pub fn start(&mut self) {
        self.initial_secs = self.duration_mins * 60;
        self.remaining_secs = self.initial_secs;
        self.carry = 0.0;
        self.running = true;
    }

    pub fn cancel(&mut self) {
        self.running = false;
        self.remaining_secs = 0;
        self.initial_secs = 0;
        self.carry = 0.0;
    }

    /// Step the configured duration. Only meaningful while idle; the running
    /// countdown keeps the duration it was started with.
    pub fn adjust(&mut self, delta_mins: i32) {
        if self.running {
            return;
        }
        let next = self.duration_mins as i64 + delta_mins as i64;
        self.duration_mins = next.clamp(MIN_DURATION_MINS as i64, MAX_DURATION_MINS as i64) as u32;
    }

    /// Advance by `elapsed` wall-clock seconds. The frame loop runs much
    /// faster than once a second, so fractional time accumulates in `carry`
    /// until a whole second has passed.
    pub fn tick(&mut self, elapsed: f64) -> TimerTick {
        if !self.running {
            return TimerTick::Idle;
        }
        self.carry += elapsed;
        while self.carry >= 1.0 && self.remaining_secs > 0 {
            self.carry -= 1.0;
            self.remaining_secs -= 1;
        }
        if self.remaining_secs == 0 {
            self.running = false;
            return TimerTick::Expired;
        }
        TimerTick::Running
    }
}

/// HH:MM:SS for the running countdown.
pub fn format_remaining(seconds: u32) -> String {
    let hrs = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hrs:02}:{mins:02}:{secs:02}")
}

/// "1h 30m" style label for the configured duration.
pub fn format_duration(minutes: u32) -> String {
    let hrs = minutes / 60;
    let mins = minutes % 60;
    if hrs > 0 {
        format!("{hrs}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_the_configured_duration() {
        let mut timer = SleepTimer::default();
        timer.adjust(-25); // 30 -> 5
        timer.start();
        assert!(timer.running);
        assert_eq!(timer.remaining_secs, 5 * 60);
        assert_eq!(timer.initial_secs, 5 * 60);
    }

    #[test]
    fn adjust_clamps_to_bounds_and_ignores_running() {
        let mut timer = SleepTimer::default();
        timer.adjust(1000);
        assert_eq!(timer.duration_mins, MAX_DURATION_MINS);
        timer.adjust(-1000);
        assert_eq!(timer.duration_mins, MIN_DURATION_MINS);

        timer.start();
        timer.adjust(50);
        assert_eq!(timer.duration_mins, MIN_DURATION_MINS);
    }

    #[test]
    fn fractional_ticks_accumulate_into_whole_seconds() {
        let mut timer = SleepTimer::default();
        timer.start();
        let before = timer.remaining_secs;
        for _ in 0..4 {
            assert_eq!(timer.tick(0.25), TimerTick::Running);
        }
        // four quarter-second ticks = exactly one second gone
        assert_eq!(before - timer.remaining_secs, 1);
    }

    #[test]
    fn expires_exactly_once_then_goes_idle() {
        let mut timer = SleepTimer::default();
        timer.adjust(-25);
        timer.start();
        assert_eq!(timer.tick(5.0 * 60.0 + 0.5), TimerTick::Expired);
        assert!(!timer.running);
        assert_eq!(timer.tick(1.0), TimerTick::Idle);
    }

    #[test]
    fn cancel_resets_remaining_time() {
        let mut timer = SleepTimer::default();
        timer.start();
        timer.tick(3.0);
        timer.cancel();
        assert!(!timer.running);
        assert_eq!(timer.remaining_secs, 0);
        assert_eq!(timer.tick(10.0), TimerTick::Idle);
    }

    #[test]
    fn formatting() {
        assert_eq!(format_remaining(3725), "01:02:05");
        assert_eq!(format_duration(90), "1h 30m");
        assert_eq!(format_duration(45), "45m");
    }
}
