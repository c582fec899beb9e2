//! Battery Monitor
//!
//! Tracks battery readings across poll cycles to detect the low-battery
//! edge. Only the transition fires an alert, not every poll while the
//! level sits below the threshold.

use crate::models::BatteryReading;

/// Alert when the level drops below this percentage
pub const LOW_BATTERY_THRESHOLD: i32 = 30;

/// Edge-triggered low-battery detector
///
/// Keeps the previous reading in session state; the comparison is explicit
/// rather than inferred from UI side effects.
#[derive(Debug, Default)]
pub struct BatteryMonitor {
    /// Last known percentage. Unknown readings do not overwrite it.
    previous: Option<i32>,
}

impl BatteryMonitor {
    /// Create a new monitor with no remembered reading
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one poll's reading and return the level if the alert edge fired.
    ///
    /// Fires when `level < 30` and the level differs from the previous
    /// reading. A repeat of the same sub-threshold level stays silent, and
    /// an Unknown reading neither fires nor clears the remembered level.
    pub fn update(&mut self, reading: BatteryReading) -> Option<i32> {
        let level = match reading {
            BatteryReading::Percent(level) => level,
            BatteryReading::Unknown => return None,
        };

        let fired = level < LOW_BATTERY_THRESHOLD && self.previous != Some(level);
        self.previous = Some(level);

        if fired {
            tracing::warn!(battery = level, "Battery low");
            Some(level)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_reading_below_threshold_fires() {
        let mut monitor = BatteryMonitor::new();
        assert_eq!(monitor.update(BatteryReading::Percent(22)), Some(22));
    }

    #[test]
    fn test_first_reading_above_threshold_silent() {
        let mut monitor = BatteryMonitor::new();
        assert_eq!(monitor.update(BatteryReading::Percent(80)), None);
    }

    #[test]
    fn test_crossing_below_threshold_fires_once() {
        let mut monitor = BatteryMonitor::new();
        assert_eq!(monitor.update(BatteryReading::Percent(40)), None);
        assert_eq!(monitor.update(BatteryReading::Percent(22)), Some(22));
        assert_eq!(monitor.update(BatteryReading::Percent(22)), None);
    }

    #[test]
    fn test_each_lower_reading_fires_again() {
        let mut monitor = BatteryMonitor::new();
        assert_eq!(monitor.update(BatteryReading::Percent(25)), Some(25));
        assert_eq!(monitor.update(BatteryReading::Percent(20)), Some(20));
        assert_eq!(monitor.update(BatteryReading::Percent(20)), None);
    }

    #[test]
    fn test_unknown_reading_is_silent_and_keeps_previous() {
        let mut monitor = BatteryMonitor::new();
        assert_eq!(monitor.update(BatteryReading::Percent(22)), Some(22));
        assert_eq!(monitor.update(BatteryReading::Unknown), None);
        // Same level again after an Unknown gap does not re-fire
        assert_eq!(monitor.update(BatteryReading::Percent(22)), None);
        // A genuinely new sub-threshold level still does
        assert_eq!(monitor.update(BatteryReading::Percent(21)), Some(21));
    }

    #[test]
    fn test_recovery_then_new_crossing_fires() {
        let mut monitor = BatteryMonitor::new();
        assert_eq!(monitor.update(BatteryReading::Percent(22)), Some(22));
        assert_eq!(monitor.update(BatteryReading::Percent(50)), None);
        assert_eq!(monitor.update(BatteryReading::Percent(22)), Some(22));
    }
}
