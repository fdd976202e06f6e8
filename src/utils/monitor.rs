#[cfg(feature = "cli")]
use std::sync::Mutex;
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, System};

#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: String,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
    pub elapsed_time: Duration,
}

/// Tracks wall time per pipeline phase and, with the `cli` feature, process memory.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    start_time: Instant,
    peak_memory: Mutex<u64>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let mut system = System::new();
        let pid = sysinfo::get_current_pid().ok();

        if enabled {
            system.refresh_all();
        }

        Self {
            system: Mutex::new(system),
            pid,
            start_time: Instant::now(),
            peak_memory: Mutex::new(0),
            enabled,
        }
    }

    pub fn snapshot(&self, phase: &str) -> Option<PhaseStats> {
        if !self.enabled {
            return None;
        }

        let mut system = self.system.lock().ok()?;
        system.refresh_all();

        let memory_mb = self
            .pid
            .and_then(|pid| system.process(pid))
            .map(|process| process.memory() / 1024 / 1024)
            .unwrap_or(0);

        let mut peak = self.peak_memory.lock().ok()?;
        *peak = (*peak).max(memory_mb);

        Some(PhaseStats {
            phase: phase.to_string(),
            memory_usage_mb: memory_mb,
            peak_memory_mb: *peak,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(not(feature = "cli"))]
pub struct SystemMonitor {
    start_time: Instant,
    enabled: bool,
}

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        Self {
            start_time: Instant::now(),
            enabled,
        }
    }

    pub fn snapshot(&self, phase: &str) -> Option<PhaseStats> {
        self.enabled.then(|| PhaseStats {
            phase: phase.to_string(),
            memory_usage_mb: 0,
            peak_memory_mb: 0,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl SystemMonitor {
    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.snapshot(phase) {
            tracing::info!(
                "📊 {} - Memory: {}MB, Peak: {}MB, Time: {:?}",
                stats.phase,
                stats.memory_usage_mb,
                stats.peak_memory_mb,
                stats.elapsed_time
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(stats) = self.snapshot("final") {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                stats.elapsed_time,
                stats.peak_memory_mb
            );
        }
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_reports_nothing() {
        let monitor = SystemMonitor::default();
        assert!(!monitor.is_enabled());
        assert!(monitor.snapshot("extract").is_none());
    }

    #[test]
    fn test_enabled_monitor_tracks_phase() {
        let monitor = SystemMonitor::new(true);
        let stats = monitor.snapshot("transform").unwrap();

        assert_eq!(stats.phase, "transform");
        assert!(stats.peak_memory_mb >= stats.memory_usage_mb);
    }
}
