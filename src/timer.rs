/// Cooperative periodic timer.
///
/// The game never sleeps inside its update logic; the shell feeds elapsed
/// milliseconds in and the timer reports how many periods completed.
/// Starting a stopped timer restarts its full delay.

#[derive(Clone, Debug, PartialEq)]
pub struct Timer {
    pub period_ms: u64,
    /// Time accumulated towards the next firing.
    pub elapsed_ms: u64,
    pub running: bool,
}

impl Timer {
    /// A stopped timer.
    pub fn new(period_ms: u64) -> Self {
        Timer {
            period_ms: period_ms.max(1),
            elapsed_ms: 0,
            running: false,
        }
    }

    /// No-op if already running.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.elapsed_ms = 0;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed_ms = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by `dt_ms` and return the number of firings.
    pub fn advance(&mut self, dt_ms: u64) -> u64 {
        if !self.running {
            return 0;
        }
        self.elapsed_ms += dt_ms;
        let fires = self.elapsed_ms / self.period_ms;
        self.elapsed_ms %= self.period_ms;
        fires
    }
}
