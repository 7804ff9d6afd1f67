/// Ticket-based debounce gate.
///
/// The host owns the actual timer. Every keystroke asks the gate for a new
/// ticket and arms a timer with it; when a timer fires it hands its ticket
/// back and only the most recent one is let through. Old timers never need
/// to be cancelled, they simply lose.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebounceGate {
    latest: u64,
    pending: bool,
}

impl DebounceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new input and return the ticket its timer must present.
    pub fn schedule(&mut self) -> u64 {
        self.latest += 1;
        self.pending = true;
        self.latest
    }

    /// Timer callback. `true` means the window closed and the caller should
    /// run the debounced action now.
    pub fn fire(&mut self, ticket: u64) -> bool {
        if self.pending && ticket == self.latest {
            self.pending = false;
            true
        } else {
            false
        }
    }

    /// Explicit confirm (Enter). Invalidates any armed timer; the caller
    /// runs the action unconditionally.
    pub fn flush(&mut self) -> bool {
        let was_pending = self.pending;
        self.cancel();
        was_pending
    }

    pub fn cancel(&mut self) {
        self.latest += 1;
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_last_ticket_fires() {
        let mut gate = DebounceGate::new();
        let first = gate.schedule();
        let second = gate.schedule();

        assert!(!gate.fire(first));
        assert!(gate.fire(second));
        // a late duplicate of the same timer does nothing
        assert!(!gate.fire(second));
    }

    #[test]
    fn flush_invalidates_armed_timer() {
        let mut gate = DebounceGate::new();
        let ticket = gate.schedule();

        assert!(gate.flush());
        assert!(!gate.fire(ticket));
        assert!(!gate.is_pending());
        assert!(!gate.flush());
    }
}
