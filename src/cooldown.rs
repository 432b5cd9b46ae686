//! Frame-counted debounce shared by the panel toggle buttons.

/// Frames a toggle stays locked after it fires.
pub const RELOAD_FRAMES: u32 = 10;
/// Lock applied at launch so a hand already hovering a toggle does not fire it.
pub const STARTUP_FRAMES: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cooldown {
    remaining: u32,
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::new(STARTUP_FRAMES)
    }
}

impl Cooldown {
    pub fn new(remaining: u32) -> Self {
        Self { remaining }
    }

    /// Count one processed frame.
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn can_fire(&self) -> bool {
        self.remaining == 0
    }

    pub fn fire(&mut self) {
        self.remaining = RELOAD_FRAMES;
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_locks_for_ten_ticks() {
        let mut c = Cooldown::new(0);
        assert!(c.can_fire());
        c.fire();
        for _ in 0..9 {
            c.tick();
        }
        assert!(!c.can_fire());
        c.tick();
        assert!(c.can_fire());
    }

    #[test]
    fn tick_stops_at_zero() {
        let mut c = Cooldown::new(1);
        c.tick();
        c.tick();
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn starts_locked() {
        assert_eq!(Cooldown::default().remaining(), STARTUP_FRAMES);
    }
}
