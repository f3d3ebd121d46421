//! The candle on the cake goes out when the microphone hears a blow.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleState {
    /// Waiting for the cake to be clicked.
    Idle,
    /// Microphone levels are being streamed.
    Listening,
    Blown,
}

/// Turns microphone levels into a single "blown" signal.
///
/// The host only streams average levels; everything else is decided here.
/// If the microphone is unavailable the candle counts as blown, so the
/// stage can always finish.
#[derive(Debug, Clone)]
pub struct CandleTrigger {
    threshold: f32,
    state: CandleState,
}

impl CandleTrigger {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            state: CandleState::Idle,
        }
    }

    pub fn state(&self) -> CandleState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state == CandleState::Listening
    }

    pub fn is_blown(&self) -> bool {
        self.state == CandleState::Blown
    }

    /// Start listening. Returns true if the microphone should be opened.
    pub fn start(&mut self) -> bool {
        if self.state != CandleState::Idle {
            return false;
        }
        self.state = CandleState::Listening;
        true
    }

    /// Feed one average level sample (0-255). Returns true on the sample that blows the candle.
    pub fn feed(&mut self, level: f32) -> bool {
        if self.state != CandleState::Listening || level <= self.threshold {
            return false;
        }
        self.state = CandleState::Blown;
        true
    }

    /// The microphone could not be opened. Returns true if this blew the candle.
    /// Only a request made by `start` can be denied.
    pub fn deny(&mut self) -> bool {
        if self.state != CandleState::Listening {
            return false;
        }
        self.state = CandleState::Blown;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_ignored_until_started() {
        let mut candle = CandleTrigger::new(100.0);
        assert!(!candle.feed(255.0));
        assert_eq!(candle.state(), CandleState::Idle);
    }

    #[test]
    fn blows_once_above_threshold() {
        let mut candle = CandleTrigger::new(100.0);
        assert!(candle.start());
        assert!(!candle.start());
        assert!(!candle.feed(40.0));
        assert!(!candle.feed(100.0));
        assert!(candle.feed(101.0));
        assert!(!candle.feed(200.0));
        assert!(candle.is_blown());
    }

    #[test]
    fn denied_microphone_falls_back_to_blown() {
        let mut candle = CandleTrigger::new(100.0);
        candle.start();
        assert!(candle.deny());
        assert!(candle.is_blown());
        assert!(!candle.deny());
    }

    #[test]
    fn denial_before_listening_is_ignored() {
        let mut candle = CandleTrigger::new(100.0);
        assert!(!candle.deny());
        assert!(!candle.is_blown());
        assert!(candle.start());
    }
}
