use std::fmt;

/// Every screen of the show, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    Fullscreen,
    Auth,
    Blackout,
    Fireworks,
    Hero,
    Countdown,
    Memories,
    Gallery,
    Celebration,
    Letter,
    Done,
}

impl StageId {
    pub const ALL: [StageId; 11] = [
        Self::Fullscreen, Self::Auth, Self::Blackout, Self::Fireworks,
        Self::Hero, Self::Countdown, Self::Memories, Self::Gallery,
        Self::Celebration, Self::Letter, Self::Done,
    ];

    /// The stage after this one. `Done` has none.
    pub fn next(self) -> Option<StageId> {
        Self::ALL.get(self.index() as usize + 1).copied()
    }

    /// Position in the sequence, published to the host.
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Fullscreen => "fullscreen",
            Self::Auth => "auth",
            Self::Blackout => "blackout",
            Self::Fireworks => "fireworks",
            Self::Hero => "hero",
            Self::Countdown => "countdown",
            Self::Memories => "memories",
            Self::Gallery => "gallery",
            Self::Celebration => "celebration",
            Self::Letter => "letter",
            Self::Done => "done",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Done
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Holds the current stage and only ever moves it one step forward.
#[derive(Debug, Clone)]
pub struct Sequencer {
    current: StageId,
}

impl Sequencer {
    pub fn new() -> Self {
        Self { current: StageId::Fullscreen }
    }

    pub fn current(&self) -> StageId {
        self.current
    }

    /// Move to the next stage and return it. A no-op at `Done`.
    pub fn advance(&mut self) -> Option<StageId> {
        let next = self.current.next()?;
        self.current = next;
        Some(next)
    }

    pub fn is_finished(&self) -> bool {
        self.current.is_terminal()
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_fullscreen() {
        assert_eq!(Sequencer::new().current(), StageId::Fullscreen);
    }

    #[test]
    fn advances_through_every_stage_once() {
        let mut seq = Sequencer::new();
        let mut visited = vec![seq.current()];
        while let Some(stage) = seq.advance() {
            visited.push(stage);
        }
        assert_eq!(visited, StageId::ALL.to_vec());
        assert!(seq.is_finished());
    }

    #[test]
    fn done_is_a_fixed_point() {
        let mut seq = Sequencer::new();
        while seq.advance().is_some() {}
        assert_eq!(seq.advance(), None);
        assert_eq!(seq.current(), StageId::Done);
    }

    #[test]
    fn index_matches_order() {
        for (i, stage) in StageId::ALL.iter().enumerate() {
            assert_eq!(stage.index(), i as u32);
        }
        assert_eq!(StageId::Auth.next(), Some(StageId::Blackout));
        assert_eq!(StageId::Letter.to_string(), "letter");
    }
}
