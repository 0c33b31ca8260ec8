//! Frame-table animations advanced by elapsed time.
//!
//! Every sequence has exactly four frames and its own interval. The
//! scheduler calls [`AnimationState::step`] on each pass; nothing here
//! sleeps or keeps its own clock.

use rand::Rng;

use crate::protocol::Quality;

/// Frames per sequence.
pub const FRAME_COUNT: usize = 4;

/// One row of the frame table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sequence {
    pub frames: [&'static str; FRAME_COUNT],
    pub interval_ms: u64,
    /// Looping sequences wrap; the others complete after the last frame.
    pub looping: bool,
}

/// "Thinking" ellipsis shown while the host computes.
pub const THINKING: usize = 0;

/// Blinking cursor on the move entry line.
pub const CURSOR: usize = 1;

/// First reaction sequence; each quality tier owns
/// [`REACTION_VARIANTS`] consecutive rows from here.
pub const REACTION_BASE: usize = 2;

/// Reaction rows per quality tier.
pub const REACTION_VARIANTS: usize = 2;

const REACTION_MS: u64 = 450;

pub const TABLE: [Sequence; REACTION_BASE + 5 * REACTION_VARIANTS] = [
    Sequence {
        frames: ["Thinking", "Thinking.", "Thinking..", "Thinking..."],
        interval_ms: 350,
        looping: true,
    },
    Sequence {
        frames: ["_", " ", "_", " "],
        interval_ms: 500,
        looping: true,
    },
    // Brilliant
    Sequence {
        frames: ["(*^O^*)", "(*^O^*) Super!!", "\\(^o^)/", "\\(^o^)/ Wow!!"],
        interval_ms: REACTION_MS,
        looping: false,
    },
    Sequence {
        frames: ["(@_@)", "(@_@) Brilliant!", "(@o@)", "(@o@) Brilliant!"],
        interval_ms: REACTION_MS,
        looping: false,
    },
    // Good
    Sequence {
        frames: ["(^_^)", "(^_^) Good!", "(^o^)", "(^o^) Good!"],
        interval_ms: REACTION_MS,
        looping: false,
    },
    Sequence {
        frames: ["(o_o)", "(o_o) Nice move", "(^_^)", "(^_^) Nice move"],
        interval_ms: REACTION_MS,
        looping: false,
    },
    // Inaccuracy
    Sequence {
        frames: ["(O_O )", "(O_O ) (_ _ )", "( O_O)", "(._o) Inaccuracy"],
        interval_ms: REACTION_MS,
        looping: false,
    },
    Sequence {
        frames: ["(-_-)", "(-_-) Hmmm.", "(-_-) Hmmm...", "(-_-) Hmmm....."],
        interval_ms: REACTION_MS,
        looping: false,
    },
    // Mistake
    Sequence {
        frames: ["(T_T)", "(T_T) Mistake", "(T_T) Mistake.", "(T_T) Mistake.."],
        interval_ms: REACTION_MS,
        looping: false,
    },
    Sequence {
        frames: ["(;_;)", "(;_;) Oh no", "(;_;) Oh no..", "(;_;) Oh no...."],
        interval_ms: REACTION_MS,
        looping: false,
    },
    // Blunder
    Sequence {
        frames: ["(X_X)", "(X_X) Blunder", "(X_X) Blunder!", "(X_X) Blunder!!"],
        interval_ms: REACTION_MS,
        looping: false,
    },
    Sequence {
        frames: ["(>_<)", "(>_<) Disaster", "(>_<) Disaster!", "(>_<)Disaster!!"],
        interval_ms: REACTION_MS,
        looping: false,
    },
];

/// First reaction row for a quality tier. Deterministic.
pub const fn reaction_base(quality: Quality) -> usize {
    REACTION_BASE + quality.tier() * REACTION_VARIANTS
}

/// Pick a reaction row: the tier's base plus a random variant offset.
pub fn reaction_entry<R: Rng>(quality: Quality, rng: &mut R) -> usize {
    reaction_base(quality) + rng.gen_range(0..REACTION_VARIANTS)
}

/// Position inside one sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationState {
    entry: usize,
    frame: usize,
    last_ms: u64,
}

/// Result of one [`AnimationState::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub state: AnimationState,
    /// Frame to draw, when the animation advanced.
    pub frame: Option<&'static str>,
    /// Set once for finite sequences after the last frame has had its time.
    pub completed: bool,
}

impl AnimationState {
    /// Start `entry` at frame 0. Out-of-range entries fall back to the
    /// thinking sequence.
    pub fn start(entry: usize, now_ms: u64) -> Self {
        let entry = if entry < TABLE.len() { entry } else { THINKING };
        Self {
            entry,
            frame: 0,
            last_ms: now_ms,
        }
    }

    pub fn entry(&self) -> usize {
        self.entry
    }

    pub fn frame_index(&self) -> usize {
        self.frame
    }

    pub fn sequence(&self) -> &'static Sequence {
        &TABLE[self.entry]
    }

    pub fn current_frame(&self) -> &'static str {
        self.sequence().frames[self.frame]
    }

    /// Advance if the interval elapsed since the last advance.
    pub fn step(self, now_ms: u64) -> Step {
        let seq = self.sequence();
        if now_ms.saturating_sub(self.last_ms) < seq.interval_ms {
            return Step {
                state: self,
                frame: None,
                completed: false,
            };
        }

        let next = self.frame + 1;
        if next < FRAME_COUNT || seq.looping {
            let frame = next % FRAME_COUNT;
            let state = Self {
                entry: self.entry,
                frame,
                last_ms: now_ms,
            };
            Step {
                state,
                frame: Some(seq.frames[frame]),
                completed: false,
            }
        } else {
            Step {
                state: Self {
                    last_ms: now_ms,
                    ..self
                },
                frame: None,
                completed: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn frames_fit_the_display() {
        for seq in TABLE.iter() {
            for frame in seq.frames {
                assert!(frame.len() <= crate::config::LCD_COLS, "{frame}");
            }
        }
    }

    #[test]
    fn waits_for_interval() {
        let a = AnimationState::start(THINKING, 100);
        let s = a.step(449);
        assert_eq!(s.frame, None);
        assert_eq!(s.state, a);
        let s = a.step(450);
        assert_eq!(s.frame, Some("Thinking."));
    }

    #[test]
    fn looping_sequence_wraps() {
        let mut a = AnimationState::start(THINKING, 0);
        let mut now = 0;
        for _ in 0..FRAME_COUNT {
            now += 350;
            let s = a.step(now);
            assert!(!s.completed);
            a = s.state;
        }
        assert_eq!(a.frame_index(), 0);
        assert_eq!(a.current_frame(), "Thinking");
    }

    #[test]
    fn reaction_completes_after_four_frames() {
        let mut a = AnimationState::start(reaction_base(Quality::Good), 0);
        assert_eq!(a.current_frame(), "(^_^)");
        let mut shown = 1;
        let mut now = 0;
        loop {
            now += REACTION_MS;
            let s = a.step(now);
            a = s.state;
            if s.completed {
                break;
            }
            if s.frame.is_some() {
                shown += 1;
            }
        }
        assert_eq!(shown, FRAME_COUNT);
    }

    #[test]
    fn reaction_variants_stay_in_their_tier() {
        let mut rng = SmallRng::seed_from_u64(7);
        for quality in Quality::ALL {
            let base = reaction_base(quality);
            for _ in 0..32 {
                let entry = reaction_entry(quality, &mut rng);
                assert!(entry >= base && entry < base + REACTION_VARIANTS);
            }
        }
    }

    #[test]
    fn tiers_are_disjoint_and_ordered() {
        assert_eq!(reaction_base(Quality::Brilliant), REACTION_BASE);
        assert_eq!(reaction_base(Quality::Blunder), TABLE.len() - REACTION_VARIANTS);
    }

    #[test]
    fn out_of_range_entry_falls_back() {
        assert_eq!(AnimationState::start(999, 0).entry(), THINKING);
    }
}
