//! Transition tables and the offset lookups built on them.

use alloc::vec::Vec;

use crate::ZoneRulesError;

/// `UtcOffsetSeconds` represents the amount of seconds we need to add to UTC
/// to reach the local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UtcOffsetSeconds(pub i32);

/// A single change of offset at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The instant, in seconds since the Unix epoch, at which `after` takes effect.
    pub epoch_seconds: i64,
    /// The offset in effect immediately before the transition.
    pub before: UtcOffsetSeconds,
    /// The offset in effect from the transition onwards.
    pub after: UtcOffsetSeconds,
}

impl Transition {
    pub const fn new(
        epoch_seconds: i64,
        before: UtcOffsetSeconds,
        after: UtcOffsetSeconds,
    ) -> Self {
        Self {
            epoch_seconds,
            before,
            after,
        }
    }

    /// Local seconds at which this transition's wall clock window starts.
    fn local_start(&self) -> i64 {
        self.epoch_seconds + i64::from(self.before.0.min(self.after.0))
    }

    /// Local seconds at which this transition's wall clock window ends (exclusive).
    fn local_end(&self) -> i64 {
        self.epoch_seconds + i64::from(self.before.0.max(self.after.0))
    }
}

/// The valid offsets for a local date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalOffsets {
    /// Exactly one offset is valid.
    Unique(UtcOffsetSeconds),
    /// The local time was skipped by a forward transition.
    Gap {
        before: UtcOffsetSeconds,
        after: UtcOffsetSeconds,
        transition_epoch: i64,
    },
    /// The local time occurs twice because of a backward transition.
    Overlap {
        earlier: UtcOffsetSeconds,
        later: UtcOffsetSeconds,
        transition_epoch: i64,
    },
}

impl LocalOffsets {
    /// Returns the valid offset belonging to the earliest instant, if any.
    pub fn first(&self) -> Option<UtcOffsetSeconds> {
        match *self {
            Self::Unique(offset) => Some(offset),
            Self::Gap { .. } => None,
            Self::Overlap { earlier, .. } => Some(earlier),
        }
    }

    /// Returns whether `offset` is valid for the local time.
    pub fn contains(&self, offset: UtcOffsetSeconds) -> bool {
        match *self {
            Self::Unique(unique) => unique == offset,
            Self::Gap { .. } => false,
            Self::Overlap { earlier, later, .. } => earlier == offset || later == offset,
        }
    }

    /// The number of valid offsets: 0 in a gap, 2 in an overlap, otherwise 1.
    pub fn len(&self) -> usize {
        match self {
            Self::Unique(_) => 1,
            Self::Gap { .. } => 0,
            Self::Overlap { .. } => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Gap { .. })
    }
}

/// The full offset history of a single zone region at one rule version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    initial: UtcOffsetSeconds,
    transitions: Vec<Transition>,
}

impl TransitionTable {
    /// Creates a table for a zone that has never changed its offset.
    pub const fn fixed(offset: UtcOffsetSeconds) -> Self {
        Self {
            initial: offset,
            transitions: Vec::new(),
        }
    }

    /// Creates a table from an initial offset and its transitions.
    ///
    /// Transitions must be strictly ascending by instant, and each
    /// transition's `before` offset must equal the offset in effect before it.
    pub fn try_new(
        initial: UtcOffsetSeconds,
        transitions: Vec<Transition>,
    ) -> Result<Self, ZoneRulesError> {
        let mut current = initial;
        let mut last_epoch = None;
        for transition in &transitions {
            if transition.before != current
                || last_epoch.is_some_and(|epoch| epoch >= transition.epoch_seconds)
            {
                return Err(ZoneRulesError::InvalidTransitions);
            }
            current = transition.after;
            last_epoch = Some(transition.epoch_seconds);
        }
        Ok(Self {
            initial,
            transitions,
        })
    }

    pub fn initial(&self) -> UtcOffsetSeconds {
        self.initial
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Returns the offset in effect at `epoch_seconds`.
    pub fn offset_at(&self, epoch_seconds: i64) -> UtcOffsetSeconds {
        let idx = self
            .transitions
            .partition_point(|t| t.epoch_seconds <= epoch_seconds);
        match idx.checked_sub(1) {
            Some(previous) => self.transitions[previous].after,
            None => self.initial,
        }
    }

    /// Returns the offsets valid for a wall clock reading given as local
    /// seconds since 1970-01-01T00:00.
    pub fn local_offsets(&self, local_seconds: i64) -> LocalOffsets {
        let idx = self
            .transitions
            .partition_point(|t| t.local_start() <= local_seconds);
        let Some(previous) = idx.checked_sub(1) else {
            return LocalOffsets::Unique(self.initial);
        };
        let transition = self.transitions[previous];
        if local_seconds >= transition.local_end() {
            return LocalOffsets::Unique(transition.after);
        }
        if transition.after.0 > transition.before.0 {
            LocalOffsets::Gap {
                before: transition.before,
                after: transition.after,
                transition_epoch: transition.epoch_seconds,
            }
        } else {
            LocalOffsets::Overlap {
                earlier: transition.before,
                later: transition.after,
                transition_epoch: transition.epoch_seconds,
            }
        }
    }
}
