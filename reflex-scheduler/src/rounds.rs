/// Result of closing one presentation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundUpdate {
    pub round: u32,
    /// Rounds still to go; `None` when unlimited or past the limit.
    pub remaining: Option<u32>,
    pub finished: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RoundTracker {
    completed: u32,
    limit: Option<u32>,
}

impl RoundTracker {
    pub fn new(limit: Option<u32>) -> Self {
        Self {
            completed: 0,
            limit,
        }
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    pub fn remaining(&self) -> Option<u32> {
        self.limit.and_then(|limit| limit.checked_sub(self.completed))
    }

    pub fn is_finished(&self) -> bool {
        self.limit.is_some_and(|limit| self.completed >= limit)
    }

    /// Called once per completed cycle, never per channel.
    pub fn increment(&mut self) -> RoundUpdate {
        self.completed = self.completed.saturating_add(1);
        RoundUpdate {
            round: self.completed,
            remaining: self.remaining(),
            finished: self.is_finished(),
        }
    }
}
