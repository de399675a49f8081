//=========================================================================
// Frame Queue
//=========================================================================
//
// Tasks deferred to the next frame boundary.
//
// Producers schedule tasks during a frame and receive a ticket. The owner
// calls `take_due()` at the next frame boundary and handles everything
// scheduled so far. A ticket can be cancelled any time before that.
//
// Pattern: schedule (N) → [cancel] → take_due at frame boundary → repeat
//
//=========================================================================

//=== FrameTicket =========================================================

/// Handle of a scheduled task, unique for the lifetime of its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameTicket(u64);

//=== FrameQueue ==========================================================

/// Queue of tasks that run at the next frame boundary.
///
/// Tasks come back in scheduling order. Tasks scheduled while the due
/// batch is being handled belong to the following frame.
#[derive(Debug)]
pub struct FrameQueue<T> {
    queue: Vec<(FrameTicket, T)>,
    next_ticket: u64,
}

impl<T> FrameQueue<T> {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            next_ticket: 0,
        }
    }

    /// Schedules `task` for the next frame boundary.
    pub fn schedule(&mut self, task: T) -> FrameTicket {
        let ticket = FrameTicket(self.next_ticket);
        self.next_ticket += 1;
        self.queue.push((ticket, task));
        ticket
    }

    /// Cancels a pending task. Returns `false` if it already ran or was
    /// cancelled before.
    pub fn cancel(&mut self, ticket: FrameTicket) -> bool {
        match self.queue.iter().position(|(t, _)| *t == ticket) {
            Some(index) => {
                self.queue.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if the ticket is still waiting.
    pub fn is_pending(&self, ticket: FrameTicket) -> bool {
        self.queue.iter().any(|(t, _)| *t == ticket)
    }

    /// Takes every task scheduled so far, leaving the queue empty.
    pub fn take_due(&mut self) -> Vec<(FrameTicket, T)> {
        std::mem::take(&mut self.queue)
    }

    /// Returns the number of pending tasks.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drops every pending task.
    pub fn clear(&mut self) {
        self.queue.clear()
    }
}

impl<T> Default for FrameQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
