use std::collections::BTreeMap;

use serde::Serialize;

/// Owning context for scheduled events. Cancellation is scoped to a whole
/// context; there is no per-event cancel.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ContextId {
    Scene(String),
    Overlay,
    /// Overlay fade teardown. Never passed to `cancel_all`; hiding the
    /// overlay is terminal once the fade has started.
    OverlayFade,
}

impl ContextId {
    pub fn scene(id: &str) -> Self {
        ContextId::Scene(id.to_string())
    }
}

/// A delayed action attributed to an owning context.
pub struct ScheduledEvent<A> {
    fire_at: u64,
    seq: u64,
    owner: ContextId,
    generation: u64,
    action: A,
}

impl<A> ScheduledEvent<A> {
    pub fn fire_at(&self) -> u64 {
        self.fire_at
    }

    pub fn owner(&self) -> &ContextId {
        &self.owner
    }

    pub fn into_action(self) -> A {
        self.action
    }
}

/// Sorted-deadline queue keyed by owning context.
///
/// Each context carries a generation counter. `cancel_all` drains the
/// context's pending events *and* bumps the generation, so an event that was
/// already pulled into a firing batch is recognised as dead via `is_live`
/// before it runs. From the caller's perspective cancellation is race-free:
/// an action either ran to completion before the cancel, or not at all.
pub struct EventScheduler<A> {
    pending: Vec<ScheduledEvent<A>>,
    next_seq: u64,
    generations: BTreeMap<ContextId, u64>,
}

impl<A> Default for EventScheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> EventScheduler<A> {
    pub fn new() -> Self {
        EventScheduler {
            pending: Vec::new(),
            next_seq: 0,
            generations: BTreeMap::new(),
        }
    }

    /// Arms `action` to fire `delay_ms` after `now`, attributed to `owner`.
    /// Same-instant events keep registration order.
    pub fn schedule(&mut self, owner: ContextId, now: u64, delay_ms: u64, action: A) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        let event = ScheduledEvent {
            fire_at: now.saturating_add(delay_ms),
            seq,
            owner: owner.clone(),
            generation: self.generation_of(&owner),
            action,
        };
        let position = self
            .pending
            .partition_point(|pending| (pending.fire_at, pending.seq) <= (event.fire_at, seq));
        self.pending.insert(position, event);
        seq
    }

    /// Cancels every still-pending event owned by `context` and invalidates
    /// any of its events already taken for firing. Safe to call repeatedly
    /// and with nothing pending.
    pub fn cancel_all(&mut self, context: &ContextId) {
        self.pending.retain(|event| &event.owner != context);
        *self.generations.entry(context.clone()).or_insert(0) += 1;
    }

    /// Removes and returns every event at the earliest deadline at or before
    /// `limit`, together with that deadline. Events scheduled while a batch
    /// is being fired land back in the queue and wait for the next take, so
    /// zero-delay scheduling is never synchronous.
    pub fn take_due_batch(&mut self, limit: u64) -> Option<(u64, Vec<ScheduledEvent<A>>)> {
        let fire_at = self.pending.first().map(|event| event.fire_at)?;
        if fire_at > limit {
            return None;
        }
        let count = self
            .pending
            .iter()
            .take_while(|event| event.fire_at == fire_at)
            .count();
        let batch: Vec<ScheduledEvent<A>> = self.pending.drain(..count).collect();
        Some((fire_at, batch))
    }

    /// Whether a taken event still belongs to a live generation of its owner.
    pub fn is_live(&self, event: &ScheduledEvent<A>) -> bool {
        self.generation_of(&event.owner) == event.generation
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.first().map(|event| event.fire_at)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_for(&self, context: &ContextId) -> usize {
        self.pending
            .iter()
            .filter(|event| &event.owner == context)
            .count()
    }

    fn generation_of(&self, context: &ContextId) -> u64 {
        self.generations.get(context).copied().unwrap_or(0)
    }
}
