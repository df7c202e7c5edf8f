//! Per-session request generations
//!
//! Every request of a session takes a ticket. A ticket stays current until a
//! newer ticket is issued for the same session, which lets the latest request
//! win regardless of the order in which responses arrive.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::Mutex;

/// Default number of tracked sessions before idle ones are pruned
pub const DEFAULT_SESSION_CAPACITY: usize = 1024;

/// Issues generation tickets per session
#[derive(Debug)]
pub struct RequestGenerations {
    sessions: Mutex<HashMap<String, Arc<AtomicU64>>>,
    capacity: usize,
}

/// Proof of a request's position within its session
#[derive(Debug)]
pub struct GenerationTicket {
    counter: Arc<AtomicU64>,
    generation: u64,
}

impl RequestGenerations {
    /// Create a tracker that prunes idle sessions beyond `capacity`
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Issue a new ticket, superseding all earlier tickets of `session`
    pub fn issue(&self, session: &str) -> GenerationTicket {
        let mut sessions = self.sessions.lock();

        if !sessions.contains_key(session) && sessions.len() >= self.capacity {
            sessions.retain(|_, counter| Arc::strong_count(counter) > 1);
        }

        let counter = Arc::clone(
            sessions
                .entry(session.to_string())
                .or_insert_with(|| Arc::new(AtomicU64::new(0))),
        );
        let generation = counter.fetch_add(1, Ordering::AcqRel) + 1;

        GenerationTicket {
            counter,
            generation,
        }
    }

    /// Number of tracked sessions
    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }
}

impl Default for RequestGenerations {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_CAPACITY)
    }
}

impl GenerationTicket {
    /// Whether no newer ticket has been issued for this session
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::Acquire) == self.generation
    }

    /// Generation number within the session, starting at 1
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
