//! Executor types
//!
//! States of the auth recovery sequence and the record of one run.

use crate::error::Result;
use crate::http::ApiResponse;
use std::fmt;

/// Step of the send/refresh/reacquire sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttemptState {
    /// Nothing sent yet
    Initial,
    /// First send done with whatever token was cached
    Sent,
    /// Trying the refresh endpoint
    RefreshAttempted,
    /// Refresh failed; minting a new pair with the service credential
    ReacquireAttempted,
    /// Every token source failed
    FinalAttempt,
    /// Terminal
    Done,
}

impl fmt::Display for AttemptState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttemptState::Initial => "initial",
            AttemptState::Sent => "sent",
            AttemptState::RefreshAttempted => "refresh_attempted",
            AttemptState::ReacquireAttempted => "reacquire_attempted",
            AttemptState::FinalAttempt => "final_attempt",
            AttemptState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Outcome of one executor run together with how it got there
#[derive(Debug)]
pub struct Execution {
    /// Final response, or the error that ended the run
    pub result: Result<ApiResponse>,
    /// States visited, starting with `Initial`
    pub states: Vec<AttemptState>,
    /// Number of requests sent to the target (token calls excluded)
    pub sends: u32,
}

impl Execution {
    /// Whether the run passed through `state`
    pub fn visited(&self, state: AttemptState) -> bool {
        self.states.contains(&state)
    }
}
