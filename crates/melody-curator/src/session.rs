//! Per-session request state.
//!
//! A session walks `Idle → Requesting → {Success, Failed}` and back to
//! `Requesting` on the next user action. Only one request is in flight at a
//! time; each request gets a [`Ticket`] and a completion is applied only if
//! its ticket is still the current one, so a result that arrives after a
//! reset or a newer request is dropped.

use melody_core::model::Song;
use melody_core::{RecommendationInput, RecommendationResponse};

use crate::error::CurateResult;
use crate::generator::Generator;
use crate::requester::Requester;

/// Identifies one request issued by a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Requesting { ticket: Ticket },
    Success(RecommendationResponse),
    Failed { message: String },
}

#[derive(Debug)]
pub struct Session {
    state: SessionState,
    last_input: Option<RecommendationInput>,
    next_ticket: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            last_input: None,
            next_ticket: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_requesting(&self) -> bool {
        matches!(self.state, SessionState::Requesting { .. })
    }

    /// Songs of the latest successful request; empty in every other state.
    pub fn songs(&self) -> &[Song] {
        match &self.state {
            SessionState::Success(response) => response.songs.as_slice(),
            _ => &[],
        }
    }

    /// User-facing message of the latest failed request.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SessionState::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn last_input(&self) -> Option<&RecommendationInput> {
        self.last_input.as_ref()
    }

    /// Start a request for `input`.
    ///
    /// Returns `None` without changing state while another request is in
    /// flight or when `input` fails validation.
    pub fn begin(&mut self, input: RecommendationInput) -> Option<Ticket> {
        if self.is_requesting() {
            log::debug!("Ignoring submission while a request is in flight");
            return None;
        }
        if let Err(e) = input.validate() {
            log::debug!("Ignoring invalid submission: {e}");
            return None;
        }

        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.state = SessionState::Requesting { ticket };
        self.last_input = Some(input);
        Some(ticket)
    }

    /// Start a new request with the last submitted input.
    pub fn rerequest(&mut self) -> Option<Ticket> {
        let input = self.last_input.clone()?;
        self.begin(input)
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// Returns `false` and leaves state untouched if `ticket` is stale. A
    /// success replaces the previous songs in full; a failure leaves no
    /// songs and records one user-facing message.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: CurateResult<RecommendationResponse>,
    ) -> bool {
        if self.state != (SessionState::Requesting { ticket }) {
            log::debug!("Discarding stale completion for {ticket:?}");
            return false;
        }

        self.state = match result {
            Ok(response) => SessionState::Success(response),
            Err(e) => {
                log::warn!("Recommendation request failed: {e}");
                SessionState::Failed {
                    message: e.user_message(),
                }
            }
        };
        true
    }

    /// Back to `Idle`, dropping input, songs, and error.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.last_input = None;
    }

    /// Begin a request for `input`, await it, and apply the outcome.
    ///
    /// Returns `false` if the submission was ignored.
    pub async fn run<G: Generator>(
        &mut self,
        requester: &Requester<G>,
        input: RecommendationInput,
    ) -> bool {
        let Some(ticket) = self.begin(input.clone()) else {
            return false;
        };
        let result = requester.request_recommendations(&input).await;
        self.complete(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CurateError, FAILURE_MESSAGE};
    use melody_core::model::Category;
    use melody_core::UserPreferences;

    fn theme(text: &str) -> RecommendationInput {
        RecommendationInput::theme(text).unwrap()
    }

    fn response(title: &str) -> RecommendationResponse {
        RecommendationResponse::new(vec![Song::new(title, "artist", "reason", Category::Korean)])
    }

    #[test]
    fn test_begin_moves_to_requesting() {
        let mut session = Session::new();
        assert_eq!(session.state(), &SessionState::Idle);

        let ticket = session.begin(theme("신나는 팝")).unwrap();
        assert_eq!(session.state(), &SessionState::Requesting { ticket });
        assert!(session.songs().is_empty());
    }

    #[test]
    fn test_submission_ignored_while_in_flight() {
        let mut session = Session::new();
        let first = session.begin(theme("a")).unwrap();
        assert!(session.begin(theme("b")).is_none());
        assert_eq!(session.state(), &SessionState::Requesting { ticket: first });
        assert_eq!(session.last_input(), Some(&theme("a")));
    }

    #[test]
    fn test_invalid_input_ignored() {
        let mut session = Session::new();
        assert!(session
            .begin(RecommendationInput::from(UserPreferences::new()))
            .is_none());
        assert_eq!(session.state(), &SessionState::Idle);
    }

    #[test]
    fn test_success_replaces_songs() {
        let mut session = Session::new();
        let ticket = session.begin(theme("a")).unwrap();
        assert!(session.complete(ticket, Ok(response("first"))));
        assert_eq!(session.songs()[0].title, "first");

        let ticket = session.rerequest().unwrap();
        assert!(session.songs().is_empty());
        assert!(session.complete(ticket, Ok(response("second"))));
        assert_eq!(session.songs().len(), 1);
        assert_eq!(session.songs()[0].title, "second");
    }

    #[test]
    fn test_failure_has_no_songs_and_one_message() {
        let mut session = Session::new();
        let ticket = session.begin(theme("a")).unwrap();
        let error = CurateError::EmptyResponse {
            source_name: "Gemini".to_string(),
        };
        assert!(session.complete(ticket, Err(error)));
        assert!(session.songs().is_empty());
        assert_eq!(session.error(), Some(FAILURE_MESSAGE));

        // A new action from Failed goes back to Requesting.
        assert!(session.rerequest().is_some());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_stale_completion_discarded_after_reset() {
        let mut session = Session::new();
        let ticket = session.begin(theme("a")).unwrap();
        session.reset();

        assert!(!session.complete(ticket, Ok(response("late"))));
        assert_eq!(session.state(), &SessionState::Idle);
        assert!(session.last_input().is_none());
        assert!(session.rerequest().is_none());
    }

    #[test]
    fn test_old_ticket_cannot_complete_newer_request() {
        let mut session = Session::new();
        let old = session.begin(theme("a")).unwrap();
        session.reset();
        let new = session.begin(theme("b")).unwrap();
        assert_ne!(old, new);

        assert!(!session.complete(old, Ok(response("old"))));
        assert!(session.complete(new, Ok(response("new"))));
        assert_eq!(session.songs()[0].title, "new");
    }
}
