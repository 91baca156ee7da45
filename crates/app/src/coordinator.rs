//! Submission coordinator
//!
//! Turns a valid draft into exactly one create-booking request and reconciles
//! the confirmed booking into the owned booking list.

use std::{
    fmt,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use encore::{
    composer::{BookingComposer, ValidationError},
    drafts::BookingDraft,
};
use jiff::Timestamp;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    api::{ApiError, BookingApi, ServerRejection},
    bookings::{BookingList, BookingResult},
    dto::{BookingRequest, NormalizeError},
    session::{Role, SessionContext},
};

/// Errors surfaced when a submission does not produce a booking.
///
/// None of them are fatal: the draft is left untouched for a retry.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The draft failed local validation; nothing was sent.
    #[error("booking is not valid: {}", join_violations(.0))]
    Validation(SmallVec<[ValidationError; 2]>),

    /// Another submission from this coordinator is still in flight.
    #[error("a submission is already in progress")]
    AlreadySubmitting,

    /// The signed-in role may not create bookings.
    #[error("{0} accounts cannot create bookings")]
    NotPermitted(Role),

    /// The draft could not be turned into a request.
    #[error("booking could not be prepared: {0}")]
    Request(#[from] NormalizeError),

    /// The request did not complete or its response could not be read.
    #[error("cannot reach server")]
    Network(#[source] ApiError),

    /// The backend refused the booking.
    #[error("booking rejected: {0}")]
    Rejected(ServerRejection),
}

impl SubmissionError {
    /// Text to show the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(violations) => join_violations(violations),
            Self::Network(error) => error.user_message(),
            Self::Rejected(rejection) => rejection.user_message(),
            Self::AlreadySubmitting | Self::NotPermitted(_) | Self::Request(_) => self.to_string(),
        }
    }
}

impl From<ApiError> for SubmissionError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Rejected(rejection) => Self::Rejected(rejection),
            error => Self::Network(error),
        }
    }
}

fn join_violations(violations: &[ValidationError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// What happened to a request that reached the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The booking was confirmed and reconciled into the booking list.
    Confirmed(BookingResult),

    /// The draft was discarded while the request was in flight. The backend
    /// still created the booking, but the list was left alone.
    Discarded(BookingResult),
}

/// Releases the in-flight flag when dropped, whichever way the submit ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Submits drafts for one booking screen and owns its booking list.
pub struct SubmissionCoordinator {
    api: Arc<dyn BookingApi>,
    role: Role,
    bookings: Mutex<BookingList>,
    submitting: AtomicBool,
    generation: AtomicU64,
    idempotency_key: Mutex<Option<(u64, Uuid)>>,
}

impl SubmissionCoordinator {
    /// Create a coordinator for `session`, reconciling into `bookings`.
    #[must_use]
    pub fn new(api: Arc<dyn BookingApi>, session: &SessionContext, bookings: BookingList) -> Self {
        Self {
            api,
            role: session.role(),
            bookings: Mutex::new(bookings),
            submitting: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            idempotency_key: Mutex::new(None),
        }
    }

    /// Generation of the active draft.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Mark the active draft as discarded. A request still in flight for it
    /// completes without touching the booking list.
    pub fn discard(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        debug!(generation, "draft discarded");

        generation
    }

    /// Snapshot of the owned booking list.
    pub fn bookings(&self) -> BookingList {
        self.lock_bookings().clone()
    }

    /// Submit `draft` as of `now`.
    ///
    /// The draft is validated locally first; nothing is sent if it cannot be
    /// submitted. At most one request is in flight at a time. On success the
    /// booking is upserted into the list and the draft's generation ends.
    ///
    /// # Errors
    ///
    /// Returns a [`SubmissionError`] when no booking was created.
    pub async fn submit(
        &self,
        draft: &BookingDraft<'_>,
        now: Timestamp,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        if !self.role.can_create_bookings() {
            return Err(SubmissionError::NotPermitted(self.role));
        }

        let composition = BookingComposer::compose(draft, now);

        if !composition.can_submit() {
            debug!(
                violations = composition.violations().len(),
                "draft failed validation"
            );

            return Err(SubmissionError::Validation(composition.into_violations()));
        }

        let Some(_in_flight) = InFlight::acquire(&self.submitting) else {
            warn!("submit ignored while another submission is in flight");

            return Err(SubmissionError::AlreadySubmitting);
        };

        let generation = self.generation();
        let request = BookingRequest::from_draft(
            draft,
            composition.promotion(),
            self.idempotency_key(generation),
        )?;

        info!(
            offering = %request.offering_id,
            idempotency_key = %request.idempotency_key,
            generation,
            "submitting booking"
        );

        let booking = self.api.create_booking(&request).await.inspect_err(|error| {
            warn!(%error, generation, "booking submission failed");
        })?;

        if self
            .generation
            .compare_exchange(
                generation,
                generation + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            info!(booking = %booking.id, "draft discarded while submitting; result not applied");

            return Ok(SubmissionOutcome::Discarded(booking));
        }

        let upsert = self.lock_bookings().upsert(booking.clone());

        info!(booking = %booking.id, status = %booking.status, ?upsert, "booking confirmed");

        Ok(SubmissionOutcome::Confirmed(booking))
    }

    /// Key for the draft at `generation`, reused across retries of it.
    fn idempotency_key(&self, generation: u64) -> Uuid {
        let mut slot = self
            .idempotency_key
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match *slot {
            Some((owner, key)) if owner == generation => key,
            _ => {
                let key = Uuid::now_v7();

                *slot = Some((generation, key));

                key
            }
        }
    }

    fn lock_bookings(&self) -> MutexGuard<'_, BookingList> {
        self.bookings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for SubmissionCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionCoordinator")
            .field("role", &self.role)
            .field("submitting", &self.submitting)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
