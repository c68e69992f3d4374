//! The booking engine: validation, availability, and lifecycle rules.
//!
//! The engine owns the check ordering for every operation. Date ranges
//! are validated before anything else runs, availability is consulted
//! before guests are resolved, and the store re-verifies availability
//! inside its write transaction so a racing writer cannot slip a
//! conflicting booking past the engine's initial check.

use chrono::{DateTime, Duration, Utc};

use crate::booking::{Booking, BookingRequest, BookingStatus, DateRange, PaymentStatus};
use crate::error::{Error, Result};
use crate::notify::{BookingEvent, LogNotifier, Notifier};
use crate::store::{BookingStore, GuestDirectory};

/// Default length of the reschedule protection window, in days.
///
/// A booking whose start date falls inside this window, measured from
/// the current time, can no longer be rescheduled.
pub const DEFAULT_RESCHEDULE_WINDOW_DAYS: i64 = 7;

/// A source of the current time.
///
/// The engine consults the clock only for the reschedule protection
/// window; injecting a fixed clock makes the window testable.
pub trait Clock {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Coordinates booking operations over a store and guest directory.
///
/// # Examples
///
/// ```no_run
/// use roomer::database::{Database, DatabaseConfig};
/// use roomer::{BookingEngine, BookingRequest, GuestName};
/// use chrono::{TimeZone, Utc};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/roomer.db")).unwrap();
/// let mut engine = BookingEngine::new(db);
///
/// let request = BookingRequest::new(
///     101,
///     Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap(),
/// )
/// .with_guests(vec![GuestName::new("Alice").unwrap()]);
///
/// let booking = engine.create_booking(&request).unwrap();
/// println!("booked: {}", booking.id());
/// ```
pub struct BookingEngine<S> {
    store: S,
    clock: Box<dyn Clock>,
    notifier: Box<dyn Notifier>,
    reschedule_window: Duration,
}

impl<S: BookingStore + GuestDirectory> BookingEngine<S> {
    /// Creates an engine with the system clock, log-backed notifications,
    /// and the default reschedule protection window.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: Box::new(SystemClock),
            notifier: Box::new(LogNotifier),
            reschedule_window: Duration::days(DEFAULT_RESCHEDULE_WINDOW_DAYS),
        }
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the notifier.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Sets the reschedule protection window length in days.
    #[must_use]
    pub fn with_reschedule_window_days(mut self, days: i64) -> Self {
        self.reschedule_window = Duration::days(days);
        self
    }

    /// Returns a reference to the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the engine and returns the underlying store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Creates a booking.
    ///
    /// The request is processed in a fixed order: the date range is
    /// validated first, availability is checked next, and only then are
    /// guest names resolved against the directory. A request with an
    /// inverted range or an unavailable room therefore leaves no trace,
    /// not even new guest records. A name listed more than once resolves
    /// to a single guest entry at its first position. The store repeats
    /// the availability check inside its write transaction before
    /// committing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The start date is not strictly before the end date
    /// - Another active booking overlaps the requested dates
    /// - Guest resolution or storage fails
    pub fn create_booking(&mut self, request: &BookingRequest) -> Result<Booking> {
        let dates = DateRange::new(request.start, request.end)?;

        if !self.store.is_room_available(request.room_id, &dates)? {
            return Err(Error::RoomNotAvailable {
                room_id: request.room_id,
            });
        }

        let mut guests: Vec<crate::guest::Guest> = Vec::with_capacity(request.guest_names.len());
        for name in &request.guest_names {
            // Repeated names collapse to one link; the guest link table
            // keys on (booking, guest)
            if guests.iter().any(|g| g.name() == name) {
                continue;
            }
            guests.push(self.store.find_or_create(name)?);
        }

        let draft = crate::booking::NewBooking::new(request.room_id, dates)
            .with_comment(request.comment.clone())
            .with_guests(guests);
        let booking = self.store.save(&draft)?;

        self.notify(&BookingEvent::Created(&booking));
        Ok(booking)
    }

    /// Cancels a booking.
    ///
    /// Cancelling is idempotent: a booking that is already cancelled is
    /// returned unchanged without touching storage. An unpaid booking's
    /// payment status moves to cancelled alongside it; a paid booking
    /// keeps its payment status for refund bookkeeping.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking does not exist or storage fails.
    pub fn cancel_booking(&mut self, id: u64) -> Result<Booking> {
        let booking = self.require_booking(id)?;
        if booking.status() == BookingStatus::Cancelled {
            return Ok(booking);
        }

        let mut cancelled = booking.with_status(BookingStatus::Cancelled);
        if cancelled.payment_status() == PaymentStatus::Unpaid {
            cancelled = cancelled.with_payment_status(PaymentStatus::Cancelled);
        }
        let updated = self.store.update(&cancelled)?;

        self.notify(&BookingEvent::Cancelled(&updated));
        Ok(updated)
    }

    /// Moves a booking to new dates.
    ///
    /// The checks run in a fixed order: the new range is validated, the
    /// room's calendar is consulted (with the booking itself excluded,
    /// so a stay may slide over its own current dates), the booking is
    /// resolved, its cancellation state is checked, and finally the
    /// protection window is applied. A booking starting within the
    /// window, measured from the current time, can no longer move.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The start date is not strictly before the end date
    /// - Another active booking overlaps the new dates
    /// - The booking does not exist
    /// - The booking is cancelled
    /// - The booking's start date falls inside the protection window
    pub fn reschedule_booking(
        &mut self,
        id: u64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Booking> {
        let dates = DateRange::new(start, end)?;

        if !self.store.can_reschedule(id, &dates)? {
            let booking = self.require_booking(id)?;
            return Err(Error::RoomNotAvailable {
                room_id: booking.room_id(),
            });
        }

        let booking = self.require_booking(id)?;
        if booking.status() == BookingStatus::Cancelled {
            return Err(Error::BookingCancelled { id });
        }

        let current_start = booking.dates().start();
        if self.clock.now() + self.reschedule_window > current_start {
            return Err(Error::RescheduleTooLate {
                id,
                start: current_start,
            });
        }

        let updated = self.store.update(&booking.with_dates(dates))?;

        self.notify(&BookingEvent::Rescheduled(&updated));
        Ok(updated)
    }

    /// Retrieves a booking, failing if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking does not exist or storage fails.
    pub fn get_booking(&self, id: u64) -> Result<Booking> {
        self.require_booking(id)
    }

    fn require_booking(&self, id: u64) -> Result<Booking> {
        self.store.find_by_id(id)?.ok_or_else(|| Error::NotFound {
            resource: format!("booking {id}"),
        })
    }

    fn notify(&self, event: &BookingEvent<'_>) {
        if let Err(e) = self.notifier.notify(event) {
            log::warn!("booking notification failed: {e}");
        }
    }
}
