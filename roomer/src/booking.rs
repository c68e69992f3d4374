//! Booking types for tracking room reservations.
//!
//! This module provides the core domain types: booking status vocabularies,
//! validated date ranges with half-open overlap semantics, and the
//! [`Booking`] record with its builder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::guest::{Guest, GuestName};

/// Lifecycle status of a booking.
///
/// Transitions are `pending -> confirmed`, `pending -> cancelled` and
/// `confirmed -> cancelled`; `cancelled` is terminal.
///
/// # Examples
///
/// ```
/// use roomer::BookingStatus;
///
/// assert!(BookingStatus::Pending.is_active());
/// assert!(BookingStatus::Confirmed.is_active());
/// assert!(!BookingStatus::Cancelled.is_active());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Created but not yet confirmed.
    Pending,
    /// Confirmed by the front desk.
    Confirmed,
    /// Cancelled; terminal.
    Cancelled,
}

impl BookingStatus {
    /// Whether this status counts against room availability.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Returns the canonical lowercase name used in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from its canonical lowercase name.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a known status.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ValidationError {
                field: "status".into(),
                message: format!("unknown booking status '{s}'"),
            }),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// No payment has been taken.
    Unpaid,
    /// Payment has been taken in full.
    Paid,
    /// Payment was cancelled or refunded.
    Cancelled,
}

impl PaymentStatus {
    /// Returns the canonical lowercase name used in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a payment status from its canonical lowercase name.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a known payment status.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "unpaid" => Ok(Self::Unpaid),
            "paid" => Ok(Self::Paid),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ValidationError {
                field: "payment_status".into(),
                message: format!("unknown payment status '{s}'"),
            }),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A half-open date interval `[start, end)` with `start < end` enforced
/// at construction.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use roomer::DateRange;
///
/// let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap();
///
/// let range = DateRange::new(start, end).unwrap();
/// assert_eq!(range.start(), start);
///
/// // Invalid: start not before end
/// assert!(DateRange::new(end, start).is_err());
/// assert!(DateRange::new(start, start).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Unvalidated mirror of [`DateRange`] used during deserialization so the
/// `start < end` invariant holds for decoded values too.
#[derive(Deserialize)]
struct RawDateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = InvalidDateRangeError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Creates a new date range.
    ///
    /// # Errors
    ///
    /// Returns an error unless `start` is strictly before `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidDateRangeError> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(InvalidDateRangeError { start, end })
        }
    }

    /// Returns the inclusive start of the range.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the exclusive end of the range.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Checks whether two half-open ranges overlap.
    ///
    /// `[a, b)` and `[c, d)` overlap iff `a < d && c < b`; back-to-back
    /// stays (one ending exactly when the other starts) do not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use roomer::DateRange;
    ///
    /// let day = |d| Utc.with_ymd_and_hms(2025, 1, d, 0, 0, 0).unwrap();
    /// let a = DateRange::new(day(10), day(15)).unwrap();
    /// let b = DateRange::new(day(12), day(20)).unwrap();
    /// let c = DateRange::new(day(15), day(18)).unwrap();
    ///
    /// assert!(a.overlaps(&b));
    /// assert!(!a.overlaps(&c));
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Error type for an inverted or empty date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDateRangeError {
    /// The requested start.
    pub start: DateTime<Utc>,
    /// The requested end.
    pub end: DateTime<Utc>,
}

impl std::fmt::Display for InvalidDateRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid date range: start {} is not before end {}",
            self.start, self.end
        )
    }
}

impl std::error::Error for InvalidDateRangeError {}

/// A persisted room booking with identity, dates and associated guests.
///
/// Bookings are constructed by the booking store when rows are saved or
/// loaded; the engine derives modified copies via [`Booking::with_status`]
/// and [`Booking::with_dates`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    id: u64,
    room_id: u64,
    dates: DateRange,
    comment: String,
    status: BookingStatus,
    payment_status: PaymentStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    guests: Vec<Guest>,
}

impl Booking {
    /// Creates a new booking builder.
    #[must_use]
    pub fn builder(id: u64, room_id: u64, dates: DateRange) -> BookingBuilder {
        BookingBuilder {
            id,
            room_id,
            dates,
            comment: String::new(),
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            created_at: None,
            updated_at: None,
            guests: Vec::new(),
        }
    }

    /// Returns the booking identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the booked room identifier.
    #[must_use]
    pub const fn room_id(&self) -> u64 {
        self.room_id
    }

    /// Returns the booked date range.
    #[must_use]
    pub const fn dates(&self) -> DateRange {
        self.dates
    }

    /// Returns the free-text comment.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns the booking status.
    #[must_use]
    pub const fn status(&self) -> BookingStatus {
        self.status
    }

    /// Returns the payment status.
    #[must_use]
    pub const fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the associated guests in submission order.
    #[must_use]
    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    /// Returns a copy of this booking with a different status.
    #[must_use]
    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns a copy of this booking with different dates.
    #[must_use]
    pub fn with_dates(mut self, dates: DateRange) -> Self {
        self.dates = dates;
        self
    }

    /// Returns a copy of this booking with a different payment status.
    #[must_use]
    pub fn with_payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = payment_status;
        self
    }

    /// Replaces the associated guests, preserving the given order.
    pub(crate) fn set_guests(&mut self, guests: Vec<Guest>) {
        self.guests = guests;
    }
}

/// Builder for creating [`Booking`] instances.
///
/// Used by the booking store when materializing rows and by tests.
#[derive(Debug)]
pub struct BookingBuilder {
    id: u64,
    room_id: u64,
    dates: DateRange,
    comment: String,
    status: BookingStatus,
    payment_status: PaymentStatus,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    guests: Vec<Guest>,
}

impl BookingBuilder {
    /// Sets the free-text comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Sets the booking status.
    #[must_use]
    pub const fn status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the payment status.
    #[must_use]
    pub const fn payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = payment_status;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the last update timestamp.
    #[must_use]
    pub const fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Sets the associated guests, preserving order.
    #[must_use]
    pub fn guests(mut self, guests: Vec<Guest>) -> Self {
        self.guests = guests;
        self
    }

    /// Builds the booking.
    #[must_use]
    pub fn build(self) -> Booking {
        let now = Utc::now();
        Booking {
            id: self.id,
            room_id: self.room_id,
            dates: self.dates,
            comment: self.comment,
            status: self.status,
            payment_status: self.payment_status,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
            guests: self.guests,
        }
    }
}

/// A booking that has not been persisted yet.
///
/// Produced by the engine once guests are resolved; consumed by the
/// booking store's save operation, which assigns identity and timestamps.
#[derive(Debug, Clone)]
pub struct NewBooking {
    /// The room to book.
    pub room_id: u64,
    /// The requested date range.
    pub dates: DateRange,
    /// Free-text comment.
    pub comment: String,
    /// Initial booking status.
    pub status: BookingStatus,
    /// Initial payment status.
    pub payment_status: PaymentStatus,
    /// Resolved guests in submission order.
    pub guests: Vec<Guest>,
}

impl NewBooking {
    /// Creates a draft booking with `pending`/`unpaid` initial statuses.
    #[must_use]
    pub fn new(room_id: u64, dates: DateRange) -> Self {
        Self {
            room_id,
            dates,
            comment: String::new(),
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            guests: Vec::new(),
        }
    }

    /// Sets the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Sets the resolved guests.
    #[must_use]
    pub fn with_guests(mut self, guests: Vec<Guest>) -> Self {
        self.guests = guests;
        self
    }
}

/// Input to the engine's create operation: plain values, no transport types.
///
/// Dates are carried raw and validated by the engine so that an inverted
/// range is rejected before guests or storage are touched.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    /// The room to book.
    pub room_id: u64,
    /// Requested start.
    pub start: DateTime<Utc>,
    /// Requested end.
    pub end: DateTime<Utc>,
    /// Free-text comment.
    pub comment: String,
    /// Names of guests to associate, in order.
    pub guest_names: Vec<GuestName>,
}

impl BookingRequest {
    /// Creates a request with no comment and no guests.
    #[must_use]
    pub fn new(room_id: u64, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            room_id,
            start,
            end,
            comment: String::new(),
            guest_names: Vec::new(),
        }
    }

    /// Sets the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Sets the guest names.
    #[must_use]
    pub fn with_guests(mut self, guest_names: Vec<GuestName>) -> Self {
        self.guest_names = guest_names;
        self
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(BookingStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(BookingStatus::parse("checked-in").is_err());
    }

    #[test]
    fn test_payment_status_round_trip() {
        for status in [
            PaymentStatus::Unpaid,
            PaymentStatus::Paid,
            PaymentStatus::Cancelled,
        ] {
            assert_eq!(PaymentStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(PaymentStatus::parse("refunded").is_err());
    }

    #[test]
    fn test_status_activity() {
        assert!(BookingStatus::Pending.is_active());
        assert!(BookingStatus::Confirmed.is_active());
        assert!(!BookingStatus::Cancelled.is_active());
    }

    #[test]
    fn test_date_range_new() {
        let range = DateRange::new(day(1), day(3)).unwrap();
        assert_eq!(range.start(), day(1));
        assert_eq!(range.end(), day(3));
    }

    #[test]
    fn test_date_range_rejects_inverted() {
        let err = DateRange::new(day(3), day(1)).unwrap_err();
        assert_eq!(err.start, day(3));
        assert_eq!(err.end, day(1));
    }

    #[test]
    fn test_date_range_rejects_empty() {
        assert!(DateRange::new(day(5), day(5)).is_err());
    }

    #[test]
    fn test_overlap_partial() {
        let a = DateRange::new(day(10), day(15)).unwrap();
        let b = DateRange::new(day(12), day(20)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overlap_contained() {
        let a = DateRange::new(day(10), day(20)).unwrap();
        let b = DateRange::new(day(12), day(14)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overlap_back_to_back_is_not_overlap() {
        let a = DateRange::new(day(10), day(15)).unwrap();
        let b = DateRange::new(day(15), day(18)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_overlap_disjoint() {
        let a = DateRange::new(day(1), day(3)).unwrap();
        let b = DateRange::new(day(10), day(12)).unwrap();
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_date_range_deserialize_enforces_invariant() {
        let valid = DateRange::new(day(1), day(3)).unwrap();
        let json = serde_json::to_string(&valid).unwrap();
        let decoded: DateRange = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, valid);

        // An inverted range must not survive deserialization
        let inverted = r#"{"start":"2025-01-03T00:00:00Z","end":"2025-01-01T00:00:00Z"}"#;
        let err = serde_json::from_str::<DateRange>(inverted).unwrap_err();
        assert!(err.to_string().contains("invalid date range"));
    }

    #[test]
    fn test_booking_builder_defaults() {
        let dates = DateRange::new(day(1), day(3)).unwrap();
        let booking = Booking::builder(1, 101, dates).build();

        assert_eq!(booking.id(), 1);
        assert_eq!(booking.room_id(), 101);
        assert_eq!(booking.status(), BookingStatus::Pending);
        assert_eq!(booking.payment_status(), PaymentStatus::Unpaid);
        assert!(booking.comment().is_empty());
        assert!(booking.guests().is_empty());
    }

    #[test]
    fn test_booking_with_status() {
        let dates = DateRange::new(day(1), day(3)).unwrap();
        let booking = Booking::builder(1, 101, dates).build();

        let cancelled = booking.with_status(BookingStatus::Cancelled);
        assert_eq!(cancelled.status(), BookingStatus::Cancelled);
        assert_eq!(cancelled.id(), 1);
    }

    #[test]
    fn test_booking_with_dates() {
        let dates = DateRange::new(day(1), day(3)).unwrap();
        let moved = DateRange::new(day(5), day(8)).unwrap();
        let booking = Booking::builder(1, 101, dates).build().with_dates(moved);

        assert_eq!(booking.dates(), moved);
    }

    #[test]
    fn test_booking_serde() {
        let dates = DateRange::new(day(1), day(3)).unwrap();
        let booking = Booking::builder(7, 101, dates)
            .comment("sea view, late checkout")
            .status(BookingStatus::Confirmed)
            .build();

        let json = serde_json::to_string(&booking).unwrap();
        let deserialized: Booking = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, booking);
    }

    #[test]
    fn test_new_booking_defaults() {
        let dates = DateRange::new(day(1), day(3)).unwrap();
        let draft = NewBooking::new(101, dates);

        assert_eq!(draft.status, BookingStatus::Pending);
        assert_eq!(draft.payment_status, PaymentStatus::Unpaid);
        assert!(draft.guests.is_empty());
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError {
            field: "status".to_string(),
            message: "unknown booking status 'x'".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("status"));
        assert!(display.contains("unknown booking status"));
    }
}
