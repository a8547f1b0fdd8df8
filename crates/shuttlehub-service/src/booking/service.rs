//! Booking orchestration service.
//!
//! Every operation that pairs a booking write with a seat ledger change
//! runs both on one transaction: either the whole unit commits or none of
//! it does. Notifications and realtime events go out only after commit.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use shuttlehub_core::error::{AppError, ErrorKind};
use shuttlehub_database::repositories::booking::{BookingRepository, NewBooking};
use shuttlehub_database::repositories::shuttle::{SeatReservation, ShuttleRepository};
use shuttlehub_database::repositories::user::UserRepository;
use shuttlehub_entity::booking::{Booking, BookingStatus, SeatEffect};
use shuttlehub_entity::notification::{NotificationKind, NotificationRef};

use crate::context::RequestContext;
use crate::events::EventPublisher;
use crate::notification::NotificationService;

use super::view::BookingView;

/// Fields accepted from a student creating a booking.
#[derive(Debug, Clone)]
pub struct CreateBookingInput {
    /// Target shuttle.
    pub shuttle_id: Uuid,
    /// Requested departure time. Must be in the future.
    pub trip_time: DateTime<Utc>,
    /// Pickup location description.
    pub pickup_location: String,
    /// Dropoff location description.
    pub dropoff_location: String,
    /// Route override; defaults to the shuttle's route.
    pub route: Option<String>,
}

/// Orchestrates the booking lifecycle against the seat ledger.
#[derive(Debug, Clone)]
pub struct BookingService {
    /// Pool used to open units of work.
    pool: PgPool,
    /// Booking repository.
    booking_repo: Arc<BookingRepository>,
    /// Shuttle repository (seat ledger).
    shuttle_repo: Arc<ShuttleRepository>,
    /// User repository (display-name joins).
    user_repo: Arc<UserRepository>,
    /// Notification side effects.
    notifications: Arc<NotificationService>,
    /// Realtime event port.
    events: Arc<dyn EventPublisher>,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(
        pool: PgPool,
        booking_repo: Arc<BookingRepository>,
        shuttle_repo: Arc<ShuttleRepository>,
        user_repo: Arc<UserRepository>,
        notifications: Arc<NotificationService>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            pool,
            booking_repo,
            shuttle_repo,
            user_repo,
            notifications,
            events,
        }
    }

    /// Creates a booking, reserving one seat atomically.
    ///
    /// The seat decrement and the booking insert share one transaction: a
    /// failure at any step rolls back both, so no seat is ever held without
    /// a booking and no booking exists without its seat.
    pub async fn create_booking(
        &self,
        ctx: &RequestContext,
        input: CreateBookingInput,
    ) -> Result<BookingView, AppError> {
        if input.trip_time <= Utc::now() {
            return Err(AppError::validation("Trip time must be in the future"));
        }

        let shuttle = self
            .shuttle_repo
            .find_by_id(input.shuttle_id)
            .await?
            .ok_or_else(|| AppError::not_found("Shuttle not found"))?;

        if !shuttle.is_active {
            return Err(AppError::state_conflict("Shuttle is not active"));
        }

        let driver_id = shuttle
            .driver_id
            .ok_or_else(|| AppError::state_conflict("Shuttle has no assigned driver"))?;

        let driver = self
            .user_repo
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| AppError::state_conflict("Shuttle has no assigned driver"))?;

        if !driver.is_approved_driver() {
            return Err(AppError::state_conflict("Driver is not approved"));
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to open transaction", e)
        })?;

        let seats_left = match self.shuttle_repo.reserve_seat(&mut tx, shuttle.id).await? {
            SeatReservation::Reserved { available_seats } => available_seats,
            SeatReservation::Exhausted => {
                return Err(AppError::state_conflict(
                    "No available seats on this shuttle",
                ));
            }
            SeatReservation::Inactive => {
                return Err(AppError::state_conflict("Shuttle is not active"));
            }
            SeatReservation::NotFound => {
                return Err(AppError::not_found("Shuttle not found"));
            }
        };

        let booking = self
            .booking_repo
            .create(
                &mut tx,
                &NewBooking {
                    shuttle_id: shuttle.id,
                    student_id: ctx.user_id,
                    driver_id,
                    trip_time: input.trip_time,
                    pickup_location: input.pickup_location,
                    dropoff_location: input.dropoff_location,
                    route: input.route.unwrap_or_else(|| shuttle.route.clone()),
                },
            )
            .await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit booking", e)
        })?;

        info!(
            booking_id = %booking.id,
            shuttle_id = %shuttle.id,
            student_id = %ctx.user_id,
            seats_left,
            "Booking created"
        );

        self.dispatch_or_log(
            ctx.user_id,
            "Booking Submitted",
            &format!(
                "Your booking request for {} has been submitted and is pending confirmation.",
                shuttle.name
            ),
            NotificationKind::Booking,
            booking.id,
        )
        .await;

        self.dispatch_or_log(
            driver_id,
            "New Booking Request",
            "You have a new booking request for your shuttle.",
            NotificationKind::Trip,
            booking.id,
        )
        .await;

        self.events
            .shuttle_availability_changed(shuttle.id, seats_left)
            .await;

        Ok(BookingView::assemble(
            booking,
            shuttle.name,
            ctx.name.clone(),
            driver.name,
        ))
    }

    /// Drives the booking state machine, releasing the seat when required.
    pub async fn update_booking_status(
        &self,
        _ctx: &RequestContext,
        booking_id: Uuid,
        new_status: BookingStatus,
    ) -> Result<BookingView, AppError> {
        let booking = self
            .booking_repo
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))?;

        // Validates the edge and tells us whether a seat goes back.
        let effect = booking.status.transition_to(new_status)?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to open transaction", e)
        })?;

        let updated = self
            .booking_repo
            .update_status(&mut tx, booking_id, new_status)
            .await?;

        let released = if effect == SeatEffect::ReleaseOne {
            let seats = self
                .shuttle_repo
                .release_seat(&mut tx, booking.shuttle_id)
                .await?;
            if seats.is_none() {
                // The booking outlives its vehicle; nothing to return the seat to.
                warn!(
                    booking_id = %booking_id,
                    shuttle_id = %booking.shuttle_id,
                    "Seat release skipped: shuttle no longer exists"
                );
            }
            seats
        } else {
            None
        };

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit status update", e)
        })?;

        info!(
            booking_id = %booking_id,
            from = %booking.status,
            to = %new_status,
            "Booking status updated"
        );

        let shuttle_name = self
            .shuttle_repo
            .find_by_id(booking.shuttle_id)
            .await?
            .map(|s| s.name)
            .unwrap_or_else(|| "the shuttle".to_string());

        if let Some((title, message)) = status_notification(new_status, &shuttle_name) {
            self.dispatch_or_log(
                booking.student_id,
                &title,
                &message,
                NotificationKind::Booking,
                booking.id,
            )
            .await;
        }

        self.events
            .booking_status_changed(booking.student_id, booking.id, new_status)
            .await;

        if let Some(seats) = released {
            self.events
                .shuttle_availability_changed(booking.shuttle_id, seats)
                .await;
        }

        self.assemble_one(updated, shuttle_name).await
    }

    /// Records a rating for a completed trip.
    ///
    /// Single-row update; no seat effect, so no multi-entity transaction.
    pub async fn rate_booking(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
        rating: i32,
        feedback: Option<String>,
    ) -> Result<BookingView, AppError> {
        if !(1..=5).contains(&rating) {
            return Err(AppError::validation("Rating must be between 1 and 5"));
        }

        let booking = self
            .booking_repo
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))?;

        if booking.status != BookingStatus::Completed {
            return Err(AppError::state_conflict("You can only rate completed trips"));
        }

        if booking.student_id != ctx.user_id {
            return Err(AppError::forbidden("You can only rate your own bookings"));
        }

        if booking.is_rated() {
            return Err(AppError::state_conflict("Booking has already been rated"));
        }

        let updated = self
            .booking_repo
            .set_rating(booking_id, rating, feedback.as_deref())
            .await?;

        info!(booking_id = %booking_id, rating, "Booking rated");

        self.dispatch_or_log(
            booking.driver_id,
            "New Rating Received",
            &format!("You received a {rating}-star rating for your trip."),
            NotificationKind::Feedback,
            booking.id,
        )
        .await;

        let shuttle_name = self
            .shuttle_repo
            .find_by_id(booking.shuttle_id)
            .await?
            .map(|s| s.name)
            .unwrap_or_else(|| "the shuttle".to_string());

        self.assemble_one(updated, shuttle_name).await
    }

    /// Lists a student's bookings, newest first.
    pub async fn bookings_for_student(
        &self,
        ctx: &RequestContext,
        student_id: Option<Uuid>,
    ) -> Result<Vec<BookingView>, AppError> {
        let target = student_id.unwrap_or(ctx.user_id);
        let bookings = self.booking_repo.find_by_student(target).await?;
        self.assemble_many(bookings).await
    }

    /// Lists a driver's bookings, newest first.
    pub async fn bookings_for_driver(
        &self,
        ctx: &RequestContext,
        driver_id: Option<Uuid>,
    ) -> Result<Vec<BookingView>, AppError> {
        let target = driver_id.unwrap_or(ctx.user_id);
        let bookings = self.booking_repo.find_by_driver(target).await?;
        self.assemble_many(bookings).await
    }

    /// Dispatches a booking-related notification, logging instead of failing.
    ///
    /// The booking mutation is already committed by the time notifications
    /// go out; a persistence hiccup here must not fail the request.
    async fn dispatch_or_log(
        &self,
        user_id: Uuid,
        title: &str,
        message: &str,
        kind: NotificationKind,
        booking_id: Uuid,
    ) {
        if let Err(e) = self
            .notifications
            .dispatch(
                user_id,
                title,
                message,
                kind,
                Some(booking_id),
                NotificationRef::Booking,
            )
            .await
        {
            warn!(
                user_id = %user_id,
                booking_id = %booking_id,
                error = %e,
                "Failed to dispatch notification"
            );
        }
    }

    /// Resolves display names for one booking.
    async fn assemble_one(
        &self,
        booking: Booking,
        shuttle_name: String,
    ) -> Result<BookingView, AppError> {
        let names = self
            .user_repo
            .display_names(&[booking.student_id, booking.driver_id])
            .await?;
        let student_name = names.get(&booking.student_id).cloned().unwrap_or_default();
        let driver_name = names.get(&booking.driver_id).cloned().unwrap_or_default();
        Ok(BookingView::assemble(
            booking,
            shuttle_name,
            student_name,
            driver_name,
        ))
    }

    /// Resolves display names for a list of bookings with batched queries.
    async fn assemble_many(&self, bookings: Vec<Booking>) -> Result<Vec<BookingView>, AppError> {
        if bookings.is_empty() {
            return Ok(Vec::new());
        }

        let shuttle_ids: Vec<Uuid> = bookings.iter().map(|b| b.shuttle_id).collect();
        let user_ids: Vec<Uuid> = bookings
            .iter()
            .flat_map(|b| [b.student_id, b.driver_id])
            .collect();

        let shuttle_names = self.shuttle_repo.display_names(&shuttle_ids).await?;
        let user_names: HashMap<Uuid, String> = self.user_repo.display_names(&user_ids).await?;

        Ok(bookings
            .into_iter()
            .map(|b| {
                let shuttle_name = shuttle_names.get(&b.shuttle_id).cloned().unwrap_or_default();
                let student_name = user_names.get(&b.student_id).cloned().unwrap_or_default();
                let driver_name = user_names.get(&b.driver_id).cloned().unwrap_or_default();
                BookingView::assemble(b, shuttle_name, student_name, driver_name)
            })
            .collect())
    }
}

/// Copy for the status-specific student notification.
///
/// `pending` produces nothing: the creation path already notified both
/// parties.
fn status_notification(status: BookingStatus, shuttle_name: &str) -> Option<(String, String)> {
    match status {
        BookingStatus::Confirmed => Some((
            "Booking Confirmed".to_string(),
            format!("Your booking for {shuttle_name} has been confirmed."),
        )),
        BookingStatus::Canceled => Some((
            "Booking Canceled".to_string(),
            format!("Your booking for {shuttle_name} has been canceled."),
        )),
        BookingStatus::Completed => Some((
            "Trip Completed".to_string(),
            format!("Your trip with {shuttle_name} has been completed. Please rate your experience."),
        )),
        BookingStatus::Pending => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_notification_copy() {
        let (title, message) =
            status_notification(BookingStatus::Confirmed, "Campus Loop 2").unwrap();
        assert_eq!(title, "Booking Confirmed");
        assert!(message.contains("Campus Loop 2"));

        let (title, _) = status_notification(BookingStatus::Canceled, "X").unwrap();
        assert_eq!(title, "Booking Canceled");

        let (title, message) = status_notification(BookingStatus::Completed, "X").unwrap();
        assert_eq!(title, "Trip Completed");
        assert!(message.contains("rate your experience"));
    }

    #[test]
    fn test_pending_produces_no_notification() {
        assert!(status_notification(BookingStatus::Pending, "X").is_none());
    }
}
