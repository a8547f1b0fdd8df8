//! Shuttle listings, availability overrides, and location publishing.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use shuttlehub_cache::{CacheManager, keys};
use shuttlehub_core::error::AppError;
use shuttlehub_core::traits::cache::CacheProvider;
use shuttlehub_database::repositories::shuttle::ShuttleRepository;
use shuttlehub_database::repositories::user::UserRepository;
use shuttlehub_entity::shuttle::Shuttle;

use crate::context::RequestContext;
use crate::events::{EventPublisher, ShuttleLocation};

/// TTL for cached shuttle rows.
const SHUTTLE_CACHE_TTL: Duration = Duration::from_secs(60);

/// TTL for cached user display names.
const USER_NAME_CACHE_TTL: Duration = Duration::from_secs(300);

/// A shuttle joined with its driver's display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuttleView {
    /// Shuttle identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Total seat capacity.
    pub capacity: i32,
    /// Remaining bookable seats.
    pub available_seats: i32,
    /// Route description.
    pub route: String,
    /// Whether the shuttle is accepting bookings.
    pub is_active: bool,
    /// Assigned driver, if any.
    pub driver_id: Option<Uuid>,
    /// Assigned driver's display name, if any.
    pub driver_name: Option<String>,
}

impl ShuttleView {
    fn assemble(shuttle: Shuttle, driver_name: Option<String>) -> Self {
        Self {
            id: shuttle.id,
            name: shuttle.name,
            capacity: shuttle.capacity,
            available_seats: shuttle.available_seats,
            route: shuttle.route,
            is_active: shuttle.is_active,
            driver_id: shuttle.driver_id,
            driver_name,
        }
    }
}

/// Shuttle read model and administrative mutations.
///
/// Single-shuttle lookups go through the cache opportunistically; a miss or
/// a cache fault always falls back to the database.
#[derive(Debug, Clone)]
pub struct ShuttleService {
    /// Shuttle repository.
    shuttle_repo: Arc<ShuttleRepository>,
    /// User repository for driver names.
    user_repo: Arc<UserRepository>,
    /// Read-through cache.
    cache: Arc<CacheManager>,
    /// Realtime event port.
    events: Arc<dyn EventPublisher>,
}

impl ShuttleService {
    /// Creates a new shuttle service.
    pub fn new(
        shuttle_repo: Arc<ShuttleRepository>,
        user_repo: Arc<UserRepository>,
        cache: Arc<CacheManager>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            shuttle_repo,
            user_repo,
            cache,
            events,
        }
    }

    /// Lists all shuttles.
    pub async fn list_shuttles(&self) -> Result<Vec<ShuttleView>, AppError> {
        let shuttles = self.shuttle_repo.find_all().await?;
        self.assemble_many(shuttles).await
    }

    /// Lists active shuttles with at least one bookable seat.
    pub async fn list_available(&self) -> Result<Vec<ShuttleView>, AppError> {
        let shuttles = self.shuttle_repo.find_available().await?;
        self.assemble_many(shuttles).await
    }

    /// Fetches one shuttle, consulting the cache first.
    pub async fn get_shuttle(&self, shuttle_id: Uuid) -> Result<ShuttleView, AppError> {
        let key = keys::shuttle_by_id(shuttle_id);

        let shuttle = match self.cache.get_json::<Shuttle>(&key).await {
            Ok(Some(cached)) => {
                debug!(shuttle_id = %shuttle_id, "Shuttle cache hit");
                cached
            }
            Ok(None) | Err(_) => {
                let shuttle = self
                    .shuttle_repo
                    .find_by_id(shuttle_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Shuttle not found"))?;
                if let Err(e) = self.cache.set_json(&key, &shuttle, SHUTTLE_CACHE_TTL).await {
                    warn!(shuttle_id = %shuttle_id, error = %e, "Failed to cache shuttle");
                }
                shuttle
            }
        };

        let driver_name = self.driver_display_name(shuttle.driver_id).await?;

        Ok(ShuttleView::assemble(shuttle, driver_name))
    }

    /// Administrative override of the available seat count.
    pub async fn set_availability(
        &self,
        ctx: &RequestContext,
        shuttle_id: Uuid,
        available_seats: i32,
    ) -> Result<ShuttleView, AppError> {
        if available_seats < 0 {
            return Err(AppError::validation("Available seats cannot be negative"));
        }

        let shuttle = self
            .shuttle_repo
            .find_by_id(shuttle_id)
            .await?
            .ok_or_else(|| AppError::not_found("Shuttle not found"))?;

        if available_seats > shuttle.capacity {
            return Err(AppError::validation(
                "Available seats cannot exceed capacity",
            ));
        }

        let updated = self
            .shuttle_repo
            .set_available_seats(shuttle_id, available_seats)
            .await?
            .ok_or_else(|| AppError::not_found("Shuttle not found"))?;

        info!(
            shuttle_id = %shuttle_id,
            available_seats,
            updated_by = %ctx.user_id,
            "Shuttle availability overridden"
        );

        self.invalidate(shuttle_id).await;
        self.events
            .shuttle_availability_changed(shuttle_id, updated.available_seats)
            .await;

        let driver_name = self.driver_display_name(updated.driver_id).await?;
        Ok(ShuttleView::assemble(updated, driver_name))
    }

    /// Flips whether the shuttle accepts bookings.
    pub async fn toggle_active(
        &self,
        ctx: &RequestContext,
        shuttle_id: Uuid,
    ) -> Result<ShuttleView, AppError> {
        let updated = self
            .shuttle_repo
            .toggle_active(shuttle_id)
            .await?
            .ok_or_else(|| AppError::not_found("Shuttle not found"))?;

        info!(
            shuttle_id = %shuttle_id,
            is_active = updated.is_active,
            updated_by = %ctx.user_id,
            "Shuttle active flag toggled"
        );

        self.invalidate(shuttle_id).await;

        let driver_name = self.driver_display_name(updated.driver_id).await?;
        Ok(ShuttleView::assemble(updated, driver_name))
    }

    /// Publishes a transient position report to the shuttle's room.
    pub async fn publish_location(
        &self,
        _ctx: &RequestContext,
        shuttle_id: Uuid,
        location: ShuttleLocation,
    ) -> Result<(), AppError> {
        // Existence check only; positions are never persisted.
        self.shuttle_repo
            .find_by_id(shuttle_id)
            .await?
            .ok_or_else(|| AppError::not_found("Shuttle not found"))?;

        self.events
            .shuttle_location_updated(shuttle_id, &location)
            .await;
        Ok(())
    }

    /// Resolves a driver's display name, consulting the cache first.
    async fn driver_display_name(
        &self,
        driver_id: Option<Uuid>,
    ) -> Result<Option<String>, AppError> {
        let Some(driver_id) = driver_id else {
            return Ok(None);
        };

        let key = keys::user_display_name(driver_id);
        if let Ok(Some(name)) = self.cache.get(&key).await {
            return Ok(Some(name));
        }

        let name = self.user_repo.display_name(driver_id).await?;
        if let Some(ref resolved) = name {
            if let Err(e) = self.cache.set(&key, resolved, USER_NAME_CACHE_TTL).await {
                warn!(driver_id = %driver_id, error = %e, "Failed to cache driver name");
            }
        }
        Ok(name)
    }

    /// Drops a shuttle's cache entry after a mutation.
    async fn invalidate(&self, shuttle_id: Uuid) {
        if let Err(e) = self.cache.delete(&keys::shuttle_by_id(shuttle_id)).await {
            warn!(shuttle_id = %shuttle_id, error = %e, "Failed to invalidate shuttle cache");
        }
    }

    /// Resolves driver names for a list of shuttles with one batched query.
    async fn assemble_many(&self, shuttles: Vec<Shuttle>) -> Result<Vec<ShuttleView>, AppError> {
        let driver_ids: Vec<Uuid> = shuttles.iter().filter_map(|s| s.driver_id).collect();
        let names = self.user_repo.display_names(&driver_ids).await?;

        Ok(shuttles
            .into_iter()
            .map(|s| {
                let driver_name = s.driver_id.and_then(|id| names.get(&id).cloned());
                ShuttleView::assemble(s, driver_name)
            })
            .collect())
    }
}
