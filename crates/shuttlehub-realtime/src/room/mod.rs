//! Room management — named subscription scopes on the realtime channel.

pub mod registry;
pub mod room;
pub mod subscription;

pub use registry::RoomRegistry;

use uuid::Uuid;

/// Room carrying one user's targeted events.
pub fn user_room(user_id: Uuid) -> String {
    format!("user:{user_id}")
}

/// Room carrying one shuttle's location stream.
pub fn shuttle_room(shuttle_id: Uuid) -> String {
    format!("shuttle:{shuttle_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_names() {
        let id = Uuid::new_v4();
        assert_eq!(user_room(id), format!("user:{id}"));
        assert_eq!(shuttle_room(id), format!("shuttle:{id}"));
        assert_ne!(user_room(id), shuttle_room(id));
    }
}
