//! Cache key builders for all ShuttleHub cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use uuid::Uuid;

/// Prefix applied to all ShuttleHub cache keys.
const PREFIX: &str = "shuttlehub";

/// Cache key for a shuttle entity by ID.
pub fn shuttle_by_id(shuttle_id: Uuid) -> String {
    format!("{PREFIX}:shuttle:{shuttle_id}")
}

/// Cache key for a user's display name.
pub fn user_display_name(user_id: Uuid) -> String {
    format!("{PREFIX}:user:name:{user_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_disjoint_and_prefixed() {
        let id = Uuid::new_v4();
        let shuttle = shuttle_by_id(id);
        let user = user_display_name(id);
        assert!(shuttle.starts_with("shuttlehub:shuttle:"));
        assert!(user.starts_with("shuttlehub:user:name:"));
        assert_ne!(shuttle, user);
        assert!(shuttle.contains(&id.to_string()));
    }
}
