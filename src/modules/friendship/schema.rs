use sqlx::prelude::Type;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Type)]
#[sqlx(type_name = "friendship_status", rename_all = "lowercase")]
pub enum FriendshipStatus {
    Requested,
    Accepted,
    Declined,
}
