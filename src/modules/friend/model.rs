use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FriendProfileResponse {
    pub id: i64,
    pub full_name: String,
    pub phone_number: String,
    pub total_friend_count: i64,
    pub mutual_friend_count: i64,
}
