use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FriendUserIdBody {
    #[validate(range(min = 1, message = "friendUserId must be a positive id"))]
    pub friend_user_id: i64,
}
