use crate::{api::error, modules::friend::model::FriendProfileResponse};

#[async_trait::async_trait]
pub trait FriendQueryRepository: Send + Sync {
    /// `None` unless `user_id -> friend_user_id` is an accepted edge.
    async fn find_friend_profile(
        &self,
        user_id: i64,
        friend_user_id: i64,
    ) -> Result<Option<FriendProfileResponse>, error::SystemError>;
}
