use crate::{
    api::error,
    modules::friendship::{schema::FriendshipStatus, transition::Transition},
};

#[async_trait::async_trait]
pub trait FriendshipRepository: Send + Sync {
    async fn find_status(
        &self,
        user_id: i64,
        friend_user_id: i64,
    ) -> Result<Option<FriendshipStatus>, error::SystemError>;

    /// Plans `transition` against the current edge pair and applies every
    /// write, or none of them.
    async fn apply(&self, transition: &Transition) -> Result<(), error::SystemError>;
}
