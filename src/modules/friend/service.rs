use std::sync::Arc;

use crate::{
    api::error,
    modules::friend::{model::FriendProfileResponse, repository::FriendQueryRepository},
};

#[derive(Clone)]
pub struct FriendQueryService {
    query_repo: Arc<dyn FriendQueryRepository>,
}

impl FriendQueryService {
    pub fn with_dependencies(query_repo: Arc<dyn FriendQueryRepository>) -> Self {
        log::info!("FriendQueryService initialized with dependencies");
        FriendQueryService { query_repo }
    }

    pub async fn get_friend_profile(
        &self,
        user_id: i64,
        friend_user_id: i64,
    ) -> Result<FriendProfileResponse, error::SystemError> {
        self.query_repo
            .find_friend_profile(user_id, friend_user_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Friend not found"))
    }
}
