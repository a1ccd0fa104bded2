use log::info;
use std::sync::Arc;

use crate::{
    api::error,
    modules::{
        friendship::{
            repository::FriendshipRepository,
            transition::{Transition, require_pending},
        },
        user::repository::UserRepository,
    },
};

#[derive(Clone)]
pub struct FriendshipService {
    friendship_repo: Arc<dyn FriendshipRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl FriendshipService {
    pub fn with_dependencies(
        friendship_repo: Arc<dyn FriendshipRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        info!("FriendshipService initialized with dependencies");
        FriendshipService { friendship_repo, user_repo }
    }

    async fn can_send(&self, requester: i64, target: i64) -> Result<(), error::SystemError> {
        if requester == target {
            return Err(error::SystemError::bad_request("Cannot send friend request to yourself"));
        }

        if !self.user_repo.exists(target).await? {
            return Err(error::SystemError::bad_request("Target user does not exist"));
        }

        Ok(())
    }

    async fn can_answer(&self, responder: i64, requester: i64) -> Result<(), error::SystemError> {
        let status = self.friendship_repo.find_status(requester, responder).await?;
        require_pending(status)
    }

    pub async fn send(&self, requester: i64, target: i64) -> Result<(), error::SystemError> {
        self.can_send(requester, target).await?;

        self.friendship_repo.apply(&Transition::Send { requester, target }).await?;

        info!("User {} sent a friend request to {}", requester, target);
        Ok(())
    }

    pub async fn accept(&self, responder: i64, requester: i64) -> Result<(), error::SystemError> {
        self.can_answer(responder, requester).await?;

        self.friendship_repo.apply(&Transition::Accept { responder, requester }).await?;

        info!("User {} accepted the friend request from {}", responder, requester);
        Ok(())
    }

    pub async fn decline(&self, responder: i64, requester: i64) -> Result<(), error::SystemError> {
        self.can_answer(responder, requester).await?;

        self.friendship_repo.apply(&Transition::Decline { responder, requester }).await?;

        info!("User {} declined the friend request from {}", responder, requester);
        Ok(())
    }
}
