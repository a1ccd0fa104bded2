use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    sync::Arc,
};

use tokio::sync::Mutex;

use crate::{
    api::error,
    modules::{
        friend::{model::FriendProfileResponse, repository::FriendQueryRepository},
        friendship::{
            repository::FriendshipRepository,
            schema::FriendshipStatus,
            transition::{EdgeState, EdgeWrite, Transition},
        },
        user::repository::UserRepository,
    },
};

#[derive(Default)]
struct State {
    users: BTreeSet<i64>,
    edges: BTreeMap<(i64, i64), FriendshipStatus>,
}

/// In-memory stand-in for the `users` and `friendships` tables. The mutex is
/// held for a whole transition, which gives serializable isolation.
#[derive(Clone)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn with_users(ids: &[i64]) -> Self {
        let state = State { users: ids.iter().copied().collect(), ..Default::default() };
        Self { state: Arc::new(Mutex::new(state)) }
    }

    pub fn full_name(id: i64) -> String {
        format!("User {id}")
    }

    pub fn phone_number(id: i64) -> String {
        format!("+1555000{id:04}")
    }

    pub async fn edge(&self, user_id: i64, friend_user_id: i64) -> Option<FriendshipStatus> {
        self.state.lock().await.edges.get(&(user_id, friend_user_id)).copied()
    }

    pub async fn put_edge(&self, user_id: i64, friend_user_id: i64, status: FriendshipStatus) {
        self.state.lock().await.edges.insert((user_id, friend_user_id), status);
    }

    pub async fn edge_count(&self) -> usize {
        self.state.lock().await.edges.len()
    }
}

fn accepted_friends(state: &State, user_id: i64) -> HashSet<i64> {
    state
        .edges
        .iter()
        .filter(|((owner, _), status)| *owner == user_id && **status == FriendshipStatus::Accepted)
        .map(|((_, friend), _)| *friend)
        .collect()
}

fn apply_write(
    edges: &mut BTreeMap<(i64, i64), FriendshipStatus>,
    edge_write: &EdgeWrite,
) -> Result<(), error::SystemError> {
    match *edge_write {
        EdgeWrite::Insert { user_id, friend_user_id, status } => {
            if edges.contains_key(&(user_id, friend_user_id)) {
                return Err(error::SystemError::conflict("Friendship already exists"));
            }
            edges.insert((user_id, friend_user_id), status);
        }
        EdgeWrite::Upsert { user_id, friend_user_id, status } => {
            edges.insert((user_id, friend_user_id), status);
        }
        EdgeWrite::Advance { user_id, friend_user_id, from, to } => {
            match edges.get_mut(&(user_id, friend_user_id)) {
                Some(current) if *current == from => *current = to,
                _ => {
                    return Err(error::SystemError::conflict(
                        "Friendship changed by a concurrent request",
                    ));
                }
            }
        }
    }
    Ok(())
}

#[async_trait::async_trait]
impl UserRepository for MemoryStore {
    async fn exists(&self, id: i64) -> Result<bool, error::SystemError> {
        Ok(self.state.lock().await.users.contains(&id))
    }
}

#[async_trait::async_trait]
impl FriendshipRepository for MemoryStore {
    async fn find_status(
        &self,
        user_id: i64,
        friend_user_id: i64,
    ) -> Result<Option<FriendshipStatus>, error::SystemError> {
        Ok(self.edge(user_id, friend_user_id).await)
    }

    async fn apply(&self, transition: &Transition) -> Result<(), error::SystemError> {
        let mut state = self.state.lock().await;

        let (user_id, friend_user_id) = transition.edge();
        let current = EdgeState {
            edge: state.edges.get(&(user_id, friend_user_id)).copied(),
            reverse: state.edges.get(&(friend_user_id, user_id)).copied(),
        };

        // stage on a copy so a failed write leaves nothing behind
        let mut staged = state.edges.clone();
        for edge_write in transition.plan(current)? {
            apply_write(&mut staged, &edge_write)?;
        }
        state.edges = staged;

        Ok(())
    }
}

#[async_trait::async_trait]
impl FriendQueryRepository for MemoryStore {
    async fn find_friend_profile(
        &self,
        user_id: i64,
        friend_user_id: i64,
    ) -> Result<Option<FriendProfileResponse>, error::SystemError> {
        let state = self.state.lock().await;

        let accepted =
            state.edges.get(&(user_id, friend_user_id)) == Some(&FriendshipStatus::Accepted);
        if !accepted || !state.users.contains(&friend_user_id) {
            return Ok(None);
        }

        let friends_of_friend = accepted_friends(&state, friend_user_id);
        let mutual = accepted_friends(&state, user_id).intersection(&friends_of_friend).count();

        Ok(Some(FriendProfileResponse {
            id: friend_user_id,
            full_name: Self::full_name(friend_user_id),
            phone_number: Self::phone_number(friend_user_id),
            total_friend_count: friends_of_friend.len() as i64,
            mutual_friend_count: mutual as i64,
        }))
    }
}
