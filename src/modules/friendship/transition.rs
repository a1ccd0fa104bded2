//! Friendship state machine.
//!
//! Every relationship is two independent directed rows. A [`Transition`] looks
//! at the row it changes and at the reverse row, and plans the writes that
//! take the pair to its next state. Planning is pure; repositories apply the
//! plan atomically against row-locked state.

use crate::{api::error, modules::friendship::schema::FriendshipStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Send { requester: i64, target: i64 },
    Accept { responder: i64, requester: i64 },
    Decline { responder: i64, requester: i64 },
}

/// Current status of the edge a transition changes and of its reverse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeState {
    pub edge: Option<FriendshipStatus>,
    pub reverse: Option<FriendshipStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeWrite {
    /// Fails with a conflict if the row already exists.
    Insert { user_id: i64, friend_user_id: i64, status: FriendshipStatus },
    /// Inserts, or overwrites whatever status the row has.
    Upsert { user_id: i64, friend_user_id: i64, status: FriendshipStatus },
    /// Compare-and-set from `from` to `to`.
    Advance { user_id: i64, friend_user_id: i64, from: FriendshipStatus, to: FriendshipStatus },
}

impl Transition {
    /// `(user_id, friend_user_id)` of the row this transition changes.
    pub fn edge(&self) -> (i64, i64) {
        match *self {
            Transition::Send { requester, target } => (requester, target),
            Transition::Accept { responder, requester }
            | Transition::Decline { responder, requester } => (requester, responder),
        }
    }

    pub fn reverse_edge(&self) -> (i64, i64) {
        let (user_id, friend_user_id) = self.edge();
        (friend_user_id, user_id)
    }

    pub fn plan(&self, state: EdgeState) -> Result<Vec<EdgeWrite>, error::SystemError> {
        let (user_id, friend_user_id) = self.edge();

        match *self {
            Transition::Send { .. } => match state.edge {
                None => Ok(vec![EdgeWrite::Insert {
                    user_id,
                    friend_user_id,
                    status: FriendshipStatus::Requested,
                }]),
                Some(FriendshipStatus::Declined) => Ok(vec![EdgeWrite::Advance {
                    user_id,
                    friend_user_id,
                    from: FriendshipStatus::Declined,
                    to: FriendshipStatus::Requested,
                }]),
                Some(FriendshipStatus::Requested) => {
                    Err(error::SystemError::conflict("Friend request already pending"))
                }
                Some(FriendshipStatus::Accepted) => {
                    Err(error::SystemError::conflict("Users are already friends"))
                }
            },
            Transition::Accept { .. } => {
                require_pending(state.edge)?;

                let mut writes = vec![EdgeWrite::Advance {
                    user_id,
                    friend_user_id,
                    from: FriendshipStatus::Requested,
                    to: FriendshipStatus::Accepted,
                }];

                let (reverse_user_id, reverse_friend_user_id) = self.reverse_edge();
                match state.reverse {
                    None => writes.push(EdgeWrite::Upsert {
                        user_id: reverse_user_id,
                        friend_user_id: reverse_friend_user_id,
                        status: FriendshipStatus::Accepted,
                    }),
                    Some(FriendshipStatus::Accepted) => {}
                    Some(from) => writes.push(EdgeWrite::Advance {
                        user_id: reverse_user_id,
                        friend_user_id: reverse_friend_user_id,
                        from,
                        to: FriendshipStatus::Accepted,
                    }),
                }

                Ok(writes)
            }
            Transition::Decline { .. } => {
                require_pending(state.edge)?;

                Ok(vec![EdgeWrite::Advance {
                    user_id,
                    friend_user_id,
                    from: FriendshipStatus::Requested,
                    to: FriendshipStatus::Declined,
                }])
            }
        }
    }
}

/// Only a `requested` edge can be answered.
pub fn require_pending(status: Option<FriendshipStatus>) -> Result<(), error::SystemError> {
    match status {
        Some(FriendshipStatus::Requested) => Ok(()),
        _ => Err(error::SystemError::bad_request("No pending friend request to answer")),
    }
}
