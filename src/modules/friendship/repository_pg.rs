use sqlx::PgConnection;

use crate::{
    api::error,
    modules::friendship::{
        repository::FriendshipRepository,
        schema::FriendshipStatus,
        transition::{EdgeState, EdgeWrite, Transition},
    },
};

#[derive(Clone)]
pub struct FriendshipRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendshipRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    /// Locks both directions of the pair in a fixed order.
    async fn lock_pair(
        user_id: i64,
        friend_user_id: i64,
        conn: &mut PgConnection,
    ) -> Result<EdgeState, error::SystemError> {
        let rows = sqlx::query_as::<_, (i64, FriendshipStatus)>(
            r#"
            SELECT user_id, status
            FROM friendships
            WHERE (user_id = $1 AND friend_user_id = $2)
               OR (user_id = $2 AND friend_user_id = $1)
            ORDER BY user_id
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .bind(friend_user_id)
        .fetch_all(&mut *conn)
        .await?;

        let mut state = EdgeState::default();
        for (owner, status) in rows {
            if owner == user_id {
                state.edge = Some(status);
            } else {
                state.reverse = Some(status);
            }
        }

        Ok(state)
    }

    async fn write(write: &EdgeWrite, conn: &mut PgConnection) -> Result<(), error::SystemError> {
        match *write {
            EdgeWrite::Insert { user_id, friend_user_id, status } => {
                sqlx::query(
                    "INSERT INTO friendships (user_id, friend_user_id, status) VALUES ($1, $2, $3)",
                )
                .bind(user_id)
                .bind(friend_user_id)
                .bind(status)
                .execute(&mut *conn)
                .await?;
            }
            EdgeWrite::Upsert { user_id, friend_user_id, status } => {
                sqlx::query(
                    r#"
                    INSERT INTO friendships (user_id, friend_user_id, status)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (user_id, friend_user_id)
                    DO UPDATE SET status = EXCLUDED.status, updated_at = NOW()
                    "#,
                )
                .bind(user_id)
                .bind(friend_user_id)
                .bind(status)
                .execute(&mut *conn)
                .await?;
            }
            EdgeWrite::Advance { user_id, friend_user_id, from, to } => {
                let rows = sqlx::query(
                    r#"
                    UPDATE friendships
                    SET status = $4, updated_at = NOW()
                    WHERE user_id = $1 AND friend_user_id = $2 AND status = $3
                    "#,
                )
                .bind(user_id)
                .bind(friend_user_id)
                .bind(from)
                .bind(to)
                .execute(&mut *conn)
                .await?
                .rows_affected();

                if rows != 1 {
                    return Err(error::SystemError::conflict(
                        "Friendship changed by a concurrent request",
                    ));
                }
            }
        }

        Ok(())
    }

    async fn apply_in_tx(
        transition: &Transition,
        conn: &mut PgConnection,
    ) -> Result<(), error::SystemError> {
        let (user_id, friend_user_id) = transition.edge();

        // Re-check under row locks; the guard ran outside the transaction.
        let state = Self::lock_pair(user_id, friend_user_id, conn).await?;

        for write in transition.plan(state)? {
            Self::write(&write, conn).await?;
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl FriendshipRepository for FriendshipRepositoryPg {
    async fn find_status(
        &self,
        user_id: i64,
        friend_user_id: i64,
    ) -> Result<Option<FriendshipStatus>, error::SystemError> {
        let status = sqlx::query_scalar::<_, FriendshipStatus>(
            "SELECT status FROM friendships WHERE user_id = $1 AND friend_user_id = $2",
        )
        .bind(user_id)
        .bind(friend_user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(status)
    }

    async fn apply(&self, transition: &Transition) -> Result<(), error::SystemError> {
        let mut tx = self.pool.begin().await?;

        match Self::apply_in_tx(transition, &mut *tx).await {
            Ok(()) => {
                tx.commit().await?;
                Ok(())
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    log::error!("Rollback of {:?} failed: {:?}", transition, rollback_err);
                }
                Err(err)
            }
        }
    }
}
