use crate::{
    api::error,
    modules::{
        friend::{model::FriendProfileResponse, repository::FriendQueryRepository},
        friendship::schema::FriendshipStatus,
    },
};

/// Read-side repository, usually backed by the read pool.
#[derive(Clone)]
pub struct FriendQueryRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendQueryRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FriendQueryRepository for FriendQueryRepositoryPg {
    async fn find_friend_profile(
        &self,
        user_id: i64,
        friend_user_id: i64,
    ) -> Result<Option<FriendProfileResponse>, error::SystemError> {
        let profile = sqlx::query_as::<_, FriendProfileResponse>(
            r#"
            SELECT
                friends.id,
                friends.full_name,
                friends.phone_number,
                COALESCE(totals.total_friend_count, 0) AS total_friend_count,
                (
                    SELECT COUNT(*)
                    FROM friendships fs1
                    JOIN friendships fs2
                        ON fs1.friend_user_id = fs2.friend_user_id
                    WHERE fs1.user_id = $1
                      AND fs2.user_id = $2
                      AND fs1.status = $3
                      AND fs2.status = $3
                ) AS mutual_friend_count
            FROM users friends
            JOIN friendships f
                ON f.friend_user_id = friends.id
            LEFT JOIN (
                SELECT user_id, COUNT(friend_user_id) AS total_friend_count
                FROM friendships
                WHERE status = $3
                GROUP BY user_id
            ) totals
                ON totals.user_id = friends.id
            WHERE f.user_id = $1
              AND f.friend_user_id = $2
              AND f.status = $3
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(friend_user_id)
        .bind(FriendshipStatus::Accepted)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }
}
