use actix_web::{HttpRequest, get, web};

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        friend::{model::FriendProfileResponse, service::FriendQueryService},
        friendship::model::FriendUserIdBody,
    },
    utils::ValidatedQuery,
};

#[get("/profile")]
pub async fn get_friend_profile(
    friend_service: web::Data<FriendQueryService>,
    query: ValidatedQuery<FriendUserIdBody>,
    req: HttpRequest,
) -> Result<success::Success<FriendProfileResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let profile = friend_service.get_friend_profile(user_id, query.0.friend_user_id).await?;
    Ok(success::Success::ok(Some(profile)).message("Friend profile retrieved successfully"))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, middleware::from_fn, test, web};
    use serde_json::{Value, json};
    use std::sync::Arc;

    use crate::{
        modules::{
            friend::{route, service::FriendQueryService},
            friendship::schema::FriendshipStatus,
        },
        test::{MemoryStore, USER_HEADER, fake_session},
    };

    async fn get(store: &MemoryStore, user: i64, query: &str) -> (StatusCode, Value) {
        let service = FriendQueryService::with_dependencies(Arc::new(store.clone()));
        let app = test::init_service(
            App::new().app_data(web::Data::new(service)).service(
                web::scope("/api").wrap(from_fn(fake_session)).configure(route::configure),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/friends/profile?{query}"))
            .insert_header((USER_HEADER, user.to_string()))
            .to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn profile_payload_is_camel_case() {
        let store = MemoryStore::with_users(&[1, 2, 3]);
        for (a, b) in [(1, 2), (2, 1), (2, 3), (3, 2), (1, 3), (3, 1)] {
            store.put_edge(a, b, FriendshipStatus::Accepted).await;
        }

        let (status, body) = get(&store, 1, "friendUserId=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"],
            json!({
                "id": 2,
                "fullName": MemoryStore::full_name(2),
                "phoneNumber": MemoryStore::phone_number(2),
                "totalFriendCount": 2,
                "mutualFriendCount": 1,
            })
        );
    }

    #[actix_web::test]
    async fn pending_friend_is_not_found() {
        let store = MemoryStore::with_users(&[1, 2]);
        store.put_edge(1, 2, FriendshipStatus::Requested).await;

        let (status, body) = get(&store, 1, "friendUserId=2").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Friend not found");
    }

    #[actix_web::test]
    async fn malformed_id_is_bad_request() {
        let store = MemoryStore::with_users(&[1, 2]);

        for query in ["friendUserId=abc", "friendUserId=-4", ""] {
            let (status, _) = get(&store, 1, query).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }
}
