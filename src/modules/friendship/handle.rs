use actix_web::{HttpRequest, post, web};

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::friendship::{model::FriendUserIdBody, service::FriendshipService},
    utils::ValidatedJson,
};

#[post("/send")]
pub async fn send_friendship_request(
    friendship_service: web::Data<FriendshipService>,
    body: ValidatedJson<FriendUserIdBody>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    friendship_service.send(user_id, body.0.friend_user_id).await?;
    Ok(success::Success::ok(None).message("Friend request sent successfully"))
}

#[post("/accept")]
pub async fn accept_friendship_request(
    friendship_service: web::Data<FriendshipService>,
    body: ValidatedJson<FriendUserIdBody>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    friendship_service.accept(user_id, body.0.friend_user_id).await?;
    Ok(success::Success::ok(None).message("Friend request accepted successfully"))
}

#[post("/decline")]
pub async fn decline_friendship_request(
    friendship_service: web::Data<FriendshipService>,
    body: ValidatedJson<FriendUserIdBody>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    friendship_service.decline(user_id, body.0.friend_user_id).await?;
    Ok(success::Success::ok(None).message("Friend request declined successfully"))
}
