use crate::modules::friendship::handle::*;
use actix_web::web::{ServiceConfig, scope};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/friendship-requests")
            .service(send_friendship_request)
            .service(accept_friendship_request)
            .service(decline_friendship_request),
    );
}
