use actix_web::{
    Error, HttpMessage,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use crate::utils::Claims;

mod memory;

pub use lockstep::LockstepGuards;
pub use memory::MemoryStore;

pub const USER_HEADER: &str = "x-test-user";

/// Stands in for `authentication`: trusts the caller id from [`USER_HEADER`].
pub async fn fake_session<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<B>, Error>
where
    B: MessageBody + 'static,
{
    let sub = req
        .headers()
        .get(USER_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok());

    if let Some(sub) = sub {
        req.extensions_mut().insert(Claims { sub, iat: 0, exp: u64::MAX });
    }

    next.call(req).await
}
