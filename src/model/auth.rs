use rocket::{
    http::Status,
    request::{FromRequest, Outcome},
    Request,
};

use crate::model::common::Address;

/// Header carrying the authenticated caller's ledger address.
///
/// Signature verification happens upstream (on the ledger, or at the gateway
/// fronting this service); by the time a request reaches us the address in
/// this header is trusted.
pub const CALLER_HEADER: &str = "X-Caller-Address";

/// The authenticated caller of a request, available via request guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub Address);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Caller {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match req.headers().get_one(CALLER_HEADER) {
            Some(address) if !address.is_empty() => {
                Outcome::Success(Caller(address.to_string()))
            }
            _ => Outcome::Failure((Status::Unauthorized, ())),
        }
    }
}
