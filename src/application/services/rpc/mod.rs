//! Request/reply over a message broker: one private reply queue and one
//! correlation id per call.

pub mod exchange;
pub mod pending;
pub mod reply;
#[cfg(test)]
pub(crate) mod testing;

pub use exchange::{RpcChannel, exchange};
pub use pending::{PendingRequest, ReplyDelivery};
pub use reply::{DecodedReply, decode_reply, empty_reply};
