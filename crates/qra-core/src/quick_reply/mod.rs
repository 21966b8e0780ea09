//! Quick reply domain models and the discovery registry.
//!
//! Quick replies come from two places: the host-managed catalog and buttons
//! rendered into the chat form by third-party scripts. Both end up as
//! [`QuickReplyItem`]s.

mod model;
mod registry;

pub use model::{EMPTY_MESSAGE_PLACEHOLDER, QuickReplyItem, ReplyScope, UNKNOWN_SET_NAME};
pub use registry::DiscoveryRegistry;
