use crate::domain::content::entity::Content;
use crate::domain::content::value_objects::ContentId;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

/// Raised after the triggering write is durably committed; consumers run
/// independently and their failures never reach the caller.
#[derive(Debug, Clone)]
pub enum ContentEvent {
    Created {
        id: ContentId,
        author_id: UserId,
        at: DateTime<Utc>,
    },
    Published {
        content: Box<Content>,
        at: DateTime<Utc>,
    },
}
