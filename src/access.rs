//! Ownership rules for the actions that change or remove content.
//!
//! Every predicate takes the caller as `Option<&User>`; an anonymous caller is
//! never allowed.

use crate::{db::{Message, Room, User}, AppError, AppResult};

/// Only the host may change a room.
pub fn can_edit_room(caller: Option<&User>, room: &Room) -> bool {
    caller.is_some_and(|user| user.id == room.host_id)
}

pub fn can_delete_room(caller: Option<&User>, room: &Room) -> bool {
    can_edit_room(caller, room)
}

/// Only the author may delete a message. The room host gets no say.
pub fn can_delete_message(caller: Option<&User>, message: &Message) -> bool {
    caller.is_some_and(|user| user.id == message.user_id)
}

pub fn ensure(allowed: bool) -> AppResult<()> {
    if allowed {
        Ok(())
    } else {
        Err(AppError::PermissionDenied)
    }
}
