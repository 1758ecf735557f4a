//! Navigation resolver: display indices and previous/next links for a room.
//!
//! Everything here is a pure function of a loaded [`Area`] and the input
//! keys. No state is held between calls and no caching is done; results are
//! cheap to recompute and safe to memoize by key if a caller wants to.
//!
//! Room-level neighbours cross checkpoint boundaries (the last room of
//! checkpoint N is followed by the first room of checkpoint N+1). Sub-room
//! links are derived from the *neighbouring* room's sub-rooms, never from the
//! current room's own, so a caller can offer "previous room's last sub-room"
//! as a finer-grained alternative to the room-level step.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::locator;
use crate::tree::{Area, Catalog, Chapter, Checkpoint, Room, Side};

/// Error returned by the resolver functions.
///
/// The `Unknown*` variants are caller errors: the requested key does not
/// exist in the catalog. [`NavError::Inconsistent`] signals a broken internal
/// cross-reference, which a validated catalog cannot produce; it is logged as
/// an error and should be treated as a bug, not as user input to handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    /// No area with the given id.
    #[error("unknown area {0}")]
    UnknownArea(String),
    /// No chapter with the given id in the area.
    #[error("unknown chapter {0}")]
    UnknownChapter(String),
    /// No side with the given id in the chapter.
    #[error("unknown side {0}")]
    UnknownSide(String),
    /// No room with the given id in the side.
    #[error("unknown room {0}")]
    UnknownRoom(String),
    /// A cross-reference inside the model is broken.
    #[error("inconsistent catalog: {0}")]
    Inconsistent(String),
}

/// A navigable link to a neighbouring room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomLink {
    /// Id of the target room.
    pub room_id: String,
    /// Display name of the target room.
    pub name: String,
}

/// A navigable link to a sub-room of a neighbouring room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubroomLink {
    /// Id of the room owning the sub-room.
    pub room_id: String,
    /// 1-based sub-room number within that room.
    pub subroom_no: usize,
    /// Display name of the sub-room.
    pub name: String,
}

/// Everything a room page needs: the resolved room, its display indices, and
/// its neighbour links.
#[derive(Debug)]
pub struct RoomContext<'a> {
    /// The resolved room.
    pub room: &'a Room,
    /// The checkpoint owning the room.
    pub checkpoint: &'a Checkpoint,
    /// Ordinal of the owning checkpoint within the side.
    pub checkpoint_no: usize,
    /// Human-readable room code, `"{abbreviation}-{checkpoint_room_no}"`.
    pub room_code: String,
    /// 1-based position of the room within its checkpoint.
    pub checkpoint_room_no: usize,
    /// Number of rooms in the owning checkpoint.
    pub checkpoint_room_count: usize,
    /// 1-based position of the room across the whole side.
    pub level_room_no: usize,
    /// Total number of rooms in the side.
    pub level_room_count: usize,
    /// Link to the previous room, crossing checkpoint boundaries. Absent at
    /// the first room of the side.
    pub prev_room: Option<RoomLink>,
    /// Link to the next room, crossing checkpoint boundaries. Absent at the
    /// last room of the side.
    pub next_room: Option<RoomLink>,
    /// Link to the previous room's *last* sub-room, when it has any.
    pub prev_subroom: Option<SubroomLink>,
    /// Link to the next room's *first* sub-room, when it has any.
    pub next_subroom: Option<SubroomLink>,
}

/// A fully resolved room path: area, chapter, and side context plus the room
/// resolution and the teleport locator for the external game client.
#[derive(Debug)]
pub struct PathContext<'a> {
    /// The area containing the room.
    pub area: &'a Area,
    /// The chapter containing the room.
    pub chapter: &'a Chapter,
    /// The side containing the room.
    pub side: &'a Side,
    /// The room resolution within that side.
    pub room: RoomContext<'a>,
    /// Teleport locator query string for the companion process.
    pub teleport_params: String,
}

/// Resolve a room within a side.
///
/// # Errors
///
/// [`NavError::UnknownRoom`] when the id is absent from the side;
/// [`NavError::Inconsistent`] when a model cross-reference is broken (cannot
/// happen for a catalog that passed [`crate::tree::load`]).
pub fn resolve<'a>(side: &'a Side, room_id: &str) -> Result<RoomContext<'a>, NavError> {
    let room = side
        .room(room_id)
        .ok_or_else(|| NavError::UnknownRoom(room_id.to_owned()))?;

    let checkpoint_no = room.checkpoint_no;
    let checkpoint = side
        .checkpoints
        .get(checkpoint_no)
        .ok_or_else(|| inconsistent(format!("room {room_id} claims missing checkpoint {checkpoint_no}")))?;

    let room_index = checkpoint
        .room_order
        .iter()
        .position(|id| id == room_id)
        .ok_or_else(|| {
            inconsistent(format!("room {room_id} is not in checkpoint {checkpoint_no}'s order"))
        })?;

    let prev_id = match room_index.checked_sub(1) {
        Some(i) => Some(&checkpoint.room_order[i]),
        None => checkpoint_no
            .checked_sub(1)
            .and_then(|i| side.checkpoints[i].room_order.last()),
    };
    let next_id = checkpoint.room_order.get(room_index + 1).or_else(|| {
        side.checkpoints
            .get(checkpoint_no + 1)
            .and_then(|c| c.room_order.first())
    });

    let prev = neighbour(side, prev_id)?;
    let next = neighbour(side, next_id)?;

    let prev_subroom = prev.as_ref().and_then(|(id, room)| {
        room.subrooms.last().map(|sub| SubroomLink {
            room_id: (*id).clone(),
            subroom_no: room.subrooms.len(),
            name: sub.name.clone(),
        })
    });
    let next_subroom = next.as_ref().and_then(|(id, room)| {
        room.subrooms.first().map(|sub| SubroomLink {
            room_id: (*id).clone(),
            subroom_no: 1,
            name: sub.name.clone(),
        })
    });

    let earlier_rooms: usize = side.checkpoints[..checkpoint_no]
        .iter()
        .map(Checkpoint::room_count)
        .sum();

    Ok(RoomContext {
        room,
        checkpoint,
        checkpoint_no,
        room_code: format!("{}-{}", checkpoint.abbreviation, room_index + 1),
        checkpoint_room_no: room_index + 1,
        checkpoint_room_count: checkpoint.room_count(),
        level_room_no: earlier_rooms + room_index + 1,
        level_room_count: side.room_count(),
        prev_room: prev.map(|(id, room)| RoomLink {
            room_id: id.clone(),
            name: room.name.clone(),
        }),
        next_room: next.map(|(id, room)| RoomLink {
            room_id: id.clone(),
            name: room.name.clone(),
        }),
        prev_subroom,
        next_subroom,
    })
}

/// Resolve the full area → chapter → side → room path within a catalog.
///
/// Fails on the first missing key, so callers can distinguish which level of
/// the path was wrong.
///
/// # Errors
///
/// [`NavError::UnknownArea`], [`NavError::UnknownChapter`],
/// [`NavError::UnknownSide`], or any error of [`resolve`].
pub fn resolve_path<'a>(
    catalog: &'a Catalog,
    area_id: &str,
    chapter_id: &str,
    side_id: &str,
    room_id: &str,
) -> Result<PathContext<'a>, NavError> {
    let area = catalog
        .area(area_id)
        .ok_or_else(|| NavError::UnknownArea(area_id.to_owned()))?;
    let chapter = area
        .chapter(chapter_id)
        .ok_or_else(|| NavError::UnknownChapter(chapter_id.to_owned()))?;
    let side = chapter
        .side(side_id)
        .ok_or_else(|| NavError::UnknownSide(side_id.to_owned()))?;
    let room = resolve(side, room_id)?;
    let teleport_params =
        locator::teleport_params(area, chapter, side_id, room_id, room.room.position);
    Ok(PathContext {
        area,
        chapter,
        side,
        room,
        teleport_params,
    })
}

fn neighbour<'a>(
    side: &'a Side,
    id: Option<&'a String>,
) -> Result<Option<(&'a String, &'a Room)>, NavError> {
    match id {
        None => Ok(None),
        Some(id) => side
            .room(id)
            .map(|room| Some((id, room)))
            .ok_or_else(|| inconsistent(format!("checkpoint order references missing room {id}"))),
    }
}

fn inconsistent(detail: String) -> NavError {
    log::error!("inconsistent catalog: {detail}");
    NavError::Inconsistent(detail)
}
