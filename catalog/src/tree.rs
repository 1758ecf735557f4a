//! Hierarchy model: the static catalog tree and its load-time validation.
//!
//! The catalog is parsed from JSON once at startup and never mutated
//! afterwards. Chapters and sides are kept in `Vec`s because their source
//! order is the canonical display order; rooms live in a `HashMap` keyed by
//! room id, with traversal order defined entirely by the checkpoints'
//! `room_order` lists. Every cross-reference (checkpoint → room id, room →
//! checkpoint ordinal) is checked by [`load`]; downstream code may therefore
//! treat a loaded [`Area`] as internally consistent.

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

/// A position in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Width and height in world units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned extent in world units.
///
/// `top`/`left` are the minimum corner, `bottom`/`right` the maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Union of the placed rectangles of the given rooms.
    ///
    /// Rooms without a world position contribute nothing. Returns `None` when
    /// no room in the scope is placed.
    pub fn over<'a, I>(rooms: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Room>,
    {
        let mut bbox: Option<Self> = None;
        for room in rooms {
            let Some(pos) = room.position else {
                continue;
            };
            let right = pos.x + room.size.width;
            let bottom = pos.y + room.size.height;
            bbox = Some(match bbox {
                None => Self { top: pos.y, left: pos.x, bottom, right },
                Some(b) => Self {
                    top: b.top.min(pos.y),
                    left: b.left.min(pos.x),
                    bottom: b.bottom.max(bottom),
                    right: b.right.max(right),
                },
            });
        }
        bbox
    }
}

/// The catalog root: every area, in display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub areas: Vec<Area>,
}

impl Catalog {
    /// Look up an area by id.
    #[must_use]
    pub fn area(&self, id: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.id == id)
    }
}

/// Top-level content grouping within the catalog.
#[derive(Debug, Clone)]
pub struct Area {
    /// Catalog identifier for this area.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Identifier the external game client knows this area by.
    pub game_id: String,
    /// Chapters in canonical display order.
    pub chapters: Vec<Chapter>,
}

impl Area {
    /// Look up a chapter by id. `None` on unknown keys; callers decide
    /// whether that is fatal.
    #[must_use]
    pub fn chapter(&self, id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == id)
    }
}

/// A game level within an area.
#[derive(Debug, Clone)]
pub struct Chapter {
    /// Catalog identifier for this chapter.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Identifier the external game client knows this chapter by.
    pub game_id: String,
    /// Sides in canonical display order (A, then B, then C).
    pub sides: Vec<Side>,
}

impl Chapter {
    /// Look up a side by id.
    #[must_use]
    pub fn side(&self, id: &str) -> Option<&Side> {
        self.sides.iter().find(|s| s.id == id)
    }
}

/// A variant of a chapter with its own room graph.
#[derive(Debug, Clone)]
pub struct Side {
    /// Catalog identifier, conventionally `"A"`, `"B"`, or `"C"`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// All rooms in this side, keyed by room id.
    pub rooms: HashMap<String, Room>,
    /// Checkpoints in traversal order. A checkpoint's ordinal is its index
    /// here.
    pub checkpoints: Vec<Checkpoint>,
}

impl Side {
    /// Look up a room by id.
    #[must_use]
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Total room count, summed over checkpoints.
    ///
    /// Equals `rooms.len()` for any side produced by [`load`].
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.checkpoints.iter().map(Checkpoint::room_count).sum()
    }

    /// Rooms in side traversal order: checkpoint by checkpoint, following
    /// each checkpoint's `room_order`.
    pub fn rooms_in_order(&self) -> impl Iterator<Item = (&str, &Room)> {
        self.checkpoints
            .iter()
            .flat_map(|c| c.room_order.iter())
            .filter_map(|id| self.rooms.get_key_value(id))
            .map(|(id, room)| (id.as_str(), room))
    }
}

/// A contiguous, ordered block of rooms within a side.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    /// Display name.
    pub name: String,
    /// Short label used in room codes (e.g. `"CR"` for "Crossing").
    pub abbreviation: String,
    /// Room ids in traversal order. Never empty for a loaded catalog.
    pub room_order: Vec<String>,
}

impl Checkpoint {
    /// Number of rooms in this checkpoint.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.room_order.len()
    }
}

/// A single game screen.
#[derive(Debug, Clone)]
pub struct Room {
    /// Display name.
    pub name: String,
    /// Reference to this room's screenshot image.
    pub image: String,
    /// World position of the room's top-left corner. `None` means the room
    /// has no teleport coordinate and no placement on the composited map.
    pub position: Option<Point>,
    /// Extent of the room in world units.
    pub size: Size,
    /// Ordinal of the owning checkpoint within the side.
    pub checkpoint_no: usize,
    /// Finer navigational subdivisions, in order. Empty when the room has
    /// none; a sub-room's 1-based number is its index here plus one.
    pub subrooms: Vec<Subroom>,
}

/// A finer navigational subdivision inside a room.
#[derive(Debug, Clone)]
pub struct Subroom {
    /// Display name.
    pub name: String,
}

/// Error returned by [`load`] when the catalog source violates a structural
/// invariant. The catalog is trusted static data, so any of these aborts
/// startup.
#[derive(Debug, thiserror::Error)]
pub enum MalformedCatalog {
    /// The input was not valid JSON for the expected shape.
    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two areas in the catalog share an id.
    #[error("duplicate area id {area}")]
    DuplicateArea { area: String },
    /// Two chapters in the area share an id.
    #[error("area {area}: duplicate chapter id {chapter}")]
    DuplicateChapter { area: String, chapter: String },
    /// Two sides in a chapter share an id.
    #[error("chapter {chapter}: duplicate side id {side}")]
    DuplicateSide { chapter: String, side: String },
    /// A checkpoint has an empty `room_order`.
    #[error("side {side}: checkpoint {checkpoint} has no rooms")]
    EmptyCheckpoint { side: String, checkpoint: usize },
    /// A `room_order` entry does not resolve to a room in the side.
    #[error("side {side}: checkpoint {checkpoint} references unknown room {room}")]
    UnknownOrderedRoom {
        side: String,
        checkpoint: usize,
        room: String,
    },
    /// A room id appears in more than one checkpoint's `room_order`.
    #[error("side {side}: room {room} appears in more than one checkpoint")]
    RoomInMultipleCheckpoints { side: String, room: String },
    /// A room in the side map is not referenced by any checkpoint.
    #[error("side {side}: room {room} is not referenced by any checkpoint")]
    OrphanRoom { side: String, room: String },
    /// A room's `checkpoint_no` disagrees with the checkpoint that actually
    /// orders it.
    #[error(
        "side {side}: room {room} claims checkpoint {claimed} but is ordered under checkpoint {actual}"
    )]
    CheckpointMismatch {
        side: String,
        room: String,
        claimed: usize,
        actual: usize,
    },
}

/// Parse and validate a catalog area from its JSON source.
///
/// # Errors
///
/// Returns [`MalformedCatalog`] if the JSON does not parse or a structural
/// invariant is violated (unknown ordered room, orphan room, checkpoint
/// mismatch, duplicate ids, empty checkpoint).
pub fn load(json: &str) -> Result<Area, MalformedCatalog> {
    let raw: RawArea = serde_json::from_str(json)?;
    build_area(raw)
}

/// Parse and validate a full catalog: a JSON array of areas.
///
/// # Errors
///
/// Everything [`load`] rejects, plus duplicate area ids.
pub fn load_catalog(json: &str) -> Result<Catalog, MalformedCatalog> {
    let raw: Vec<RawArea> = serde_json::from_str(json)?;
    let mut area_ids = HashSet::new();
    let mut areas = Vec::with_capacity(raw.len());
    for raw_area in raw {
        if !area_ids.insert(raw_area.id.clone()) {
            return Err(MalformedCatalog::DuplicateArea { area: raw_area.id });
        }
        areas.push(build_area(raw_area)?);
    }
    Ok(Catalog { areas })
}

// =============================================================
// Raw input shapes
// =============================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArea {
    id: String,
    name: String,
    game_id: String,
    chapters: Vec<RawChapter>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChapter {
    id: String,
    name: String,
    game_id: String,
    sides: Vec<RawSide>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSide {
    id: String,
    name: String,
    checkpoints: Vec<RawCheckpoint>,
    rooms: HashMap<String, RawRoom>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCheckpoint {
    name: String,
    abbreviation: String,
    room_order: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRoom {
    name: String,
    image: String,
    #[serde(default)]
    position: Option<Point>,
    size: Size,
    checkpoint_no: usize,
    #[serde(default)]
    subrooms: Vec<RawSubroom>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSubroom {
    name: String,
}

// =============================================================
// Validation
// =============================================================

fn build_area(raw: RawArea) -> Result<Area, MalformedCatalog> {
    let mut chapter_ids = HashSet::new();
    let mut chapters = Vec::with_capacity(raw.chapters.len());
    for raw_chapter in raw.chapters {
        if !chapter_ids.insert(raw_chapter.id.clone()) {
            return Err(MalformedCatalog::DuplicateChapter {
                area: raw.id,
                chapter: raw_chapter.id,
            });
        }
        chapters.push(build_chapter(raw_chapter)?);
    }
    Ok(Area {
        id: raw.id,
        name: raw.name,
        game_id: raw.game_id,
        chapters,
    })
}

fn build_chapter(raw: RawChapter) -> Result<Chapter, MalformedCatalog> {
    let mut side_ids = HashSet::new();
    let mut sides = Vec::with_capacity(raw.sides.len());
    for raw_side in raw.sides {
        if !side_ids.insert(raw_side.id.clone()) {
            return Err(MalformedCatalog::DuplicateSide {
                chapter: raw.id,
                side: raw_side.id,
            });
        }
        sides.push(build_side(raw_side)?);
    }
    Ok(Chapter {
        id: raw.id,
        name: raw.name,
        game_id: raw.game_id,
        sides,
    })
}

fn build_side(raw: RawSide) -> Result<Side, MalformedCatalog> {
    // Ordinal of the checkpoint that orders each room, keyed by room id.
    let mut ordered_under: HashMap<&str, usize> = HashMap::new();
    for (ordinal, checkpoint) in raw.checkpoints.iter().enumerate() {
        if checkpoint.room_order.is_empty() {
            return Err(MalformedCatalog::EmptyCheckpoint {
                side: raw.id,
                checkpoint: ordinal,
            });
        }
        for room_id in &checkpoint.room_order {
            if !raw.rooms.contains_key(room_id) {
                return Err(MalformedCatalog::UnknownOrderedRoom {
                    side: raw.id,
                    checkpoint: ordinal,
                    room: room_id.clone(),
                });
            }
            if ordered_under.insert(room_id.as_str(), ordinal).is_some() {
                return Err(MalformedCatalog::RoomInMultipleCheckpoints {
                    side: raw.id,
                    room: room_id.clone(),
                });
            }
        }
    }

    for (room_id, room) in &raw.rooms {
        match ordered_under.get(room_id.as_str()) {
            None => {
                return Err(MalformedCatalog::OrphanRoom {
                    side: raw.id,
                    room: room_id.clone(),
                });
            }
            Some(&actual) if actual != room.checkpoint_no => {
                return Err(MalformedCatalog::CheckpointMismatch {
                    side: raw.id,
                    room: room_id.clone(),
                    claimed: room.checkpoint_no,
                    actual,
                });
            }
            Some(_) => {}
        }
    }

    let rooms = raw
        .rooms
        .into_iter()
        .map(|(id, room)| {
            (
                id,
                Room {
                    name: room.name,
                    image: room.image,
                    position: room.position,
                    size: room.size,
                    checkpoint_no: room.checkpoint_no,
                    subrooms: room
                        .subrooms
                        .into_iter()
                        .map(|s| Subroom { name: s.name })
                        .collect(),
                },
            )
        })
        .collect();

    Ok(Side {
        id: raw.id,
        name: raw.name,
        rooms,
        checkpoints: raw
            .checkpoints
            .into_iter()
            .map(|c| Checkpoint {
                name: c.name,
                abbreviation: c.abbreviation,
                room_order: c.room_order,
            })
            .collect(),
    })
}
