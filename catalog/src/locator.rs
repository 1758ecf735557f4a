//! String formatting contracts handed to external collaborators.
//!
//! Both formats here are produce-only: the teleport locator is consumed by a
//! companion process next to the game, and the view link is pasted by users.
//! Neither has a parsing counterpart in this crate.

#[cfg(test)]
#[path = "locator_test.rs"]
mod locator_test;

use std::fmt::Write;

use crate::tree::{Area, BoundingBox, Chapter, Point};

/// Build the teleport locator query string for a room.
///
/// Format: `?area=<areaGameId>/<chapterGameId>&side=<sideId>&level=<roomId>`,
/// suffixed with `&x=<x>&y=<y>` when the room carries a world coordinate.
#[must_use]
pub fn teleport_params(
    area: &Area,
    chapter: &Chapter,
    side_id: &str,
    room_id: &str,
    position: Option<Point>,
) -> String {
    let mut params = format!(
        "?area={}/{}&side={}&level={}",
        area.game_id, chapter.game_id, side_id, room_id
    );
    if let Some(Point { x, y }) = position {
        // Infallible for String.
        let _ = write!(params, "&x={x}&y={y}");
    }
    params
}

/// Append a view extent to a base URL as query parameters.
///
/// The base is expected to already carry a query string; the extent is
/// appended as `&left=..&right=..&top=..&bottom=..`.
#[must_use]
pub fn view_link(base_url: &str, bbox: BoundingBox) -> String {
    format!(
        "{base_url}&left={}&right={}&top={}&bottom={}",
        bbox.left, bbox.right, bbox.top, bbox.bottom
    )
}
