//! Fire-and-forget requests to the companion process running next to the
//! game.
//!
//! The companion listens on localhost and accepts the teleport locator
//! produced by `catalog::locator`. It may not be running at all, and the
//! `no-cors` response is opaque either way, so every failure here is
//! swallowed: a dead companion degrades to a button that does nothing.

#[cfg(test)]
#[path = "remote_test.rs"]
mod remote_test;

use crate::consts::DEFAULT_COMPANION_PORT;

/// The port to talk to: the user's override, or the companion default.
#[must_use]
pub fn effective_port(port: Option<u16>) -> u16 {
    port.unwrap_or(DEFAULT_COMPANION_PORT)
}

/// URL of the companion's teleport endpoint for a locator string.
#[must_use]
pub fn teleport_url(port: u16, teleport_params: &str) -> String {
    format!("http://localhost:{port}/tp{teleport_params}")
}

/// URL of the companion's focus endpoint.
#[must_use]
pub fn focus_url(port: u16) -> String {
    format!("http://localhost:{port}/focus")
}

/// Teleport the running game to a room, then pull its window to the front.
///
/// Best effort: failures of either request are swallowed.
pub async fn open_room(port: Option<u16>, teleport_params: &str) {
    let port = effective_port(port);
    let _ = gloo_net::http::Request::get(&teleport_url(port, teleport_params))
        .mode(web_sys::RequestMode::NoCors)
        .send()
        .await;
    let _ = gloo_net::http::Request::get(&focus_url(port)).send().await;
}

/// Spawn [`open_room`] onto the browser task queue and return immediately.
pub fn open_room_detached(port: Option<u16>, teleport_params: String) {
    wasm_bindgen_futures::spawn_local(async move {
        open_room(port, &teleport_params).await;
    });
}
