//! Room catalog model and navigation for the map atlas.
//!
//! This crate owns the static catalog shared by every surface of the viewer:
//! the area → chapter → side → checkpoint → room hierarchy, the pure
//! navigation resolver that turns a room key into display indices and
//! previous/next links, and the small formatting contracts (teleport locator,
//! shareable view link) handed to external collaborators. It has no browser
//! dependencies; everything here runs and tests natively.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`tree`] | Hierarchy model, JSON loading, and load-time validation |
//! | [`nav`] | Navigation resolver: indices and prev/next links |
//! | [`locator`] | Teleport locator and view-link string formatting |
//! | [`settings`] | Viewer settings and the settings-change reducer |

pub mod locator;
pub mod nav;
pub mod settings;
pub mod tree;
