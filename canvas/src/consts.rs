//! Shared numeric constants for the canvas crate.

// ── Fitting ─────────────────────────────────────────────────────

/// World-space strip excluded from the fitted height so the lowest rooms are
/// not hidden behind overlaid chrome at the bottom of the surface.
pub const VERTICAL_INSET_WORLD: f64 = 4.0;

// ── Companion process ───────────────────────────────────────────

/// Default TCP port of the companion process that accepts teleport requests.
pub const DEFAULT_COMPANION_PORT: u16 = 32270;
