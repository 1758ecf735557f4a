//! Image layer loader: scope-keyed accumulation of asynchronously loaded
//! room images.
//!
//! Each navigation target (a side, a checkpoint, a single room) opens a new
//! *scope*. A scope owns one slot per placed room; every slot advances
//! independently through `Pending → Loaded` or `Pending → Failed`, so images
//! become drawable one by one with no "all loaded" gate, and a failed fetch
//! simply leaves its slot out of the drawable set.
//!
//! Opening a scope invalidates the previous one by bumping a monotonically
//! increasing token. Completions are delivered back with the token they were
//! issued under; a completion whose token no longer matches is dropped
//! without error, which keeps a slow fetch from a superseded scope from
//! painting over the current one.
//!
//! The set is generic over the image handle type `H` (an
//! `HtmlImageElement` in the browser) so the state machine tests natively.

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;

use catalog::tree::Point;

/// Identity of one loader scope. Tokens are never reused within a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeToken(u64);

/// One image layer to load: a room's screenshot and its world placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Id of the room this layer belongs to.
    pub room_id: String,
    /// Image reference to fetch.
    pub url: String,
    /// World position of the image's top-left corner.
    pub position: Point,
}

/// A fetch the host must issue for the current scope.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerRequest {
    /// Slot index to report completion against.
    pub index: usize,
    /// Image reference to fetch.
    pub url: String,
}

/// Load state of a single slot.
#[derive(Debug, Clone, PartialEq)]
enum LayerState<H> {
    Pending,
    Loaded(H),
    Failed,
}

#[derive(Debug, Clone)]
struct LayerSlot<H> {
    layer: Layer,
    state: LayerState<H>,
}

/// Outcome of delivering a load event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The event belonged to the current scope and was recorded.
    Applied,
    /// The event was for a superseded scope or an already-settled slot and
    /// was dropped.
    Stale,
}

/// The per-scope image accumulator.
#[derive(Debug)]
pub struct LayerSet<H> {
    scope: ScopeToken,
    slots: Vec<LayerSlot<H>>,
}

impl<H> Default for LayerSet<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> LayerSet<H> {
    /// Create an empty set. The first real scope starts at [`Self::begin_scope`].
    #[must_use]
    pub fn new() -> Self {
        Self { scope: ScopeToken(0), slots: Vec::new() }
    }

    /// The token of the current scope.
    #[must_use]
    pub fn scope(&self) -> ScopeToken {
        self.scope
    }

    /// Open a new scope over the given layers, discarding all slots of the
    /// previous scope. Returns the new scope's token; completions must echo
    /// it back.
    pub fn begin_scope(&mut self, layers: Vec<Layer>) -> ScopeToken {
        self.scope = ScopeToken(self.scope.0 + 1);
        log::debug!("image scope {} opened with {} layers", self.scope.0, layers.len());
        self.slots = layers
            .into_iter()
            .map(|layer| LayerSlot { layer, state: LayerState::Pending })
            .collect();
        self.scope
    }

    /// Fetches still outstanding for the current scope, in slot order.
    pub fn requests(&self) -> impl Iterator<Item = LayerRequest> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| matches!(slot.state, LayerState::Pending))
            .map(|(index, slot)| LayerRequest { index, url: slot.layer.url.clone() })
    }

    /// Record a successful load for a slot.
    ///
    /// Events for a superseded scope, an out-of-range index, or a slot that
    /// already settled are dropped as [`Delivery::Stale`].
    pub fn complete(&mut self, token: ScopeToken, index: usize, handle: H) -> Delivery {
        self.settle(token, index, LayerState::Loaded(handle))
    }

    /// Record a failed load for a slot. Failure is terminal for the scope;
    /// the slot is simply omitted from the drawable set.
    pub fn fail(&mut self, token: ScopeToken, index: usize) -> Delivery {
        self.settle(token, index, LayerState::Failed)
    }

    /// Loaded images with their world positions, in slot (catalog) order —
    /// never completion order, so repaints are visually stable while loads
    /// race.
    pub fn drawable(&self) -> impl Iterator<Item = (&H, Point)> {
        self.slots.iter().filter_map(|slot| match &slot.state {
            LayerState::Loaded(handle) => Some((handle, slot.layer.position)),
            LayerState::Pending | LayerState::Failed => None,
        })
    }

    /// Number of slots in the current scope.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the current scope has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots that have loaded.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot.state, LayerState::Loaded(_)))
            .count()
    }

    fn settle(&mut self, token: ScopeToken, index: usize, state: LayerState<H>) -> Delivery {
        if token != self.scope {
            log::debug!("dropping load event for superseded scope {}", token.0);
            return Delivery::Stale;
        }
        match self.slots.get_mut(index) {
            Some(slot) if matches!(slot.state, LayerState::Pending) => {
                slot.state = state;
                Delivery::Applied
            }
            _ => Delivery::Stale,
        }
    }
}
