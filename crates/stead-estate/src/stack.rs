//! The owning stack, as seen from its estates.

use std::sync::Arc;

use stead_core::EstateId;

use crate::time::TimeSource;

/// Capabilities the owning stack provides to its estates.
///
/// The stack allocates estate ids, owns the remote-estate table collisions
/// are checked against, supplies the time source every estate's timer
/// runs on, and carries keep-alive probes on request. Probe delivery
/// failures are the stack's concern, not this core's.
pub trait Stack {
    /// Next candidate estate id. Construction skips candidates already
    /// present in the table.
    fn next_estate_id(&self) -> EstateId;

    /// Whether `id` is present in the stack's remote-estate table.
    fn has_remote(&self, id: EstateId) -> bool;

    /// Dispatch a keep-alive probe addressed to the given estate.
    fn send_keep_alive(&self, target: EstateId);

    /// The stack's own name; the default name for its local estate.
    fn name(&self) -> &str;

    /// The time source shared by every estate of this stack.
    fn time_source(&self) -> Arc<dyn TimeSource>;
}
