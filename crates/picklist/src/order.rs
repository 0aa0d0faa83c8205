//! Selection order store.
//!
//! Persists the user-intended ordering of chosen values as JSON-array
//! text in a durable attribute on the host control, so the order
//! survives reconciliation passes and re-renders.
//!
//! The store degrades, never fails: an absent attribute reads as an
//! empty order, and malformed stored text is treated as empty (the
//! control must stay interactive even with corrupted persisted state).

use picklist_core::logging::targets;

use crate::host::{ATTR_SELECTED_ORDER, HostSelect};

/// Reads the persisted selection order.
///
/// Absent or malformed stored state yields an empty order.
pub(crate) fn read(host: &HostSelect) -> Vec<String> {
    stored(host).unwrap_or_default()
}

/// Raw read accessor for the persisted selection order.
///
/// Returns `None` if no order has been persisted, and an empty sequence
/// if the stored text fails to parse as a JSON string array.
pub(crate) fn stored(host: &HostSelect) -> Option<Vec<String>> {
    let text = host.attribute(ATTR_SELECTED_ORDER)?;
    match serde_json::from_str::<Vec<String>>(text) {
        Ok(order) => Some(order),
        Err(err) => {
            tracing::debug!(
                target: targets::ORDER,
                %err,
                "malformed persisted order, treating as empty"
            );
            Some(Vec::new())
        }
    }
}

/// Persists a selection order on the host control.
pub(crate) fn write(host: &mut HostSelect, order: &[String]) {
    match serde_json::to_string(order) {
        Ok(text) => host.set_attribute(ATTR_SELECTED_ORDER, text),
        Err(err) => {
            // Serializing a string slice cannot realistically fail; keep
            // the previous stored order if it somehow does.
            tracing::debug!(target: targets::ORDER, %err, "failed to serialize order");
        }
    }
}
