//! Reconciliation engine.
//!
//! [`reconcile`] re-derives the two rendered list views from scratch:
//! the available view (all options in native order, search-filtered and
//! grouped) and the chosen view (selected options in the user-defined
//! order), plus the updated selection order the caller persists.
//!
//! The function is pure and idempotent: it never mutates the host and
//! is safe to invoke redundantly, e.g. after every keystroke in the
//! search box. Selection order stays stable across re-renders driven by
//! unrelated changes, while newly selected values are adopted by
//! appending them in native position order; this is a stable,
//! order-preserving set union between the prior order and the current
//! selected set.

use picklist_core::logging::targets;

use crate::host::{GroupId, HostSelect};
use crate::settings::PicklistSettings;

/// One display row, carrying a back-reference to its native position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// The option's value identifier.
    pub value: String,
    /// The option's display label.
    pub label: String,
    /// The option's native position (stable identity for addressing).
    pub position: usize,
    /// Whether the option is selected.
    pub selected: bool,
    /// The option's effective disabled state.
    pub disabled: bool,
    /// Whether this row is the current keyboard/navigation focus target.
    /// At most one row across both views carries this flag.
    pub highlighted: bool,
}

/// A group header with its nested rows, in the available view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView {
    /// The group's display label.
    pub label: String,
    /// Rows nested under this header, in native order.
    pub rows: Vec<RowView>,
}

/// One entry of the available view: either a free-standing row or a
/// group header with nested rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailableEntry {
    /// A row outside any group.
    Item(RowView),
    /// A group header with its nested rows.
    Group(GroupView),
}

/// The rendered available column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AvailableView {
    /// Column header, present only when both headers are configured.
    pub header: Option<String>,
    /// Search placeholder, present only when search is enabled.
    pub search_placeholder: Option<String>,
    /// Render hint: show a move-to-chosen affordance per row.
    pub show_move_buttons: bool,
    /// Entries in native order. Selected rows appear here too, flagged
    /// `selected`, so renderers can style or hide them.
    pub entries: Vec<AvailableEntry>,
}

impl AvailableView {
    /// Iterates all rows in the view, flattening group nesting.
    pub fn rows(&self) -> impl Iterator<Item = &RowView> {
        self.entries.iter().flat_map(|entry| match entry {
            AvailableEntry::Item(row) => std::slice::from_ref(row).iter(),
            AvailableEntry::Group(group) => group.rows.iter(),
        })
    }
}

/// The rendered chosen column: selected rows in user-defined order,
/// never filtered by search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChosenView {
    /// Column header, present only when both headers are configured.
    pub header: Option<String>,
    /// Render hint: show a move-to-available affordance per row.
    pub show_move_buttons: bool,
    /// Render hint: show reorder affordances next to each row.
    pub show_up_down_buttons: bool,
    /// Selected rows in selection-order.
    pub rows: Vec<RowView>,
}

impl ChosenView {
    /// The values of the chosen rows, in display order.
    pub fn values(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.value.clone()).collect()
    }
}

/// The output of a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// The available column.
    pub available: AvailableView,
    /// The chosen column.
    pub chosen: ChosenView,
    /// The updated selection order for the caller to persist: the prior
    /// order minus unselected values, plus newly selected values
    /// appended in native order.
    pub order: Vec<String>,
}

/// Finds the index of the first row with the given value.
///
/// Values are treated as unique; with duplicate values the first match
/// wins and the placement of later occurrences is unspecified.
pub fn find_by_value(rows: &[RowView], value: &str) -> Option<usize> {
    rows.iter().position(|row| row.value == value)
}

/// Recomputes both list views and the selection order.
///
/// - `order` is the persisted selection order; values in it that are no
///   longer selected (or no longer present) are dropped silently.
/// - `query` filters the available view only; the chosen view always
///   shows all selected rows. Ignored when search is disabled.
/// - `highlight` is the native position of the focus target, if any; a
///   stale position simply matches no row.
pub fn reconcile(
    host: &HostSelect,
    order: &[String],
    query: Option<&str>,
    highlight: Option<usize>,
    settings: &PicklistSettings,
) -> Reconciled {
    let query = if settings.enable_search {
        query
            .map(str::to_lowercase)
            .filter(|q| !q.is_empty())
    } else {
        None
    };

    // Headers are rendered only when both are configured.
    let (available_header, chosen_header) =
        match (&settings.non_selected_header, &settings.selected_header) {
            (Some(non_selected), Some(selected)) => {
                (Some(non_selected.clone()), Some(selected.clone()))
            }
            _ => (None, None),
        };

    let mut entries: Vec<AvailableEntry> = Vec::new();
    let mut selected_rows: Vec<RowView> = Vec::new();
    // The currently open group; a groupless row resets it, so a later
    // run of the same group starts a fresh header.
    let mut current_group: Option<GroupId> = None;

    for (position, option) in host.options().iter().enumerate() {
        let highlighted = highlight == Some(position);
        let row = RowView {
            value: option.value().to_string(),
            label: option.label().to_string(),
            position,
            selected: option.is_selected(),
            disabled: option.is_disabled(),
            highlighted,
        };

        if row.selected {
            selected_rows.push(row.clone());
        }

        // Open a group header when entering a new group; leaving all
        // groups closes the active one.
        match option.group() {
            Some(group_id) => {
                if current_group != Some(group_id) {
                    current_group = Some(group_id);
                    let label = host
                        .group(group_id)
                        .map(|g| g.label.clone())
                        .unwrap_or_default();
                    entries.push(AvailableEntry::Group(GroupView {
                        label,
                        rows: Vec::new(),
                    }));
                }
            }
            None => current_group = None,
        }

        let visible = match &query {
            Some(q) => row.label.to_lowercase().contains(q.as_str()),
            None => true,
        };

        if visible {
            // A selected option shows its highlight in the chosen view
            // only; the available copy stays unmarked.
            let mut available_row = row;
            if available_row.selected {
                available_row.highlighted = false;
            }

            match entries.last_mut() {
                Some(AvailableEntry::Group(group)) if current_group.is_some() => {
                    group.rows.push(available_row);
                }
                _ => entries.push(AvailableEntry::Item(available_row)),
            }
        }
    }

    if settings.hide_empty_groups {
        entries.retain(|entry| match entry {
            AvailableEntry::Group(group) => !group.rows.is_empty(),
            AvailableEntry::Item(_) => true,
        });
    }

    // Two-phase merge: match the prior order against the selected set,
    // then append the remainder (newly selected rows) in native order.
    let mut chosen_rows: Vec<RowView> = Vec::with_capacity(selected_rows.len());
    let mut updated_order: Vec<String> = Vec::with_capacity(selected_rows.len());

    for value in order {
        if let Some(index) = find_by_value(&selected_rows, value) {
            chosen_rows.push(selected_rows.remove(index));
            updated_order.push(value.clone());
        } else {
            tracing::trace!(
                target: targets::RECONCILE,
                value,
                "dropping order entry with no selected row"
            );
        }
    }

    for row in selected_rows {
        updated_order.push(row.value.clone());
        chosen_rows.push(row);
    }

    tracing::trace!(
        target: targets::RECONCILE,
        chosen = chosen_rows.len(),
        available = entries.len(),
        "reconciled views"
    );

    Reconciled {
        available: AvailableView {
            header: available_header,
            search_placeholder: settings
                .enable_search
                .then(|| settings.search_placeholder.clone()),
            show_move_buttons: settings.show_move_buttons,
            entries,
        },
        chosen: ChosenView {
            header: chosen_header,
            show_move_buttons: settings.show_move_buttons,
            show_up_down_buttons: settings.show_up_down_buttons,
            rows: chosen_rows,
        },
        order: updated_order,
    }
}
