//! Host control model.
//!
//! [`HostSelect`] is a read/write projection of the native multi-choice
//! control being enhanced: its options in native order, its option
//! groups, and a durable string attribute store that survives
//! reconciliation passes (the selection order, the enhancement guard and
//! each option's intrinsic-disabled marker live there).
//!
//! The host is the single source of truth for selection state. It emits
//! a [`changed`](HostSelect::changed) signal whenever the effective
//! selection set changes, matching the semantics generic "value changed"
//! listeners expect from a native selection control.

use std::collections::HashMap;

use picklist_core::Signal;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for an option group.
    pub struct GroupId;
}

/// Durable attribute holding the serialized selection order (JSON array).
pub(crate) const ATTR_SELECTED_ORDER: &str = "selected-order";
/// Durable attribute marking the control as already enhanced.
pub(crate) const ATTR_ENHANCED: &str = "picklist";
/// Durable per-option attribute recording the disabled state at init.
pub(crate) const ATTR_ORIGIN_DISABLED: &str = "origin-disabled";

/// A labeled cluster of options, rendered only in the available view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    /// The group's display label.
    pub label: String,
}

impl OptionGroup {
    /// Creates a new group with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// One selectable unit of the host control.
///
/// `disabled` is the *effective* disabled state (intrinsic or
/// limit-induced); the intrinsic state at init time is preserved
/// separately in the option's durable attributes.
#[derive(Debug, Clone)]
pub struct SelectOption {
    value: String,
    label: String,
    selected: bool,
    disabled: bool,
    group: Option<GroupId>,
    /// Durable per-option attributes, surviving reconciliations.
    attributes: HashMap<String, String>,
}

impl SelectOption {
    /// Creates an enabled, unselected option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected: false,
            disabled: false,
            group: None,
            attributes: HashMap::new(),
        }
    }

    /// Builder: marks the option as selected.
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Builder: marks the option as disabled.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Builder: places the option in a group.
    pub fn with_group(mut self, group: GroupId) -> Self {
        self.group = Some(group);
        self
    }

    /// The option's stable value identifier.
    ///
    /// Values should be unique; ordering lookups treat them as such
    /// (first match wins when they are not).
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The option's display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the option is currently selected.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Sets the selected flag.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// The current effective disabled state.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Sets the effective disabled state.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// The group this option belongs to, if any.
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    /// Reads a durable per-option attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Writes a durable per-option attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }
}

/// The host multi-choice control being enhanced.
///
/// Owns the option list (index = native position, the stable identity
/// used for addressing), the group table, and control-level durable
/// attributes.
pub struct HostSelect {
    options: Vec<SelectOption>,
    groups: SlotMap<GroupId, OptionGroup>,
    /// Whether the control allows multiple selection. Enhancement
    /// silently refuses single-choice controls.
    multiple: bool,
    attributes: HashMap<String, String>,
    /// Emitted whenever the effective selection set changes, exactly
    /// once per effective toggle.
    pub changed: Signal<()>,
}

impl HostSelect {
    /// Creates an empty multi-choice control.
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            groups: SlotMap::with_key(),
            multiple: true,
            attributes: HashMap::new(),
            changed: Signal::new(),
        }
    }

    /// Creates a single-choice control.
    ///
    /// Enhancement refuses these; the constructor exists so callers can
    /// model the host faithfully.
    pub fn new_single() -> Self {
        Self {
            multiple: false,
            ..Self::new()
        }
    }

    /// Whether the control allows multiple selection.
    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// Registers an option group and returns its ID.
    pub fn add_group(&mut self, group: OptionGroup) -> GroupId {
        self.groups.insert(group)
    }

    /// Looks up a group by ID.
    pub fn group(&self, id: GroupId) -> Option<&OptionGroup> {
        self.groups.get(id)
    }

    /// Appends an option at the end of the native order.
    ///
    /// Returns the option's position.
    pub fn add_option(&mut self, option: SelectOption) -> usize {
        self.options.push(option);
        self.options.len() - 1
    }

    /// The options in native order.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Mutable access to the options in native order.
    ///
    /// External mutation of the option set must be followed by a
    /// reconciliation pass (`Picklist::refresh`).
    pub fn options_mut(&mut self) -> &mut [SelectOption] {
        &mut self.options
    }

    /// The option at the given native position.
    pub fn option(&self, position: usize) -> Option<&SelectOption> {
        self.options.get(position)
    }

    /// Mutable access to the option at the given native position.
    pub fn option_mut(&mut self, position: usize) -> Option<&mut SelectOption> {
        self.options.get_mut(position)
    }

    /// Removes the option at the given position, shifting later options.
    pub fn remove_option(&mut self, position: usize) -> Option<SelectOption> {
        if position < self.options.len() {
            Some(self.options.remove(position))
        } else {
            None
        }
    }

    /// The number of options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the control has no options.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// The number of currently selected options.
    pub fn selected_count(&self) -> usize {
        self.options.iter().filter(|o| o.is_selected()).count()
    }

    /// Reads a durable control-level attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Writes a durable control-level attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Removes a durable control-level attribute.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }
}

impl Default for HostSelect {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HostSelect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostSelect")
            .field("options", &self.options.len())
            .field("groups", &self.groups.len())
            .field("multiple", &self.multiple)
            .field("attributes", &self.attributes)
            .finish()
    }
}
