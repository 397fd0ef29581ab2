//! Mapping store
//!
//! Accumulates raw signal to logical role assignments for one calibration
//! session, kept apart by signal kind.

use std::collections::BTreeMap;

use super::roles::LogicalRole;
use super::signal::{AxisDirection, RawSignal};

/// Raw signal → logical role assignments.
///
/// Entries are only ever inserted or overwritten, never removed. Each group
/// is ordered by ascending index so serialized output is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingStore {
    buttons: BTreeMap<u32, LogicalRole>,
    axis_pos: BTreeMap<u32, LogicalRole>,
    axis_neg: BTreeMap<u32, LogicalRole>,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn group(&self, signal: &RawSignal) -> &BTreeMap<u32, LogicalRole> {
        match signal {
            RawSignal::Button(_) => &self.buttons,
            RawSignal::Axis(_, AxisDirection::Positive) => &self.axis_pos,
            RawSignal::Axis(_, AxisDirection::Negative) => &self.axis_neg,
        }
    }

    fn group_mut(&mut self, signal: &RawSignal) -> &mut BTreeMap<u32, LogicalRole> {
        match signal {
            RawSignal::Button(_) => &mut self.buttons,
            RawSignal::Axis(_, AxisDirection::Positive) => &mut self.axis_pos,
            RawSignal::Axis(_, AxisDirection::Negative) => &mut self.axis_neg,
        }
    }

    /// Map `signal` to `role`, replacing any earlier role for that signal.
    ///
    /// Returns the role previously assigned to the signal. `Unknown` is never
    /// stored; assigning it leaves the store untouched and returns `None`.
    pub fn assign(&mut self, signal: RawSignal, role: LogicalRole) -> Option<LogicalRole> {
        if role == LogicalRole::Unknown {
            log::warn!("Refusing to map {} to UNKNOWN", signal);
            return None;
        }
        self.group_mut(&signal).insert(signal.index(), role)
    }

    /// Role currently assigned to `signal`.
    pub fn get(&self, signal: RawSignal) -> Option<LogicalRole> {
        self.group(&signal).get(&signal.index()).copied()
    }

    pub fn len(&self) -> usize {
        self.buttons.len() + self.axis_pos.len() + self.axis_neg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries: buttons, then positive axes, then negative axes, each in
    /// ascending index order.
    pub fn entries(&self) -> impl Iterator<Item = (RawSignal, LogicalRole)> + Clone + '_ {
        let buttons = self
            .buttons
            .iter()
            .map(|(&index, &role)| (RawSignal::Button(index), role));
        let pos = self
            .axis_pos
            .iter()
            .map(|(&index, &role)| (RawSignal::Axis(index, AxisDirection::Positive), role));
        let neg = self
            .axis_neg
            .iter()
            .map(|(&index, &role)| (RawSignal::Axis(index, AxisDirection::Negative), role));
        buttons.chain(pos).chain(neg)
    }

    /// One textual record per entry, in [`entries`](Self::entries) order.
    ///
    /// The iterator borrows the store and can be cloned to restart it.
    pub fn serialize_lines(&self) -> impl Iterator<Item = String> + Clone + '_ {
        self.entries().map(|(signal, role)| {
            format!("{} {} {}", signal.record_kind(), signal.index(), role.ordinal())
        })
    }
}
