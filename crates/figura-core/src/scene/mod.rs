//! The Figura scene graph.
//!
//! A diagram is a [`Group`]: an ordered, owning collection of entities with
//! cross-references between them (a line references the two points it joins,
//! a curve references its control points, and so on). A loaded description
//! usually yields several groups wrapped in [`Scenes`], of which exactly one
//! is active at a time.
//!
//! # Overview
//!
//! - [`entity`] - The closed entity sum type and its variants
//! - [`group`] - The ordered container, draw-order policy, and update dispatch
//! - [`Scenes`] - The active-scene selector with wrap-around advance

pub mod entity;
pub mod group;

pub use entity::{
    Anchor, CubicCurve, DrawLayer, Entity, Label, Line, LineLabel, PointEntity, PointId,
    QuadraticCurve, Triangle,
};
pub use group::Group;

/// An ordered collection of [`Group`]s produced by one load, with an active
/// index.
///
/// The embedding shell calls [`Scenes::advance`] on its "next scene" signal;
/// the index wraps past the last group.
#[derive(Debug, Default)]
pub struct Scenes {
    groups: Vec<Group>,
    active: usize,
}

impl Scenes {
    /// Wraps the given groups, with the first group active.
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups, active: 0 }
    }

    /// Returns the number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if the load produced no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the index of the active group.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Returns the active group, or `None` if there are no groups.
    pub fn active(&self) -> Option<&Group> {
        self.groups.get(self.active)
    }

    /// Returns the active group mutably, or `None` if there are no groups.
    pub fn active_mut(&mut self) -> Option<&mut Group> {
        self.groups.get_mut(self.active)
    }

    /// Selects the group at `index`, if it exists.
    pub fn select(&mut self, index: usize) -> Option<&Group> {
        if index >= self.groups.len() {
            return None;
        }
        self.active = index;
        self.groups.get(index)
    }

    /// Advances to the next group, wrapping to the first after the last.
    pub fn advance(&mut self) {
        if !self.groups.is_empty() {
            self.active = (self.active + 1) % self.groups.len();
        }
    }

    /// Iterates over all groups in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }
}
