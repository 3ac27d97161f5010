//! Session plan tree (Plan → Day → Screen → Slot) and its scoped updater.
//!
//! The tree is a read-after-write projection of the server state. After a
//! scoped mutation succeeds remotely, exactly one node's child collection is
//! patched with the entity the server returned; every branch that was not on
//! the path to that node keeps its original `Arc`, so callers can detect
//! unchanged subtrees with [`Arc::ptr_eq`].
//!
//! Parent paths are typed: each [`ParentPath`] names the kind of child it
//! holds, which makes "append a slot to a day" unrepresentable.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Identified};

// ---------------------------------------------------------------------------
// Tree nodes
// ---------------------------------------------------------------------------

/// A festival programme: an ordered list of days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(alias = "_id")]
    pub id: DbId,
    pub festival: String,
    pub year: i32,
    #[serde(default)]
    pub days: Vec<Arc<Day>>,
}

/// One festival day. Order within the plan is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    #[serde(alias = "_id")]
    pub id: DbId,
    pub day_number: i32,
    /// Display-formatted date, e.g. `"Fri, 14 Mar"`.
    pub date: String,
    #[serde(default)]
    pub screens: Vec<Arc<Screen>>,
}

/// A venue screen running on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    #[serde(alias = "_id")]
    pub id: DbId,
    pub screen_name: String,
    #[serde(default)]
    pub slots: Vec<Arc<Slot>>,
}

/// A programme slot on a screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(alias = "_id")]
    pub id: DbId,
    pub title: String,
    pub start_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Free text, or the name of a curated category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl Identified for Plan {
    fn id(&self) -> DbId {
        self.id
    }
}

impl Identified for Day {
    fn id(&self) -> DbId {
        self.id
    }
}

impl Identified for Screen {
    fn id(&self) -> DbId {
        self.id
    }
}

impl Identified for Slot {
    fn id(&self) -> DbId {
        self.id
    }
}

impl Plan {
    pub fn day(&self, day_id: DbId) -> Option<&Arc<Day>> {
        find(&self.days, day_id)
    }

    /// Copy of this plan's scalar fields with a new day list.
    fn with_days(&self, days: Vec<Arc<Day>>) -> Plan {
        Plan {
            id: self.id,
            festival: self.festival.clone(),
            year: self.year,
            days,
        }
    }
}

impl Day {
    pub fn screen(&self, screen_id: DbId) -> Option<&Arc<Screen>> {
        find(&self.screens, screen_id)
    }

    fn with_screens(&self, screens: Vec<Arc<Screen>>) -> Day {
        Day {
            id: self.id,
            day_number: self.day_number,
            date: self.date.clone(),
            screens,
        }
    }
}

impl Screen {
    pub fn slot(&self, slot_id: DbId) -> Option<&Arc<Slot>> {
        find(&self.slots, slot_id)
    }

    fn with_slots(&self, slots: Vec<Arc<Slot>>) -> Screen {
        Screen {
            id: self.id,
            screen_name: self.screen_name.clone(),
            slots,
        }
    }
}

fn find<T: Identified>(items: &[Arc<T>], id: DbId) -> Option<&Arc<T>> {
    items.iter().find(|item| item.id() == id)
}

fn position<T: Identified>(items: &[Arc<T>], id: DbId) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Clone the `Arc`s of `items`, swapping the one at `index` for `node`.
fn replace_at<T>(items: &[Arc<T>], index: usize, node: T) -> Vec<Arc<T>> {
    let mut next = items.to_vec();
    next[index] = Arc::new(node);
    next
}

// ---------------------------------------------------------------------------
// Parent paths
// ---------------------------------------------------------------------------

/// Address of a node whose child collection can be patched.
pub trait ParentPath {
    /// The kind of node held in the addressed collection.
    type Child: Identified;

    /// Whether every id on the path exists in `plan`.
    fn resolves(&self, plan: &Plan) -> bool;

    /// Rebuild the spine from the plan down to the addressed parent, giving
    /// it the children produced by `patch`. Returns an unchanged copy of
    /// `plan` when the path does not resolve.
    fn patch_children<F>(&self, plan: &Plan, patch: F) -> Plan
    where
        F: FnOnce(&[Arc<Self::Child>]) -> Vec<Arc<Self::Child>>;
}

/// The plan itself; its children are days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanRoot;

/// A day in the plan; its children are screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPath {
    pub day_id: DbId,
}

/// A screen within a day; its children are slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPath {
    pub day_id: DbId,
    pub screen_id: DbId,
}

impl ParentPath for PlanRoot {
    type Child = Day;

    fn resolves(&self, _plan: &Plan) -> bool {
        true
    }

    fn patch_children<F>(&self, plan: &Plan, patch: F) -> Plan
    where
        F: FnOnce(&[Arc<Day>]) -> Vec<Arc<Day>>,
    {
        plan.with_days(patch(&plan.days))
    }
}

impl ParentPath for DayPath {
    type Child = Screen;

    fn resolves(&self, plan: &Plan) -> bool {
        plan.day(self.day_id).is_some()
    }

    fn patch_children<F>(&self, plan: &Plan, patch: F) -> Plan
    where
        F: FnOnce(&[Arc<Screen>]) -> Vec<Arc<Screen>>,
    {
        let Some(index) = position(&plan.days, self.day_id) else {
            return plan.clone();
        };
        let day = &plan.days[index];
        let next_day = day.with_screens(patch(&day.screens));
        plan.with_days(replace_at(&plan.days, index, next_day))
    }
}

impl ParentPath for ScreenPath {
    type Child = Slot;

    fn resolves(&self, plan: &Plan) -> bool {
        plan.day(self.day_id)
            .and_then(|day| day.screen(self.screen_id))
            .is_some()
    }

    fn patch_children<F>(&self, plan: &Plan, patch: F) -> Plan
    where
        F: FnOnce(&[Arc<Slot>]) -> Vec<Arc<Slot>>,
    {
        if !self.resolves(plan) {
            return plan.clone();
        }
        let screen_id = self.screen_id;
        let day = DayPath {
            day_id: self.day_id,
        };
        day.patch_children(plan, move |screens| {
            match position(screens, screen_id) {
                Some(index) => {
                    let screen = &screens[index];
                    let next_screen = screen.with_slots(patch(&screen.slots));
                    replace_at(screens, index, next_screen)
                }
                None => screens.to_vec(),
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Scoped updates
// ---------------------------------------------------------------------------

/// Append `child` to the collection addressed by `path`.
///
/// A path that does not resolve leaves the plan unchanged.
pub fn add_child<P: ParentPath>(plan: &Plan, path: &P, child: P::Child) -> Plan {
    path.patch_children(plan, move |children| {
        let mut next = children.to_vec();
        next.push(Arc::new(child));
        next
    })
}

/// Replace the child whose id is `child_id` with `updated`, keeping its
/// position.
pub fn update_child<P: ParentPath>(
    plan: &Plan,
    path: &P,
    child_id: DbId,
    updated: P::Child,
) -> Plan {
    path.patch_children(plan, move |children| {
        let mut updated = Some(updated);
        children
            .iter()
            .map(|child| {
                if child.id() == child_id {
                    if let Some(node) = updated.take() {
                        return Arc::new(node);
                    }
                }
                Arc::clone(child)
            })
            .collect()
    })
}

/// Remove the child whose id is `child_id`, together with its subtree.
pub fn remove_child<P: ParentPath>(plan: &Plan, path: &P, child_id: DbId) -> Plan {
    path.patch_children(plan, move |children| {
        children
            .iter()
            .filter(|child| child.id() != child_id)
            .cloned()
            .collect()
    })
}

/// Keep an active-day index inside `0..len` after the day list changed.
///
/// Returns 0 for an empty list.
pub fn clamp_active_index(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        index.min(len - 1)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
