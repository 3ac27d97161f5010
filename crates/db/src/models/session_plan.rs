//! Session plan rows and DTOs.
//!
//! Rows map one-to-one onto the four plan tables. The API never returns
//! rows directly: they are folded into the `festival_core::session_plan`
//! tree, which is what both the dashboard and the public programme page
//! consume. DTOs use camelCase to match that tree on the wire.

use std::sync::Arc;

use festival_core::session_plan::{Day, Plan, Screen, Slot};
use festival_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `session_plans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPlan {
    pub id: DbId,
    pub festival: String,
    pub year: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `plan_days` table.
#[derive(Debug, Clone, FromRow)]
pub struct PlanDay {
    pub id: DbId,
    pub plan_id: DbId,
    pub day_number: i32,
    pub date_label: String,
}

/// A row from the `plan_screens` table.
#[derive(Debug, Clone, FromRow)]
pub struct PlanScreen {
    pub id: DbId,
    pub day_id: DbId,
    pub screen_name: String,
}

/// A row from the `plan_slots` table.
#[derive(Debug, Clone, FromRow)]
pub struct PlanSlot {
    pub id: DbId,
    pub screen_id: DbId,
    pub title: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub director: Option<String>,
    pub moderator: Option<String>,
    pub duration: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionPlan {
    pub festival: String,
    pub year: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionPlan {
    pub festival: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanDay {
    pub day_number: i32,
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanDay {
    pub day_number: Option<i32>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanScreen {
    pub screen_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanScreen {
    pub screen_name: Option<String>,
}

/// Slot fields for both create and update. Slots are edited as a whole form,
/// so an update replaces every field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotInput {
    pub title: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub director: Option<String>,
    pub moderator: Option<String>,
    pub duration: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub order: Option<i32>,
}

// ---------------------------------------------------------------------------
// Row -> tree conversion
// ---------------------------------------------------------------------------

impl From<PlanSlot> for Slot {
    fn from(row: PlanSlot) -> Self {
        Slot {
            id: row.id,
            title: row.title,
            start_time: row.start_time,
            end_time: row.end_time,
            director: row.director,
            moderator: row.moderator,
            duration: row.duration,
            category: row.category,
            description: row.description,
            order: row.sort_order,
        }
    }
}

impl PlanScreen {
    /// Build a tree node, taking this screen's slots from `slots`.
    pub fn into_node(self, slots: &mut Vec<PlanSlot>) -> Screen {
        let (mine, rest): (Vec<_>, Vec<_>) =
            slots.drain(..).partition(|slot| slot.screen_id == self.id);
        *slots = rest;
        Screen {
            id: self.id,
            screen_name: self.screen_name,
            slots: mine.into_iter().map(|s| Arc::new(Slot::from(s))).collect(),
        }
    }
}

impl PlanDay {
    /// Build a tree node, taking this day's screens (and their slots).
    pub fn into_node(self, screens: &mut Vec<PlanScreen>, slots: &mut Vec<PlanSlot>) -> Day {
        let (mine, rest): (Vec<_>, Vec<_>) =
            screens.drain(..).partition(|screen| screen.day_id == self.id);
        *screens = rest;
        Day {
            id: self.id,
            day_number: self.day_number,
            date: self.date_label,
            screens: mine
                .into_iter()
                .map(|screen| Arc::new(screen.into_node(slots)))
                .collect(),
        }
    }
}

impl SessionPlan {
    /// Assemble the full tree from this plan's rows.
    ///
    /// Input order is preserved at every level, so callers control display
    /// order through their `ORDER BY`.
    pub fn into_tree(
        self,
        days: Vec<PlanDay>,
        mut screens: Vec<PlanScreen>,
        mut slots: Vec<PlanSlot>,
    ) -> Plan {
        Plan {
            id: self.id,
            festival: self.festival,
            year: self.year,
            days: days
                .into_iter()
                .map(|day| Arc::new(day.into_node(&mut screens, &mut slots)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot_row(id: DbId, screen_id: DbId) -> PlanSlot {
        PlanSlot {
            id,
            screen_id,
            title: format!("Slot {id}"),
            start_time: "12:00".to_string(),
            end_time: None,
            director: None,
            moderator: None,
            duration: None,
            category: None,
            description: None,
            sort_order: Some(id as i32),
        }
    }

    #[test]
    fn rows_fold_into_tree_in_input_order() {
        let plan = SessionPlan {
            id: 1,
            festival: "Shortfest".to_string(),
            year: 2025,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let days = vec![
            PlanDay {
                id: 11,
                plan_id: 1,
                day_number: 1,
                date_label: "Fri".to_string(),
            },
            PlanDay {
                id: 12,
                plan_id: 1,
                day_number: 2,
                date_label: "Sat".to_string(),
            },
        ];
        let screens = vec![
            PlanScreen {
                id: 21,
                day_id: 12,
                screen_name: "Main".to_string(),
            },
            PlanScreen {
                id: 22,
                day_id: 11,
                screen_name: "Main".to_string(),
            },
            PlanScreen {
                id: 23,
                day_id: 12,
                screen_name: "Studio".to_string(),
            },
        ];
        let slots = vec![slot_row(31, 21), slot_row(32, 23), slot_row(33, 21)];

        let tree = plan.into_tree(days, screens, slots);

        assert_eq!(tree.days.len(), 2);
        assert_eq!(tree.days[0].date, "Fri");
        let first: Vec<DbId> = tree.days[0].screens.iter().map(|s| s.id).collect();
        assert_eq!(first, vec![22]);
        let second: Vec<DbId> = tree.days[1].screens.iter().map(|s| s.id).collect();
        assert_eq!(second, vec![21, 23]);
        let main_slots: Vec<DbId> = tree.days[1].screens[0].slots.iter().map(|s| s.id).collect();
        assert_eq!(main_slots, vec![31, 33]);
        assert_eq!(tree.days[1].screens[0].slots[0].order, Some(31));
    }
}
