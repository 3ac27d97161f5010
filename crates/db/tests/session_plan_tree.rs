//! Integration tests for the session plan repositories.
//!
//! Covers tree assembly, parent-scoped updates and deletes, and cascade
//! behaviour down the plan -> day -> screen -> slot hierarchy.

use festival_db::models::session_plan::{
    CreatePlanDay, CreatePlanScreen, CreateSessionPlan, SlotInput, UpdatePlanDay,
};
use festival_db::repositories::{PlanDayRepo, PlanScreenRepo, PlanSlotRepo, SessionPlanRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_plan(year: i32) -> CreateSessionPlan {
    CreateSessionPlan {
        festival: "Shortfest".to_string(),
        year,
    }
}

fn new_day(day_number: i32, date: &str) -> CreatePlanDay {
    CreatePlanDay {
        day_number,
        date: date.to_string(),
    }
}

fn new_screen(name: &str) -> CreatePlanScreen {
    CreatePlanScreen {
        screen_name: name.to_string(),
    }
}

fn new_slot(title: &str, start: &str, order: Option<i32>) -> SlotInput {
    SlotInput {
        title: title.to_string(),
        start_time: start.to_string(),
        end_time: None,
        director: Some("A. Director".to_string()),
        moderator: None,
        duration: Some("90 min".to_string()),
        category: None,
        description: None,
        order,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn load_tree_assembles_full_hierarchy(pool: PgPool) {
    let plan = SessionPlanRepo::create(&pool, &new_plan(2025)).await.unwrap();
    let fri = PlanDayRepo::create(&pool, plan.id, &new_day(1, "Fri 7 March"))
        .await
        .unwrap();
    let sat = PlanDayRepo::create(&pool, plan.id, &new_day(2, "Sat 8 March"))
        .await
        .unwrap();
    let main = PlanScreenRepo::create(&pool, sat.id, &new_screen("Main Hall"))
        .await
        .unwrap();
    PlanSlotRepo::create(&pool, main.id, &new_slot("Late show", "21:00", Some(2)))
        .await
        .unwrap();
    PlanSlotRepo::create(&pool, main.id, &new_slot("Opening", "18:00", Some(1)))
        .await
        .unwrap();

    let tree = SessionPlanRepo::load_tree(&pool, plan.id)
        .await
        .unwrap()
        .expect("plan should exist");

    assert_eq!(tree.year, 2025);
    assert_eq!(tree.days.len(), 2);
    assert_eq!(tree.days[0].id, fri.id);
    assert!(tree.days[0].screens.is_empty());
    let screen = &tree.days[1].screens[0];
    assert_eq!(screen.screen_name, "Main Hall");
    let titles: Vec<&str> = screen.slots.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Opening", "Late show"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn load_tree_missing_plan_is_none(pool: PgPool) {
    let tree = SessionPlanRepo::load_tree(&pool, 9999).await.unwrap();
    assert!(tree.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_festival_year_rejected(pool: PgPool) {
    SessionPlanRepo::create(&pool, &new_plan(2025)).await.unwrap();
    let err = SessionPlanRepo::create(&pool, &new_plan(2025))
        .await
        .unwrap_err();

    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.constraint(), Some("uq_session_plans_festival_year"));
}

#[sqlx::test(migrations = "./migrations")]
async fn day_update_is_scoped_to_its_plan(pool: PgPool) {
    let plan_a = SessionPlanRepo::create(&pool, &new_plan(2024)).await.unwrap();
    let plan_b = SessionPlanRepo::create(&pool, &new_plan(2025)).await.unwrap();
    let day = PlanDayRepo::create(&pool, plan_a.id, &new_day(1, "Fri"))
        .await
        .unwrap();

    let update = UpdatePlanDay {
        day_number: None,
        date: Some("Friday".to_string()),
    };
    let wrong_parent = PlanDayRepo::update(&pool, plan_b.id, day.id, &update)
        .await
        .unwrap();
    assert!(wrong_parent.is_none());

    let updated = PlanDayRepo::update(&pool, plan_a.id, day.id, &update)
        .await
        .unwrap()
        .expect("day should be updated");
    assert_eq!(updated.date_label, "Friday");
    assert_eq!(updated.day_number, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn slot_update_replaces_all_fields(pool: PgPool) {
    let plan = SessionPlanRepo::create(&pool, &new_plan(2025)).await.unwrap();
    let day = PlanDayRepo::create(&pool, plan.id, &new_day(1, "Fri"))
        .await
        .unwrap();
    let screen = PlanScreenRepo::create(&pool, day.id, &new_screen("Studio"))
        .await
        .unwrap();
    let slot = PlanSlotRepo::create(&pool, screen.id, &new_slot("Shorts 1", "10:00", None))
        .await
        .unwrap();

    let mut input = new_slot("Shorts One", "10:30", Some(1));
    input.director = None;
    let updated = PlanSlotRepo::update(&pool, screen.id, slot.id, &input)
        .await
        .unwrap()
        .expect("slot should be updated");

    assert_eq!(updated.id, slot.id);
    assert_eq!(updated.title, "Shorts One");
    assert_eq!(updated.start_time, "10:30");
    assert_eq!(updated.director, None);
    assert_eq!(updated.order, Some(1));
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_day_cascades_to_screens_and_slots(pool: PgPool) {
    let plan = SessionPlanRepo::create(&pool, &new_plan(2025)).await.unwrap();
    let day = PlanDayRepo::create(&pool, plan.id, &new_day(1, "Fri"))
        .await
        .unwrap();
    let screen = PlanScreenRepo::create(&pool, day.id, &new_screen("Main"))
        .await
        .unwrap();
    PlanSlotRepo::create(&pool, screen.id, &new_slot("Opening", "18:00", None))
        .await
        .unwrap();

    assert!(PlanDayRepo::delete(&pool, plan.id, day.id).await.unwrap());
    assert!(!PlanDayRepo::delete(&pool, plan.id, day.id).await.unwrap());

    let screens = PlanScreenRepo::list_by_days(&pool, &[day.id]).await.unwrap();
    assert!(screens.is_empty());
    let slots = PlanSlotRepo::list_by_screens(&pool, &[screen.id])
        .await
        .unwrap();
    assert!(slots.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn slot_delete_requires_matching_screen(pool: PgPool) {
    let plan = SessionPlanRepo::create(&pool, &new_plan(2025)).await.unwrap();
    let day = PlanDayRepo::create(&pool, plan.id, &new_day(1, "Fri"))
        .await
        .unwrap();
    let a = PlanScreenRepo::create(&pool, day.id, &new_screen("A")).await.unwrap();
    let b = PlanScreenRepo::create(&pool, day.id, &new_screen("B")).await.unwrap();
    let slot = PlanSlotRepo::create(&pool, a.id, &new_slot("Doc block", "14:00", None))
        .await
        .unwrap();

    assert!(!PlanSlotRepo::delete(&pool, b.id, slot.id).await.unwrap());
    assert!(PlanSlotRepo::delete(&pool, a.id, slot.id).await.unwrap());
}
