use chrono::{Duration, NaiveDate};
use tasktrack_core::{
    Priority, Project, ProjectStatus, Role, Task, TaskStatus, Timestamp, User, ValidationError,
};

fn at(year: i32, month: u32, day: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[test]
fn task_new_sets_defaults_and_trims() {
    let task = Task::new("  Launch  ", "  go  ", 1, None, Some(1), None).unwrap();

    assert_eq!(task.id, None);
    assert_eq!(task.title, "Launch");
    assert_eq!(task.description, "go");
    assert_eq!(task.priority.value(), 1);
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.project_id, Some(1));
    assert_eq!(task.assignee_id, None);
}

#[test]
fn task_new_rejects_blank_title_and_bad_priority() {
    assert_eq!(
        Task::new("   ", "", 2, None, None, None).unwrap_err(),
        ValidationError::EmptyField { field: "title" }
    );
    for priority in [0, 4, -1] {
        assert_eq!(
            Task::new("ok", "", priority, None, None, None).unwrap_err(),
            ValidationError::InvalidPriority(priority)
        );
    }
}

#[test]
fn task_update_status_validates_and_allows_free_transitions() {
    let mut task = Task::new("ship", "", 2, None, None, None).unwrap();

    task.update_status("completed").unwrap();
    assert_eq!(task.status, TaskStatus::Completed);
    task.update_status("pending").unwrap();
    assert_eq!(task.status, TaskStatus::Pending);

    let err = task.update_status("done").unwrap_err();
    assert_eq!(err, ValidationError::InvalidTaskStatus("done".to_string()));
    assert_eq!(task.status, TaskStatus::Pending);
}

#[test]
fn task_overdue_requires_past_due_date_and_open_status() {
    let now = at(2025, 6, 1);
    let mut task = Task::new("file taxes", "", 1, Some(at(2025, 5, 1)), None, None).unwrap();
    assert!(task.is_overdue_at(now));

    task.update_status("in_progress").unwrap();
    assert!(task.is_overdue_at(now));

    task.update_status("completed").unwrap();
    assert!(!task.is_overdue_at(now));

    let due_now = Task::new("same instant", "", 1, Some(now), None, None).unwrap();
    assert!(!due_now.is_overdue_at(now));

    let undated = Task::new("someday", "", 3, None, None, None).unwrap();
    assert!(!undated.is_overdue_at(now));
}

#[test]
fn task_is_overdue_uses_current_time() {
    let yesterday = tasktrack_core::model::timestamp::now() - Duration::days(1);
    let task = Task::new("late", "", 2, Some(yesterday), None, None).unwrap();
    assert!(task.is_overdue());

    let tomorrow = tasktrack_core::model::timestamp::now() + Duration::days(1);
    let task = Task::new("early", "", 2, Some(tomorrow), None, None).unwrap();
    assert!(!task.is_overdue());
}

#[test]
fn task_to_record_renders_iso_dates_and_nulls() {
    let mut task = Task::new("Launch", "", 3, Some(at(2025, 1, 2)), None, Some(7)).unwrap();
    task.id = Some(5);

    let record = task.to_record();
    assert_eq!(record["id"], 5);
    assert_eq!(record["title"], "Launch");
    assert_eq!(record["priority"], 3);
    assert_eq!(record["status"], "pending");
    assert_eq!(record["due_date"], "2025-01-02T12:00:00");
    assert!(record["project_id"].is_null());
    assert_eq!(record["assignee_id"], 7);

    let undated = Task::new("x", "", 1, None, None, None).unwrap().to_record();
    assert!(undated["id"].is_null());
    assert!(undated["due_date"].is_null());
}

#[test]
fn priority_serde_rejects_out_of_range_values() {
    let priority: Priority = serde_json::from_value(serde_json::json!(2)).unwrap();
    assert_eq!(priority, Priority::DEFAULT);
    assert!(serde_json::from_value::<Priority>(serde_json::json!(9)).is_err());
}

#[test]
fn task_serializes_with_wire_names() {
    let task = Task::new("Launch", "", 1, Some(at(2025, 1, 2)), None, None).unwrap();
    let value = serde_json::to_value(&task).unwrap();
    assert_eq!(value["title"], "Launch");
    assert_eq!(value["priority"], 1);
    assert_eq!(value["status"], "pending");
    assert_eq!(value["due_date"], "2025-01-02T12:00:00");
    assert!(value["id"].is_null());
}

#[test]
fn project_new_starts_active_and_rejects_blank_name() {
    let project = Project::new("Apollo", "", None, None).unwrap();
    assert_eq!(project.status, ProjectStatus::Active);
    assert_eq!(project.id, None);

    assert_eq!(
        Project::new(" ", "", None, None).unwrap_err(),
        ValidationError::EmptyField { field: "name" }
    );
}

#[test]
fn project_progress_is_coarse() {
    let now = at(2025, 6, 1);
    let mut project = Project::new("Apollo", "", None, Some(at(2025, 7, 1))).unwrap();
    assert_eq!(project.progress_at(now), 0);

    project.update_status("on_hold").unwrap();
    assert_eq!(project.progress_at(now), 50);
    assert_eq!(project.progress_at(at(2026, 1, 1)), 50);

    project.update_status("completed").unwrap();
    assert_eq!(project.progress_at(now), 100);

    project.update_status("active").unwrap();
    assert_eq!(project.progress_at(at(2025, 8, 1)), 100);

    let err = project.update_status("archived").unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidProjectStatus("archived".to_string())
    );
}

#[test]
fn project_to_record_keeps_null_dates() {
    let project = Project::new("Apollo", "moon", Some(at(2025, 1, 1)), None).unwrap();
    let record = project.to_record();
    assert_eq!(record["start_date"], "2025-01-01T12:00:00");
    assert!(record["end_date"].is_null());
    assert_eq!(record["status"], "active");
}

#[test]
fn user_rejects_unknown_roles() {
    for role in ["guest", "Admin", "", "owner"] {
        let err = User::new("ada", "ada@example.com", role).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRole(_)), "role {role}");
    }
}

#[test]
fn user_rejects_malformed_email() {
    for email in ["ada.example.com", "ada@", "ada@example", "ada@example.c", "@example.com"] {
        let err = User::new("ada", email, "developer").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidEmail(_)), "email {email}");
    }
}

#[test]
fn user_new_records_registration_date() {
    let before = tasktrack_core::model::timestamp::now();
    let user = User::new(" ada ", " ada@example.com ", "admin").unwrap();
    let after = tasktrack_core::model::timestamp::now();

    assert_eq!(user.username, "ada");
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.role, Role::Admin);
    assert!(user.registration_date() >= before && user.registration_date() <= after);
}

#[test]
fn user_update_info_is_all_or_nothing() {
    let mut user = User::new("ada", "ada@example.com", "developer").unwrap();
    let registered = user.registration_date();

    let err = user
        .update_info(Some("grace"), Some("not-an-email"), None)
        .unwrap_err();
    assert!(matches!(err, ValidationError::InvalidEmail(_)));
    assert_eq!(user.username, "ada");

    user.update_info(Some("grace"), None, Some("manager"))
        .unwrap();
    assert_eq!(user.username, "grace");
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.role, Role::Manager);
    assert_eq!(user.registration_date(), registered);
}

#[test]
fn user_to_record_uses_iso_registration_date() {
    let user = User::new("ada", "ada@example.com", "admin").unwrap();
    let record = user.to_record();
    let text = record["registration_date"].as_str().unwrap();
    assert_eq!(
        tasktrack_core::parse_timestamp("registration_date", text).unwrap(),
        user.registration_date()
    );
    assert_eq!(record["role"], "admin");
}
