//! Plain-text table rendering for list commands.

use tasktrack_core::{ProjectProgress, RecordId, TaskTableRow, User};

const TASK_HEADERS: &[&str] = &[
    "ID", "TITLE", "STATUS", "PRIORITY", "DUE", "PROJECT", "ASSIGNEE",
];
const PROJECT_HEADERS: &[&str] = &["ID", "NAME", "STATUS", "START", "END", "PROGRESS"];
const USER_HEADERS: &[&str] = &["ID", "USERNAME", "EMAIL", "ROLE", "REGISTERED"];

pub fn task_table(rows: &[TaskTableRow]) -> String {
    let cells = rows
        .iter()
        .map(|row| {
            vec![
                optional_id(row.id),
                row.title.clone(),
                row.status.clone(),
                row.priority.to_string(),
                row.due_date.clone(),
                optional_id(row.project_id),
                optional_id(row.assignee_id),
            ]
        })
        .collect::<Vec<_>>();
    render(TASK_HEADERS, &cells)
}

pub fn project_table(entries: &[ProjectProgress]) -> String {
    let cells = entries
        .iter()
        .map(|entry| {
            let project = &entry.project;
            vec![
                optional_id(project.id),
                project.name.clone(),
                project.status.to_string(),
                optional_date(project.start_date.as_ref()),
                optional_date(project.end_date.as_ref()),
                format!("{}%", entry.progress),
            ]
        })
        .collect::<Vec<_>>();
    render(PROJECT_HEADERS, &cells)
}

pub fn user_table(users: &[User]) -> String {
    let cells = users
        .iter()
        .map(|user| {
            vec![
                optional_id(user.id),
                user.username.clone(),
                user.email.clone(),
                user.role.to_string(),
                tasktrack_core::format_timestamp(&user.registration_date()),
            ]
        })
        .collect::<Vec<_>>();
    render(USER_HEADERS, &cells)
}

fn optional_id(id: Option<RecordId>) -> String {
    id.map(|value| value.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn optional_date(value: Option<&tasktrack_core::Timestamp>) -> String {
    value
        .map(tasktrack_core::format_timestamp)
        .unwrap_or_else(|| "-".to_string())
}

/// Left-aligned columns separated by two spaces; no trailing whitespace.
fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths = headers
        .iter()
        .map(|header| header.chars().count())
        .collect::<Vec<_>>();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_cells = headers
        .iter()
        .map(|header| header.to_string())
        .collect::<Vec<_>>();
    let mut out = String::new();
    for cells in std::iter::once(&header_cells).chain(rows) {
        let line = cells
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
