//! Plain-text rendering for console screens.
//!
//! Everything here is a pure function of domain values and a locale so the
//! command runner can write the output wherever it likes.

use chrono::{DateTime, Utc};

use crate::domain::{AppRoute, Course, DashboardStats, Locale, Message, User};

const SHORT_ID_CHARS: usize = 8;

/// Render a timestamp in the console's `dd.mm.yyyy` date format.
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%d.%m.%Y").to_string()
}

/// First eight characters of an identifier followed by an ellipsis.
pub fn short_id(id: &str) -> String {
    let prefix: String = id.chars().take(SHORT_ID_CHARS).collect();
    format!("{prefix}...")
}

/// Upper-cased first character of a username, shown when no avatar is set.
pub fn avatar_initial(username: &str) -> String {
    username
        .trim()
        .chars()
        .next()
        .map(|initial| initial.to_uppercase().collect())
        .unwrap_or_default()
}

/// Error banner with the manual retry hint.
pub fn banner(message: &str, locale: Locale) -> String {
    format!("! {message} [{}]", Message::Retry.text(locale))
}

/// Placeholder shown when the filter leaves nothing visible.
pub fn empty_view(not_found: Message, locale: Locale) -> String {
    format!(
        "{}\n{}",
        not_found.text(locale),
        Message::AdjustFilters.text(locale)
    )
}

pub fn courses_table(courses: &[&Course], locale: Locale) -> String {
    let headers = match locale {
        Locale::Ru => ["ID", "Название", "Уровень", "Дней", "Активен", "Создан"],
        Locale::En => ["ID", "Title", "Level", "Days", "Active", "Created"],
    };
    let rows = courses
        .iter()
        .map(|course| {
            let draft = course.draft();
            vec![
                course.id().to_string(),
                course.title().to_owned(),
                course.level().label(locale).to_owned(),
                draft.duration_days().to_string(),
                yes_no(draft.is_active(), locale).to_owned(),
                format_date(course.created_at()),
            ]
        })
        .collect();
    table(&headers, rows)
}

pub fn users_table(users: &[&User], locale: Locale) -> String {
    let headers = match locale {
        Locale::Ru => ["", "ID", "Имя", "Email", "Роль", "Регистрация"],
        Locale::En => ["", "ID", "Username", "Email", "Role", "Registered"],
    };
    let rows = users
        .iter()
        .map(|user| {
            let avatar = match user.avatar_url() {
                Some(_) => "@".to_owned(),
                None => avatar_initial(user.username()),
            };
            vec![
                avatar,
                short_id(&user.id().to_string()),
                user.username().to_owned(),
                user.email().to_owned(),
                user.role().label(locale).to_owned(),
                format_date(user.created_at()),
            ]
        })
        .collect();
    table(&headers, rows)
}

/// Stat cards followed by the dashboard quick links.
pub fn dashboard(stats: DashboardStats, links: &[AppRoute], locale: Locale) -> String {
    let labels = match locale {
        Locale::Ru => ["Пользователи", "Курсы", "Сообщения", "На модерации"],
        Locale::En => ["Users", "Courses", "Messages", "Pending moderation"],
    };
    let values = [
        stats.users,
        stats.courses,
        stats.messages,
        stats.pending_messages,
    ];
    let rows = labels
        .iter()
        .zip(values)
        .map(|(label, value)| vec![(*label).to_owned(), value.to_string()])
        .collect();
    let mut out = table(&["", ""], rows);
    for link in links {
        out.push_str(&format!("-> {link}\n"));
    }
    out
}

/// Confirmation prompt shown before a delete is sent.
pub fn delete_prompt(course: &Course, locale: Locale) -> String {
    format!(
        "{}\n  {} ({})",
        Message::ConfirmCourseDelete.text(locale),
        course.title(),
        course.id()
    )
}

fn yes_no(value: bool, locale: Locale) -> &'static str {
    match (locale, value) {
        (Locale::Ru, true) => "да",
        (Locale::Ru, false) => "нет",
        (Locale::En, true) => "yes",
        (Locale::En, false) => "no",
    }
}

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(|header| (*header).to_owned()).collect();
    if header_cells.iter().any(|cell| !cell.is_empty()) {
        push_row(&mut out, &header_cells, &widths);
    }
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let padding = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
