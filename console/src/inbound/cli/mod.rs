//! Command-line adapter driving the console screens.
//!
//! Each subcommand opens one screen, performs a single operator action, and
//! writes the rendered result. The adapter depends on the Gateway ports only,
//! so the binary decides which implementation backs them.

mod render;

use std::io::{self, Write};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::domain::ports::{CourseGateway, StatsGateway, UserGateway};
use crate::domain::{
    Access, AppRoute, CourseForm, CourseId, CourseLevel, CourseValidationError, CoursesScreen,
    DashboardScreen, Error, FormError, Locale, Message, RoleSubmit, UserId, UserRole,
    UserValidationError, UsersScreen, Viewer,
};

/// Administrative console for the learning platform.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "admin-console",
    about = "Manage courses, user roles, and platform statistics",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show platform counters and quick links.
    Dashboard,
    /// Browse and edit the course catalogue.
    Courses {
        #[command(subcommand)]
        action: CoursesCommand,
    },
    /// Browse users and change their roles.
    Users {
        #[command(subcommand)]
        action: UsersCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum CoursesCommand {
    /// List courses, newest first.
    List {
        /// Case-insensitive match against title and description.
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,
        #[arg(long, value_name = "LEVEL", value_parser = parse_level)]
        level: Option<CourseLevel>,
    },
    /// Create a course.
    Create(CreateCourseArgs),
    /// Update the editable fields of a course.
    Update(UpdateCourseArgs),
    /// Delete a course. Without `--yes` only the confirmation is shown.
    Delete {
        #[arg(value_name = "COURSE_ID", value_parser = parse_course_id)]
        id: CourseId,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct CreateCourseArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    #[arg(long = "image-url", value_name = "URL")]
    pub image_url: String,
    #[arg(long, value_name = "LEVEL", value_parser = parse_level, default_value = "beginner")]
    pub level: CourseLevel,
    /// Length in days; validated by the form.
    #[arg(long, value_name = "DAYS", default_value = "30")]
    pub duration: String,
    /// Create the course hidden from learners.
    #[arg(long)]
    pub inactive: bool,
}

#[derive(Debug, Clone, Args)]
pub struct UpdateCourseArgs {
    #[arg(value_name = "COURSE_ID", value_parser = parse_course_id)]
    pub id: CourseId,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long = "image-url", value_name = "URL")]
    pub image_url: Option<String>,
    #[arg(long, value_name = "LEVEL", value_parser = parse_level)]
    pub level: Option<CourseLevel>,
    #[arg(long, value_name = "DAYS")]
    pub duration: Option<String>,
    #[arg(long, conflicts_with = "inactive")]
    pub active: bool,
    #[arg(long)]
    pub inactive: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum UsersCommand {
    /// List users, newest first.
    List {
        /// Case-insensitive match against username and email.
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,
        #[arg(long, value_name = "ROLE", value_parser = parse_role)]
        role: Option<UserRole>,
    },
    /// Change the role of a user.
    SetRole {
        #[arg(value_name = "USER_ID", value_parser = parse_user_id)]
        id: UserId,
        #[arg(value_name = "ROLE", value_parser = parse_role)]
        role: UserRole,
    },
}

fn parse_level(raw: &str) -> Result<CourseLevel, String> {
    raw.parse().map_err(|err: CourseValidationError| err.to_string())
}

fn parse_role(raw: &str) -> Result<UserRole, String> {
    raw.parse().map_err(|err: UserValidationError| err.to_string())
}

fn parse_course_id(raw: &str) -> Result<CourseId, String> {
    CourseId::new(raw).map_err(|err| err.to_string())
}

fn parse_user_id(raw: &str) -> Result<UserId, String> {
    UserId::new(raw).map_err(|err| err.to_string())
}

/// Why a command did not complete. The rendered output has already been
/// written when one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("access denied; redirected to {route}")]
    AccessDenied { route: AppRoute },
    /// A list or stats fetch failed; the banner was printed.
    #[error("{message}")]
    LoadFailed { message: String },
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Domain(#[from] Error),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Whether running the same command again may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::LoadFailed { .. } => true,
            Self::Domain(err) => err.is_retryable(),
            Self::Form(FormError::Gateway { source, .. }) => source.is_retryable(),
            Self::AccessDenied { .. } | Self::Form(_) | Self::Io(_) => false,
        }
    }
}

/// Execute one parsed command against `gateway`, writing to `out`.
pub async fn run<G, W>(
    cli: Cli,
    gateway: Arc<G>,
    viewer: Option<&Viewer>,
    locale: Locale,
    out: &mut W,
) -> Result<(), CliError>
where
    G: CourseGateway + UserGateway + StatsGateway,
    W: Write,
{
    debug!(command = ?cli.command, "running console command");
    match cli.command {
        Command::Dashboard => dashboard(gateway, viewer, locale, out).await,
        Command::Courses { action } => courses(action, gateway, viewer, locale, out).await,
        Command::Users { action } => users(action, gateway, viewer, locale, out).await,
    }
}

fn ensure_granted(access: Access, locale: Locale, out: &mut impl Write) -> Result<(), CliError> {
    match access {
        Access::Granted => Ok(()),
        Access::Redirect(route) => {
            writeln!(out, "{}", Message::AccessDenied.text(locale))?;
            writeln!(out, "-> {route}")?;
            Err(CliError::AccessDenied { route })
        }
    }
}

fn ensure_loaded(error: Option<&str>, locale: Locale, out: &mut impl Write) -> Result<(), CliError> {
    match error {
        None => Ok(()),
        Some(message) => {
            writeln!(out, "{}", render::banner(message, locale))?;
            Err(CliError::LoadFailed {
                message: message.to_owned(),
            })
        }
    }
}

async fn dashboard<G: StatsGateway + ?Sized>(
    gateway: Arc<G>,
    viewer: Option<&Viewer>,
    locale: Locale,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut screen = DashboardScreen::new(gateway, locale);
    ensure_granted(screen.open(viewer).await, locale, out)?;
    ensure_loaded(screen.error(), locale, out)?;
    write!(
        out,
        "{}",
        render::dashboard(screen.stats(), screen.quick_links(), locale)
    )?;
    Ok(())
}

async fn courses<G: CourseGateway + ?Sized>(
    action: CoursesCommand,
    gateway: Arc<G>,
    viewer: Option<&Viewer>,
    locale: Locale,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut screen = CoursesScreen::new(gateway, locale);
    ensure_granted(screen.open(viewer).await, locale, out)?;
    ensure_loaded(screen.error(), locale, out)?;

    match action {
        CoursesCommand::List { search, level } => {
            screen.set_search_term(search.unwrap_or_default());
            screen.set_level(level);
            if screen.list().is_empty_view() {
                writeln!(out, "{}", render::empty_view(Message::CoursesNotFound, locale))?;
            } else {
                write!(
                    out,
                    "{}",
                    render::courses_table(&screen.visible_courses(), locale)
                )?;
            }
        }
        CoursesCommand::Create(args) => {
            screen.open_create_form();
            if let Some(form) = screen.form_mut() {
                fill_create(form, args);
            }
            let course = screen.submit_form().await?;
            writeln!(out, "created {} {}", course.id(), course.title())?;
        }
        CoursesCommand::Update(args) => {
            screen.open_edit_form(&args.id)?;
            if let Some(form) = screen.form_mut() {
                fill_update(form, args);
            }
            let course = screen.submit_form().await?;
            writeln!(out, "updated {} {}", course.id(), course.title())?;
        }
        CoursesCommand::Delete { id, yes } => {
            let course = screen
                .list()
                .find(&id)
                .cloned()
                .ok_or_else(|| Error::not_found(format!("course {id} is not loaded")))?;
            screen.request_delete(id);
            writeln!(out, "{}", render::delete_prompt(&course, locale))?;
            if !yes {
                screen.cancel_delete();
                writeln!(out, "re-run with --yes to delete")?;
                return Ok(());
            }
            match screen.confirm_delete().await {
                Ok(Some(deleted)) => writeln!(out, "deleted {deleted}")?,
                Ok(None) => {}
                Err(err) => {
                    if let Some(banner) = screen.error() {
                        writeln!(out, "{}", render::banner(banner, locale))?;
                    }
                    return Err(err.into());
                }
            }
        }
    }
    Ok(())
}

fn fill_create(form: &mut CourseForm, args: CreateCourseArgs) {
    let input = form.input_mut();
    input.title = args.title;
    input.description = args.description;
    input.image_url = args.image_url;
    input.level = args.level;
    input.duration_days = args.duration;
    input.is_active = !args.inactive;
}

fn fill_update(form: &mut CourseForm, args: UpdateCourseArgs) {
    let input = form.input_mut();
    if let Some(title) = args.title {
        input.title = title;
    }
    if let Some(description) = args.description {
        input.description = description;
    }
    if let Some(image_url) = args.image_url {
        input.image_url = image_url;
    }
    if let Some(level) = args.level {
        input.level = level;
    }
    if let Some(duration) = args.duration {
        input.duration_days = duration;
    }
    if args.active {
        input.is_active = true;
    } else if args.inactive {
        input.is_active = false;
    }
}

async fn users<G: UserGateway + ?Sized>(
    action: UsersCommand,
    gateway: Arc<G>,
    viewer: Option<&Viewer>,
    locale: Locale,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut screen = UsersScreen::new(gateway, locale);
    ensure_granted(screen.open(viewer).await, locale, out)?;
    ensure_loaded(screen.error(), locale, out)?;

    match action {
        UsersCommand::List { search, role } => {
            screen.set_search_term(search.unwrap_or_default());
            screen.set_role_filter(role);
            if screen.list().is_empty_view() {
                writeln!(out, "{}", render::empty_view(Message::UsersNotFound, locale))?;
            } else {
                write!(out, "{}", render::users_table(&screen.visible_users(), locale))?;
            }
        }
        UsersCommand::SetRole { id, role } => {
            screen.open_role_form(&id)?;
            if let Some(hint) = role.hint(locale) {
                writeln!(out, "{}: {hint}", role.label(locale))?;
            }
            screen.select_role(role);
            match screen.submit_role_form().await? {
                RoleSubmit::Updated(role) => writeln!(out, "{id} -> {role}")?,
                RoleSubmit::Unchanged => writeln!(out, "{id} already has role {role}")?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
