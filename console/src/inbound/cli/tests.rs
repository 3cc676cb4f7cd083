//! Tests for the command-line adapter.

use std::num::NonZeroU32;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use clap::Parser;
use rstest::{fixture, rstest};
use url::Url;

use super::*;
use crate::domain::ports::{FixtureCourseGateway, FixtureUserGateway, GatewayError};
use crate::domain::{Course, CourseDraft, DashboardStats, User};

const COURSE_ID: &str = "0b7c8e0e-4f55-4d62-9d6e-0f4c3c5a6b7d";
const USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// All three ports behind one value, as the REST adapter provides them.
struct Backstage {
    courses: FixtureCourseGateway,
    users: FixtureUserGateway,
    stats: Option<DashboardStats>,
}

#[async_trait]
impl CourseGateway for Backstage {
    async fn list_courses(&self) -> Result<Vec<Course>, GatewayError> {
        self.courses.list_courses().await
    }

    async fn create_course(&self, draft: &CourseDraft) -> Result<Course, GatewayError> {
        self.courses.create_course(draft).await
    }

    async fn update_course(
        &self,
        id: &CourseId,
        draft: &CourseDraft,
    ) -> Result<Course, GatewayError> {
        self.courses.update_course(id, draft).await
    }

    async fn delete_course(&self, id: &CourseId) -> Result<(), GatewayError> {
        self.courses.delete_course(id).await
    }
}

#[async_trait]
impl UserGateway for Backstage {
    async fn list_users(&self) -> Result<Vec<User>, GatewayError> {
        self.users.list_users().await
    }

    async fn update_user_role(&self, id: &UserId, role: UserRole) -> Result<(), GatewayError> {
        self.users.update_user_role(id, role).await
    }
}

#[async_trait]
impl StatsGateway for Backstage {
    async fn aggregate_stats(&self) -> Result<DashboardStats, GatewayError> {
        self.stats
            .ok_or_else(|| GatewayError::transport("connection refused"))
    }
}

fn created(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn course(id: &str, title: &str, level: CourseLevel, day: u32) -> Course {
    let draft = CourseDraft::new(
        title,
        "Hands-on course",
        Url::parse("https://cdn.example.com/cover.png").expect("url"),
        level,
        NonZeroU32::new(14).expect("non-zero"),
        true,
    )
    .expect("draft");
    Course::new(CourseId::new(id).expect("id"), draft, created(day))
}

#[fixture]
fn backstage() -> Arc<Backstage> {
    let courses = vec![
        course(COURSE_ID, "Async Rust", CourseLevel::Advanced, 4),
        course(
            "5d1c2a9e-0c1b-4b5e-8f4a-2e6f7a8b9c0d",
            "Rust basics",
            CourseLevel::Beginner,
            2,
        ),
    ];
    let user = User::try_new(
        UserId::new(USER_ID).expect("id"),
        "grace",
        "grace@example.com",
        UserRole::User,
        created(1),
    )
    .expect("user");
    Arc::new(Backstage {
        courses: FixtureCourseGateway::default().with_courses(courses),
        users: FixtureUserGateway::new(vec![user]),
        stats: Some(DashboardStats {
            users: 12,
            courses: 2,
            messages: 40,
            pending_messages: 1,
        }),
    })
}

fn admin() -> Viewer {
    Viewer::new(UserId::random(), UserRole::Admin)
}

async fn execute(
    args: &[&str],
    gateway: Arc<Backstage>,
    viewer: Option<&Viewer>,
) -> (Result<(), CliError>, String) {
    let cli = Cli::try_parse_from(std::iter::once("admin-console").chain(args.iter().copied()))
        .expect("arguments parse");
    let mut out = Vec::new();
    let result = run(cli, gateway, viewer, Locale::En, &mut out).await;
    (result, String::from_utf8(out).expect("utf-8 output"))
}

#[rstest]
#[tokio::test]
async fn lists_courses_matching_the_filters(backstage: Arc<Backstage>) {
    let (result, out) = execute(
        &["courses", "list", "--search", "RUST", "--level", "beginner"],
        backstage,
        Some(&admin()),
    )
    .await;

    result.expect("command succeeds");
    assert!(out.contains("Rust basics"), "output was {out}");
    assert!(!out.contains("Async Rust"), "output was {out}");
}

#[rstest]
#[tokio::test]
async fn empty_filter_result_shows_the_placeholder(backstage: Arc<Backstage>) {
    let (result, out) = execute(
        &["courses", "list", "--search", "haskell"],
        backstage,
        Some(&admin()),
    )
    .await;

    result.expect("command succeeds");
    assert_eq!(out, "No courses found\nTry changing the search or filters\n");
}

#[rstest]
#[tokio::test]
async fn missing_viewer_is_denied(backstage: Arc<Backstage>) {
    let (result, out) = execute(&["users", "list"], backstage, None).await;

    assert!(matches!(
        result,
        Err(CliError::AccessDenied {
            route: AppRoute::Home
        })
    ));
    assert_eq!(out, "You are not allowed to view this section\n-> /\n");
}

#[rstest]
#[tokio::test]
async fn delete_without_yes_only_prompts(backstage: Arc<Backstage>) {
    let (result, out) = execute(
        &["courses", "delete", COURSE_ID],
        Arc::clone(&backstage),
        Some(&admin()),
    )
    .await;

    result.expect("prompt only");
    assert!(out.contains("Async Rust"));
    assert!(out.ends_with("re-run with --yes to delete\n"));
    let remaining = backstage.list_courses().await.expect("list");
    assert_eq!(remaining.len(), 2);
}

#[rstest]
#[tokio::test]
async fn delete_with_yes_removes_the_course(backstage: Arc<Backstage>) {
    let (result, out) = execute(
        &["courses", "delete", COURSE_ID, "--yes"],
        Arc::clone(&backstage),
        Some(&admin()),
    )
    .await;

    result.expect("delete succeeds");
    assert!(out.ends_with(&format!("deleted {COURSE_ID}\n")));
    let remaining = backstage.list_courses().await.expect("list");
    assert_eq!(remaining.len(), 1);
}

#[rstest]
#[tokio::test]
async fn invalid_duration_is_reported_without_saving(backstage: Arc<Backstage>) {
    let (result, _) = execute(
        &[
            "courses",
            "create",
            "--title",
            "Macros",
            "--description",
            "Declarative and procedural",
            "--image-url",
            "https://cdn.example.com/macros.png",
            "--duration",
            "0",
        ],
        Arc::clone(&backstage),
        Some(&admin()),
    )
    .await;

    assert!(matches!(result, Err(CliError::Form(FormError::Invalid(_)))));
    let stored = backstage.list_courses().await.expect("list");
    assert_eq!(stored.len(), 2);
}

#[rstest]
#[tokio::test]
async fn update_keeps_fields_that_were_not_given(backstage: Arc<Backstage>) {
    let (result, out) = execute(
        &["courses", "update", COURSE_ID, "--title", "Async Rust II", "--inactive"],
        Arc::clone(&backstage),
        Some(&admin()),
    )
    .await;

    result.expect("update succeeds");
    assert_eq!(out, format!("updated {COURSE_ID} Async Rust II\n"));
    let stored = backstage.list_courses().await.expect("list");
    let updated = stored
        .iter()
        .find(|course| course.id().to_string() == COURSE_ID)
        .expect("course kept");
    assert_eq!(updated.level(), CourseLevel::Advanced);
    assert!(!updated.draft().is_active());
}

#[rstest]
#[tokio::test]
async fn set_role_shows_the_hint_and_stores_the_role(backstage: Arc<Backstage>) {
    let (result, out) = execute(
        &["users", "set-role", USER_ID, "moderator"],
        Arc::clone(&backstage),
        Some(&admin()),
    )
    .await;

    result.expect("role change succeeds");
    assert_eq!(
        out,
        format!("Moderator: chat moderation\n{USER_ID} -> moderator\n")
    );
    let users = backstage.list_users().await.expect("list");
    assert_eq!(users[0].role(), UserRole::Moderator);
}

#[rstest]
#[tokio::test]
async fn unchanged_role_sends_nothing(backstage: Arc<Backstage>) {
    let (result, out) = execute(
        &["users", "set-role", USER_ID, "user"],
        backstage,
        Some(&admin()),
    )
    .await;

    result.expect("no-op succeeds");
    assert_eq!(out, format!("{USER_ID} already has role user\n"));
}

#[rstest]
#[tokio::test]
async fn upper_case_user_ids_find_the_loaded_user(backstage: Arc<Backstage>) {
    let shouted = USER_ID.to_uppercase();
    let (result, out) = execute(
        &["users", "set-role", &shouted, "admin"],
        Arc::clone(&backstage),
        Some(&admin()),
    )
    .await;

    result.expect("role change succeeds");
    assert!(out.ends_with(&format!("{USER_ID} -> admin\n")), "got {out}");
    let users = backstage.list_users().await.expect("list");
    assert_eq!(users[0].role(), UserRole::Admin);
}

#[tokio::test]
async fn dashboard_failure_prints_the_banner() {
    let failing = Arc::new(Backstage {
        stats: None,
        courses: FixtureCourseGateway::default(),
        users: FixtureUserGateway::default(),
    });

    let (result, out) = execute(&["dashboard"], failing, Some(&admin())).await;

    assert!(matches!(result, Err(CliError::LoadFailed { .. })));
    assert_eq!(out, "! Could not load statistics [Try again]\n");
}

#[rstest]
#[tokio::test]
async fn dashboard_renders_counters(backstage: Arc<Backstage>) {
    let (result, out) = execute(&["dashboard"], backstage, Some(&admin())).await;

    result.expect("dashboard loads");
    assert!(out.contains("Users               12"), "output was {out}");
    assert!(out.contains("-> /admin/courses"));
}

#[rstest]
#[case(&["courses", "list", "--level", "expert"])]
#[case(&["courses", "delete", "not-a-uuid"])]
#[case(&["users", "set-role", USER_ID, "owner"])]
#[case(&["courses", "update", COURSE_ID, "--active", "--inactive"])]
fn malformed_arguments_are_rejected_by_the_parser(#[case] args: &[&str]) {
    let parsed = Cli::try_parse_from(std::iter::once("admin-console").chain(args.iter().copied()));
    assert!(parsed.is_err());
}

#[test]
fn only_transient_failures_are_retryable() {
    assert!(
        CliError::LoadFailed {
            message: "down".to_owned()
        }
        .is_retryable()
    );
    assert!(CliError::Domain(Error::from(GatewayError::timeout("30s"))).is_retryable());
    assert!(!CliError::Domain(Error::not_found("course")).is_retryable());
    assert!(!CliError::Form(FormError::Closed).is_retryable());
}
