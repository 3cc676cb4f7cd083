//! Tests for the courses screen controller.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use mockall::predicate::eq;
use rstest::{fixture, rstest};
use url::Url;

use super::*;
use crate::domain::ports::{GatewayError, MockCourseGateway};
use crate::domain::{AppRoute, CourseDraft, ErrorCode, UserId, UserRole};

fn course(title: &str, level: CourseLevel) -> Course {
    let draft = CourseDraft::new(
        title,
        "Description",
        Url::parse("https://cdn.example.com/c.png").expect("image url"),
        level,
        NonZeroU32::new(30).expect("non-zero"),
        true,
    )
    .expect("valid draft");
    Course::new(CourseId::random(), draft, Utc::now())
}

#[fixture]
fn courses() -> Vec<Course> {
    vec![
        course("Course A", CourseLevel::Beginner),
        course("Other", CourseLevel::Advanced),
    ]
}

fn admin() -> Viewer {
    Viewer::new(UserId::random(), UserRole::Admin)
}

fn screen(gateway: MockCourseGateway) -> CoursesScreen<MockCourseGateway> {
    CoursesScreen::new(Arc::new(gateway), Locale::Ru)
}

fn listing(courses: Vec<Course>) -> MockCourseGateway {
    let mut gateway = MockCourseGateway::new();
    gateway
        .expect_list_courses()
        .returning(move || Ok(courses.clone()));
    gateway
}

fn titles(screen: &CoursesScreen<MockCourseGateway>) -> Vec<String> {
    screen
        .visible_courses()
        .iter()
        .map(|course| course.title().to_owned())
        .collect()
}

#[rstest]
#[case(None)]
#[case(Some(UserRole::User))]
#[case(Some(UserRole::Moderator))]
#[tokio::test]
async fn non_admins_are_redirected_without_gateway_calls(#[case] role: Option<UserRole>) {
    let mut gateway = MockCourseGateway::new();
    gateway.expect_list_courses().times(0);
    let viewer = role.map(|role| Viewer::new(UserId::random(), role));

    let mut screen = screen(gateway);
    let access = screen.open(viewer.as_ref()).await;

    assert_eq!(access, Access::Redirect(AppRoute::Home));
    assert!(screen.list().all_items().is_empty());
}

#[rstest]
#[tokio::test]
async fn search_filters_the_loaded_courses(courses: Vec<Course>) {
    let mut screen = screen(listing(courses));
    assert!(screen.open(Some(&admin())).await.is_granted());
    assert_eq!(titles(&screen), vec!["Course A", "Other"]);

    screen.set_search_term("course");
    assert_eq!(titles(&screen), vec!["Course A"]);

    screen.set_search_term("");
    screen.set_level(Some(CourseLevel::Advanced));
    assert_eq!(titles(&screen), vec!["Other"]);
}

#[rstest]
#[tokio::test]
async fn failed_reload_keeps_items_and_retry_fetches_again(courses: Vec<Course>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut gateway = MockCourseGateway::new();
    gateway.expect_list_courses().times(3).returning(move || {
        match counter.fetch_add(1, Ordering::SeqCst) {
            1 => Err(GatewayError::transport("offline")),
            _ => Ok(courses.clone()),
        }
    });

    let mut screen = screen(gateway);
    screen.open(Some(&admin())).await;
    screen.reload().await;

    assert_eq!(
        screen.error(),
        Some("Не удалось загрузить курсы. Проверьте подключение к интернету.")
    );
    assert_eq!(titles(&screen), vec!["Course A", "Other"]);

    screen.reload().await;
    assert_eq!(screen.error(), None);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[rstest]
#[tokio::test]
async fn cancelled_delete_changes_nothing(courses: Vec<Course>) {
    let target = courses[0].id();
    let mut gateway = listing(courses);
    gateway.expect_delete_course().times(0);

    let mut screen = screen(gateway);
    screen.open(Some(&admin())).await;
    screen.request_delete(target);
    screen.cancel_delete();

    assert_eq!(screen.confirm_delete().await, Ok(None));
    assert_eq!(screen.list().all_items().len(), 2);
}

#[rstest]
#[tokio::test]
async fn confirmed_delete_removes_the_course_locally(courses: Vec<Course>) {
    let target = courses[0].id();
    let mut gateway = MockCourseGateway::new();
    gateway
        .expect_list_courses()
        .times(1)
        .returning(move || Ok(courses.clone()));
    gateway
        .expect_delete_course()
        .with(eq(target))
        .times(1)
        .returning(|_| Ok(()));

    let mut screen = screen(gateway);
    screen.open(Some(&admin())).await;
    screen.request_delete(target);

    assert_eq!(screen.confirm_delete().await, Ok(Some(target)));
    assert_eq!(titles(&screen), vec!["Other"]);
    assert_eq!(screen.pending_delete(), None);
}

#[rstest]
#[tokio::test]
async fn failed_delete_stays_armed_and_keeps_the_course(courses: Vec<Course>) {
    let target = courses[1].id();
    let mut gateway = listing(courses);
    gateway
        .expect_delete_course()
        .times(1)
        .returning(|_| Err(GatewayError::forbidden("row level security")));

    let mut screen = screen(gateway);
    screen.open(Some(&admin())).await;
    screen.request_delete(target);

    let err = screen.confirm_delete().await.expect_err("delete fails");
    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(screen.error(), Some("Не удалось удалить курс"));
    assert_eq!(screen.pending_delete(), Some(&target));
    assert_eq!(screen.list().all_items().len(), 2);

    screen.dismiss_error();
    assert_eq!(screen.error(), None);
}

#[rstest]
#[tokio::test]
async fn successful_save_closes_the_form_and_refetches(courses: Vec<Course>) {
    let created = course("Fresh", CourseLevel::Intermediate);
    let mut after = vec![created.clone()];
    after.extend(courses.iter().cloned());

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut gateway = MockCourseGateway::new();
    gateway.expect_list_courses().times(2).returning(move || {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(courses.clone())
        } else {
            Ok(after.clone())
        }
    });
    let stored = created.clone();
    gateway
        .expect_create_course()
        .times(1)
        .return_once(move |_| Ok(stored));

    let mut screen = screen(gateway);
    screen.open(Some(&admin())).await;
    screen.open_create_form();
    let form = screen.form_mut().expect("form open");
    form.input_mut().title = "Fresh".to_owned();
    form.input_mut().description = "Description".to_owned();
    form.input_mut().image_url = "https://cdn.example.com/c.png".to_owned();

    let saved = screen.submit_form().await.expect("saved");
    assert_eq!(saved.id(), created.id());
    assert!(screen.form().is_none());
    assert_eq!(titles(&screen), vec!["Fresh", "Course A", "Other"]);
}

#[rstest]
#[tokio::test]
async fn failed_save_keeps_the_form_open(courses: Vec<Course>) {
    let target = courses[0].id();
    let mut gateway = listing(courses);
    gateway
        .expect_update_course()
        .times(1)
        .returning(|_, _| Err(GatewayError::rejected("title must be unique")));

    let mut screen = screen(gateway);
    screen.open(Some(&admin())).await;
    screen.open_edit_form(&target).expect("course loaded");
    if let Some(form) = screen.form_mut() {
        form.input_mut().title = "Other".to_owned();
    }

    assert!(screen.submit_form().await.is_err());
    let form = screen.form().expect("form still open");
    assert_eq!(form.input().title, "Other");
    assert_eq!(form.error(), Some("title must be unique"));
}

#[rstest]
#[tokio::test]
async fn editing_an_unknown_course_is_not_found(courses: Vec<Course>) {
    let mut screen = screen(listing(courses));
    screen.open(Some(&admin())).await;

    let err = screen
        .open_edit_form(&CourseId::random())
        .expect_err("unknown id");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(screen.submit_form().await.err(), Some(FormError::Closed));
}
