//! Localised console copy.
//!
//! The console ships Russian as its default locale and English as an
//! alternative. Only user-facing text lives here; log messages stay English.

use std::fmt;
use std::str::FromStr;

use super::course::CourseLevel;
use super::user::UserRole;

/// Supported console locales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Ru,
    En,
}

/// Error returned when a locale code is not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLocale(pub String);

impl fmt::Display for UnknownLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported locale '{}' (expected ru or en)", self.0)
    }
}

impl std::error::Error for UnknownLocale {}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" | "ru-ru" => Ok(Self::Ru),
            "en" | "en-gb" | "en-us" => Ok(Self::En),
            _ => Err(UnknownLocale(s.to_owned())),
        }
    }
}

/// Catalogue of user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    CoursesLoadFailed,
    UsersLoadFailed,
    StatsLoadFailed,
    CourseDeleteFailed,
    CourseSaveFailed,
    RoleChangeFailed,
    Retry,
    CoursesNotFound,
    UsersNotFound,
    AdjustFilters,
    ConfirmCourseDelete,
    AccessDenied,
}

impl Message {
    /// Resolve the message text for `locale`.
    pub fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Ru => self.ru(),
            Locale::En => self.en(),
        }
    }

    fn ru(self) -> &'static str {
        match self {
            Self::CoursesLoadFailed => {
                "Не удалось загрузить курсы. Проверьте подключение к интернету."
            }
            Self::UsersLoadFailed => {
                "Не удалось загрузить пользователей. Проверьте подключение к интернету."
            }
            Self::StatsLoadFailed => "Не удалось загрузить статистику",
            Self::CourseDeleteFailed => "Не удалось удалить курс",
            Self::CourseSaveFailed => "Произошла ошибка при сохранении курса",
            Self::RoleChangeFailed => "Произошла ошибка при изменении роли пользователя",
            Self::Retry => "Попробовать снова",
            Self::CoursesNotFound => "Курсы не найдены",
            Self::UsersNotFound => "Пользователи не найдены",
            Self::AdjustFilters => "Попробуйте изменить параметры поиска или фильтры",
            Self::ConfirmCourseDelete => {
                "Вы уверены, что хотите удалить этот курс? Это действие нельзя отменить."
            }
            Self::AccessDenied => "Недостаточно прав для просмотра раздела",
        }
    }

    fn en(self) -> &'static str {
        match self {
            Self::CoursesLoadFailed => "Could not load courses. Check your internet connection.",
            Self::UsersLoadFailed => "Could not load users. Check your internet connection.",
            Self::StatsLoadFailed => "Could not load statistics",
            Self::CourseDeleteFailed => "Could not delete the course",
            Self::CourseSaveFailed => "An error occurred while saving the course",
            Self::RoleChangeFailed => "An error occurred while changing the user's role",
            Self::Retry => "Try again",
            Self::CoursesNotFound => "No courses found",
            Self::UsersNotFound => "No users found",
            Self::AdjustFilters => "Try changing the search or filters",
            Self::ConfirmCourseDelete => {
                "Are you sure you want to delete this course? This cannot be undone."
            }
            Self::AccessDenied => "You are not allowed to view this section",
        }
    }
}

impl UserRole {
    /// Human-readable role name.
    pub fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Ru, Self::Admin) => "Администратор",
            (Locale::Ru, Self::Moderator) => "Модератор",
            (Locale::Ru, Self::User) => "Пользователь",
            (Locale::En, Self::Admin) => "Administrator",
            (Locale::En, Self::Moderator) => "Moderator",
            (Locale::En, Self::User) => "User",
        }
    }

    /// Short capability hint shown next to privileged roles in the picker.
    pub fn hint(self, locale: Locale) -> Option<&'static str> {
        match (locale, self) {
            (_, Self::User) => None,
            (Locale::Ru, Self::Admin) => Some("полный доступ"),
            (Locale::Ru, Self::Moderator) => Some("модерация чатов"),
            (Locale::En, Self::Admin) => Some("full access"),
            (Locale::En, Self::Moderator) => Some("chat moderation"),
        }
    }
}

impl CourseLevel {
    /// Human-readable level name.
    pub fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Ru, Self::Beginner) => "Начинающий",
            (Locale::Ru, Self::Intermediate) => "Средний",
            (Locale::Ru, Self::Advanced) => "Продвинутый",
            (Locale::En, Self::Beginner) => "Beginner",
            (Locale::En, Self::Intermediate) => "Intermediate",
            (Locale::En, Self::Advanced) => "Advanced",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ru", Locale::Ru)]
    #[case("RU-ru", Locale::Ru)]
    #[case("en", Locale::En)]
    #[case(" en-GB ", Locale::En)]
    fn parses_supported_locales(#[case] raw: &str, #[case] expected: Locale) {
        assert_eq!(raw.parse::<Locale>(), Ok(expected));
    }

    #[test]
    fn rejects_unsupported_locale() {
        assert_eq!(
            "de".parse::<Locale>(),
            Err(UnknownLocale("de".to_owned()))
        );
    }

    #[test]
    fn default_locale_is_russian() {
        assert_eq!(Locale::default(), Locale::Ru);
        assert_eq!(
            Message::CourseDeleteFailed.text(Locale::default()),
            "Не удалось удалить курс"
        );
    }

    #[rstest]
    #[case(UserRole::Admin, Locale::En, "Administrator")]
    #[case(UserRole::Moderator, Locale::Ru, "Модератор")]
    fn labels_roles(#[case] role: UserRole, #[case] locale: Locale, #[case] expected: &str) {
        assert_eq!(role.label(locale), expected);
    }

    #[test]
    fn only_privileged_roles_carry_hints() {
        assert_eq!(UserRole::User.hint(Locale::En), None);
        assert_eq!(UserRole::Admin.hint(Locale::En), Some("full access"));
    }

    #[test]
    fn labels_levels() {
        assert_eq!(CourseLevel::Advanced.label(Locale::Ru), "Продвинутый");
        assert_eq!(CourseLevel::Beginner.label(Locale::En), "Beginner");
    }
}
