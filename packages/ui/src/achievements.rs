use dioxus::prelude::*;
use store::AchievementCategory;

use crate::icons::{FaAward, FaBookOpen, FaCalendarCheck, FaFlag, FaPalette, FaTrophy};
use crate::Icon;

/// How an achievement category is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AchievementStyle {
    pub label: &'static str,
    pub class: &'static str,
}

pub fn achievement_style(category: AchievementCategory) -> AchievementStyle {
    let class = match category {
        AchievementCategory::Academic => "achievement achievement--academic",
        AchievementCategory::Sports => "achievement achievement--sports",
        AchievementCategory::Arts => "achievement achievement--arts",
        AchievementCategory::Leadership => "achievement achievement--leadership",
        AchievementCategory::Attendance => "achievement achievement--attendance",
        AchievementCategory::Other => "achievement achievement--other",
    };
    AchievementStyle {
        label: category.label(),
        class,
    }
}

#[component]
pub fn AchievementBadge(title: String, category: String, date: String) -> Element {
    let category = AchievementCategory::from_label(&category);
    let style = achievement_style(category);

    rsx! {
        div {
            class: style.class,
            span {
                class: "achievement-icon",
                match category {
                    AchievementCategory::Academic => rsx! { Icon { icon: FaBookOpen, width: 18, height: 18 } },
                    AchievementCategory::Sports => rsx! { Icon { icon: FaTrophy, width: 18, height: 18 } },
                    AchievementCategory::Arts => rsx! { Icon { icon: FaPalette, width: 18, height: 18 } },
                    AchievementCategory::Leadership => rsx! { Icon { icon: FaFlag, width: 18, height: 18 } },
                    AchievementCategory::Attendance => rsx! { Icon { icon: FaCalendarCheck, width: 18, height: 18 } },
                    AchievementCategory::Other => rsx! { Icon { icon: FaAward, width: 18, height: 18 } },
                }
            }
            div {
                class: "achievement-body",
                strong { "{title}" }
                span { class: "achievement-meta", "{style.label} · {date}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_uses_default_style() {
        let style = achievement_style(AchievementCategory::from_label("Robotics club"));
        assert_eq!(style.class, "achievement achievement--other");
        assert_eq!(style, achievement_style(AchievementCategory::Other));
    }

    #[test]
    fn test_known_category_style() {
        let style = achievement_style(AchievementCategory::from_label("sports"));
        assert_eq!(style.class, "achievement achievement--sports");
        assert_eq!(style.label, AchievementCategory::Sports.label());
    }
}
