//! Sample dashboard content.
//!
//! Grades, attendance, behaviour notes, achievements and message threads are not
//! served by the backend yet; the dashboards render these fixed records.

use store::{Inbox, Message, Role, Thread};

#[derive(Clone, Debug, PartialEq)]
pub struct Grade {
    pub subject: &'static str,
    pub score: f64,
    pub letter: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BehaviourNote {
    pub date: &'static str,
    pub teacher: &'static str,
    pub note: &'static str,
    pub positive: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Achievement {
    pub title: &'static str,
    pub category: &'static str,
    pub date: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassSummary {
    pub name: &'static str,
    pub students: u32,
    pub average: f64,
}

pub fn grades() -> Vec<Grade> {
    vec![
        Grade { subject: "Mathematics", score: 88.0, letter: "B+" },
        Grade { subject: "English", score: 92.0, letter: "A-" },
        Grade { subject: "Science", score: 79.0, letter: "C+" },
        Grade { subject: "History", score: 85.0, letter: "B" },
        Grade { subject: "Art", score: 96.0, letter: "A" },
    ]
}

/// Monthly attendance in percent.
pub fn attendance() -> Vec<(String, f64)> {
    [("Sep", 98.0), ("Oct", 95.0), ("Nov", 91.0), ("Dec", 97.0), ("Jan", 94.0)]
        .into_iter()
        .map(|(month, pct)| (month.to_string(), pct))
        .collect()
}

pub fn attendance_rate() -> f64 {
    let months = attendance();
    if months.is_empty() {
        return 0.0;
    }
    months.iter().map(|(_, pct)| pct).sum::<f64>() / months.len() as f64
}

pub fn grade_points() -> Vec<(String, f64)> {
    grades()
        .into_iter()
        .map(|g| (g.subject.to_string(), g.score))
        .collect()
}

pub fn behaviour_notes() -> Vec<BehaviourNote> {
    vec![
        BehaviourNote {
            date: "Jan 12",
            teacher: "Mr. Adeyemi",
            note: "Helped a classmate finish the lab write-up.",
            positive: true,
        },
        BehaviourNote {
            date: "Jan 08",
            teacher: "Ms. Park",
            note: "Late to class twice this week.",
            positive: false,
        },
        BehaviourNote {
            date: "Dec 15",
            teacher: "Mrs. Chen",
            note: "Led the group presentation with confidence.",
            positive: true,
        },
    ]
}

pub fn achievements() -> Vec<Achievement> {
    vec![
        Achievement { title: "Honor Roll", category: "Academic", date: "Dec 2025" },
        Achievement { title: "Regional Track Finalist", category: "Sports", date: "Nov 2025" },
        Achievement { title: "Perfect Attendance", category: "Attendance", date: "Oct 2025" },
        Achievement { title: "Student Council Secretary", category: "Leadership", date: "Sep 2025" },
        Achievement { title: "Coding Club Badge", category: "Clubs", date: "Sep 2025" },
    ]
}

pub fn classes() -> Vec<ClassSummary> {
    vec![
        ClassSummary { name: "Grade 6 Science", students: 28, average: 81.5 },
        ClassSummary { name: "Grade 7 Science", students: 31, average: 77.0 },
        ClassSummary { name: "Grade 8 Physics", students: 24, average: 84.2 },
    ]
}

fn message(from_me: bool, body: &str, sent_at: &str) -> Message {
    Message {
        from_me,
        body: body.to_string(),
        sent_at: sent_at.to_string(),
    }
}

/// Conversations shown on `role`'s messages page.
pub fn inbox(role: Role) -> Inbox {
    let threads = match role {
        Role::Student => vec![
            Thread {
                id: 1,
                contact: "Mr. Adeyemi".into(),
                contact_role: Role::Teacher,
                subject: "Science fair project".into(),
                unread: 2,
                messages: vec![
                    message(true, "Can our group use the lab on Thursday?", "09:10"),
                    message(false, "Yes, after 2pm. Bring your safety goggles.", "10:02"),
                    message(false, "Projects are due Friday.", "10:03"),
                ],
            },
            Thread {
                id: 2,
                contact: "Ms. Park".into(),
                contact_role: Role::Teacher,
                subject: "Essay feedback".into(),
                unread: 0,
                messages: vec![message(false, "Great structure, work on the conclusion.", "Mon")],
            },
        ],
        Role::Parent => vec![
            Thread {
                id: 1,
                contact: "Mrs. Chen".into(),
                contact_role: Role::Teacher,
                subject: "Field trip permission".into(),
                unread: 1,
                messages: vec![message(false, "Please sign the permission slip by Wednesday.", "08:30")],
            },
            Thread {
                id: 2,
                contact: "Mr. Adeyemi".into(),
                contact_role: Role::Teacher,
                subject: "Progress in science".into(),
                unread: 0,
                messages: vec![
                    message(true, "How is Tobi doing in science this term?", "Tue"),
                    message(false, "Steady improvement, especially in lab work.", "Tue"),
                ],
            },
        ],
        Role::Teacher => vec![
            Thread {
                id: 1,
                contact: "Grace Obi".into(),
                contact_role: Role::Parent,
                subject: "Parent-teacher meeting".into(),
                unread: 1,
                messages: vec![message(false, "Could we meet next Tuesday afternoon?", "11:45")],
            },
            Thread {
                id: 2,
                contact: "Ada Obi".into(),
                contact_role: Role::Student,
                subject: "Lab booking".into(),
                unread: 0,
                messages: vec![message(true, "Thursday after 2pm is free.", "10:02")],
            },
        ],
    };
    Inbox::new(threads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::scale_bars;

    #[test]
    fn test_sample_charts_are_drawable() {
        assert!(scale_bars(&attendance(), Some(100.0)).is_ok());
        assert!(scale_bars(&grade_points(), Some(100.0)).is_ok());
    }

    #[test]
    fn test_attendance_rate_is_the_mean() {
        assert!((attendance_rate() - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_every_role_has_threads() {
        for role in Role::ALL {
            assert!(!inbox(role).threads().is_empty());
        }
    }
}
