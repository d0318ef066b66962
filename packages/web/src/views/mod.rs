mod shell;
pub use shell::PortalShell;

mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod messages;

mod student;
pub use student::{StudentDashboard, StudentMessages};

mod parent;
pub use parent::{ParentDashboard, ParentMessages};

mod teacher;
pub use teacher::{TeacherDashboard, TeacherMessages};

mod not_found;
pub use not_found::PageNotFound;
