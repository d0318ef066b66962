use dioxus::prelude::*;

use store::Role;
use ui::{NoticeProvider, QueryProvider, SessionProvider};
use views::{
    Home, Login, PageNotFound, ParentDashboard, ParentMessages, PortalShell, Register,
    StudentDashboard, StudentMessages, TeacherDashboard, TeacherMessages,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(PortalShell)]
        #[route("/")]
        Home {},
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[nest("/student")]
            #[route("/")]
            StudentDashboard {},
            #[route("/messages")]
            StudentMessages {},
        #[end_nest]
        #[nest("/parent")]
            #[route("/")]
            ParentDashboard {},
            #[route("/messages")]
            ParentMessages {},
        #[end_nest]
        #[nest("/teacher")]
            #[route("/")]
            TeacherDashboard {},
            #[route("/messages")]
            TeacherMessages {},
        #[end_nest]
    #[end_layout]
    #[route("/:..segments")]
    PageNotFound { segments: Vec<String> },
}

impl Route {
    /// The role a page belongs to; `None` for public pages.
    fn required_role(&self) -> Option<Role> {
        match self {
            Route::StudentDashboard {} | Route::StudentMessages {} => Some(Role::Student),
            Route::ParentDashboard {} | Route::ParentMessages {} => Some(Role::Parent),
            Route::TeacherDashboard {} | Route::TeacherMessages {} => Some(Role::Teacher),
            Route::Home {} | Route::Login {} | Route::Register {} | Route::PageNotFound { .. } => None,
        }
    }

    fn dashboard_for(role: Role) -> Route {
        match role {
            Role::Student => Route::StudentDashboard {},
            Role::Parent => Route::ParentDashboard {},
            Role::Teacher => Route::TeacherDashboard {},
        }
    }

    fn messages_for(role: Role) -> Route {
        match role {
            Role::Student => Route::StudentMessages {},
            Role::Parent => Route::ParentMessages {},
            Role::Teacher => Route::TeacherMessages {},
        }
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            NoticeProvider {
                QueryProvider {
                    Router::<Route> {}
                }
            }
        }
    }
}
