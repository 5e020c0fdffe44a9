//! Pages
//!
//! One component per route. Dashboard pages render inside `DashboardShell`.

mod admin;
mod alerts;
mod announcements;
mod auth;
mod discussions;
mod events;
mod landing;
mod live_discussion;
mod lost_found;
mod notes;
mod overview;
mod profile;

pub use admin::{AdminOverviewPage, AdminUsersPage};
pub use alerts::AlertsPage;
pub use announcements::AnnouncementsPage;
pub use auth::{SignInPage, SignUpPage};
pub use discussions::DiscussionsPage;
pub use events::EventsPage;
pub use landing::{LandingPage, NotFoundPage};
pub use live_discussion::LiveDiscussionPage;
pub use lost_found::LostFoundPage;
pub use notes::NotesPage;
pub use overview::OverviewPage;
pub use profile::ProfilePage;
