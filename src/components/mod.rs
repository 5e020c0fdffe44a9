//! UI Components
//!
//! Reusable Leptos components.

mod alert_banner;
mod dashboard_shell;
mod delete_confirm_button;
mod form_field;
mod load_status;
mod notification_bell;
mod sidebar;
pub mod toast;

pub use alert_banner::AlertBanner;
pub use dashboard_shell::{end_session, DashboardShell};
pub use delete_confirm_button::DeleteConfirmButton;
pub use form_field::{select_input, text_area, text_input};
pub use load_status::LoadStatus;
pub use notification_bell::NotificationBell;
pub use sidebar::Sidebar;
pub use toast::ToastHost;
