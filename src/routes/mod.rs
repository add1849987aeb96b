//! HTTP route modules for the dashboard service.
//!
//! Each module exposes one screen area's controller as JSON:
//! - `dashboard`: summary stats and manual refresh
//! - `orders`: orders list, detail, status updates and deletion
//! - `create_order`: create-order form editing and submission
//! - `settings`: connection settings panel
//! - `feedback`: toasts, activity log and status indicators
//! - `reports`: report generation

pub mod create_order;
pub mod dashboard;
pub mod feedback;
pub mod orders;
pub mod reports;
pub mod settings;
