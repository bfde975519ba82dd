// directory/src/lib.rs

//! The list/filter/search state pattern shared by every directory page and
//! admin screen.
//!
//! A page mounts, its [`EntityListStore`] loads the full collection from the
//! gateway, and [`filter`] derives the visible subset from the search term
//! and facets. Admin writes go through [`CrudCommands`], which reconcile the
//! store locally after the gateway confirms the write, so no refetch is
//! needed and a failed write never touches local state.

pub mod commands;
pub mod contact;
pub mod context;
pub mod dashboard;
pub mod entity;
pub mod fallback;
pub mod filter;
pub mod forms;
pub mod notify;
pub mod resolve;
pub mod store;

pub use commands::CrudCommands;
pub use contact::{ContactInbox, StatusCounts};
pub use context::{AppContext, Theme};
pub use dashboard::{dashboard, DashboardStats};
pub use entity::{facets_from_pairs, DirectoryEntity};
pub use filter::{filter, Facet, FilterQuery};
pub use forms::{is_valid_email, split_list, DoctorForm, HospitalForm, LabForm, ListingForm, ShopForm};
pub use notify::{Level, Notification, NotificationLog, Notifier, TracingNotifier};
pub use store::{EntityListStore, LoadMode, LoadOutcome};
