//! # Piley Core Library
//!
//! Task management around *piles*: named stacks of tasks with a completion
//! ordering policy, optional task limits, reminders and recurring tasks.
//!
//! ## Core Modules
//!
//! - [`models`]: Core data structures and transfer objects
//! - [`stats`]: Weekly completion histograms and pile summaries
//! - [`upcoming`]: Selection of the soonest pending reminders
//! - [`ordering`]: User-defined pile ordering
//! - [`policy`]: Pile limits and FIFO/LIFO completion rules
//! - [`recurrence`]: Reminder scheduling for recurring tasks
//! - [`timezone`]: Timezone utilities and validation
//! - [`db`]: Database connection and migration management
//! - [`repository`]: Data access layer with Repository pattern
//! - [`error`]: Error types
//!
//! The statistics functions are pure: callers load piles through a
//! repository and re-run them whenever the data changes.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use piley_core::{
//!     db, models::NewTaskData,
//!     repository::{PileRepository, PreferenceRepository, SqliteRepository, TaskRepository},
//!     ordering::resolve_pile_order, upcoming::select_upcoming_tasks,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = db::establish_connection("piley.db").await?;
//!     let repo = SqliteRepository::new(pool);
//!
//!     repo.add_task(NewTaskData {
//!         title: "Water the plants".to_string(),
//!         reminder: Some(Utc::now()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//!     let piles = repo.find_piles_with_tasks().await?;
//!     for pile in resolve_pile_order(&piles, &repo.pile_order().await?) {
//!         println!("{}: {} tasks", pile.pile.name, pile.tasks.len());
//!     }
//!     for upcoming in select_upcoming_tasks(&piles) {
//!         println!("{} ({})", upcoming.task.title, upcoming.pile_name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
pub mod models;
pub mod ordering;
pub mod policy;
pub mod recurrence;
pub mod repository;
pub mod stats;
pub mod timezone;
pub mod upcoming;
