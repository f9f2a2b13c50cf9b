pub mod add;
pub mod delete;
pub mod r#do;
pub mod list;
pub mod pile;
pub mod stats;
pub mod upcoming;
