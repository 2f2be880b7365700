//! Domain records.
//!
//! Users and tasks reference each other only through identifiers. The
//! watcher and executor associations are explicit join records, and the
//! related user collections of a task are loaded into [`TaskDetails`] by
//! dedicated queries rather than navigated implicitly.

mod relation;
mod status;
mod task;
mod user;

pub use relation::*;
pub use status::*;
pub use task::*;
pub use user::*;
