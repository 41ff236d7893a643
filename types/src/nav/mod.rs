//! Navigation types: view names, navigation states, and the history stack.
//!
//! Pure data types with no IO. The engine owns a `NavigationStack`; the
//! presentation layer reads `current()` and `breadcrumbs()` from it.

mod breadcrumbs;
mod stack;
mod state;
mod view;

pub use breadcrumbs::{Breadcrumb, Breadcrumbs};
pub use stack::{NavOutcome, NavigationStack};
pub use state::{NavParams, NavigationState};
pub use view::ViewName;
