//! Core traits for grade stores and their live queries.

mod live_query;
mod store;

pub use live_query::LiveQuery;
pub use store::GradeStore;
