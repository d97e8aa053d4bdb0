//! Resource listings
//!
//! A small set of GitLab list endpoints expressed as page fetchers. Every
//! listing is a [`List<T>`]: a client, a path and the query fixed for the
//! whole sequence. The same three consumption idioms apply to all of them.

mod issues;
mod list;
mod options;
mod projects;

pub use issues::{Issue, IssueState, Issues};
pub use list::List;
pub use options::ListOptions;
pub use projects::{Project, Projects};

#[cfg(test)]
mod tests;
