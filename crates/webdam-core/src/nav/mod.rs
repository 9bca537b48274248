//! Folder navigation.
//!
//! [`breadcrumb::BreadcrumbTrail`] is the immutable trail the host keeps
//! between round-trips; [`navigator::Navigator`] reconciles it against the
//! folder that was just activated and fetches what to display.

pub mod breadcrumb;
pub mod navigator;
