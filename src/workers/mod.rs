//! Background tasks that drive the collaborators and report back as events.

pub mod core;
pub mod decision;
pub mod reminder;
