//! Core engine for Aula: record store, cross-role rules and the session.
//!
//! This crate has no UI dependencies and no async runtime. A [`Session`] owns
//! everything and is driven through [`Session::dispatch`].

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod action;
mod commands;
mod resolver;
mod seed;
mod session;
mod store;
mod sync;

pub use action::{Action, DispatchOutcome};
pub use commands::{Command, CommandSpec, command_help, command_specs};
pub use resolver::{NotificationResolver, Resolution};
pub use seed::{Seed, SeedError};
pub use session::Session;
pub use store::{NOW_LABEL, RecordStore, ResourceLocation, StoreError, StoreSnapshot};
pub use sync::SyncBus;

// Re-export the domain types the public API is written in.
pub use aula_types::{
    Announcement, Breadcrumb, Breadcrumbs, ChatId, ChatSender, ChatThread, Course, Identity,
    NavOutcome, NavParams, NavigationSettings, NavigationStack, NavigationState, Notification,
    NotificationId, Role, SyncSettings, ViewName,
};
