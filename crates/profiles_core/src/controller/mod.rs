//! UI-facing application controller.
//!
//! # Responsibility
//! - Own the state renderers draw from: lists, loading flags, search query,
//!   modal state and the notification queue.
//! - Sequence service calls and reconcile their envelopes into that state.
//!
//! # Invariants
//! - After any successful mutation the full list is reloaded from the
//!   service, never patched locally.
//! - Every failed command yields exactly one error notification.

pub mod app_controller;
pub mod notification;

pub use app_controller::{ActiveForm, AppController, ControllerState, DeletePrompt};
pub use notification::{Notification, NotificationKind, NotificationQueue};
