//! Core library for the VMS marine-supplies site.
//!
//! Contains the hero configuration model and its normalize/merge rules, the
//! configuration store, upload validation and naming, the admin editor
//! session, public view state (hero carousel, card rotators, lead form), the
//! demo login gate, and change notifications. This crate depends on
//! `vms-storage` for the document backend trait and knows nothing about HTTP.

pub mod auth;
pub mod editor;
pub mod error;
pub mod hero;
pub mod lead;
pub mod notify;
pub mod site;
pub mod store;
pub mod upload;
