//! Document synchronization: archive commits and working-copy rotation.
//!
//! ## Overview
//!
//! A fleet of externally-authored Google Docs is synchronized into two
//! destinations: a GitHub repository acting as a version-controlled archive
//! (documents are committed once, and only when they carry reviewer
//! comments), and a relational store tracking a bounded history of working
//! copies per document.
//!
//! ## Module Map
//!
//! ```text
//! ┌──────────┐   HTTP   ┌─────────────────────────────────────────────────┐
//! │ External │ ───────> │  server.rs  (axum Router, ServerConfig)         │
//! │ caller   │ <─────── │    └─ api.rs  (route handlers, AppState)        │
//! └──────────┘          │         │                                       │
//!                       │         │ ArchiveSyncer::sync_batch()           │
//!                       │         │ CopyRotator::rotate_batch()           │
//!                       │         v                                       │
//!                       │  orchestrator.rs  (per-batch control flow)      │
//!                       │     │         │            │                    │
//!                       │     v         v            v                    │
//!                       │  archive.rs  drive.rs   store.rs                │
//!                       │  (GitHub)    (Google)   (PostgREST)             │
//!                       └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Supporting Modules
//!
//! | Module     | Responsibility                                           |
//! |------------|----------------------------------------------------------|
//! | `models`   | Shared types: `DocDescriptor`, `CommittedDoc`, …         |
//! | `rotation` | Pure bounded-history rotation (`rotate`)                 |
//! | `gate`     | Archive-worthiness rule (`is_archivable`)                |
//!
//! Every external collaborator sits behind a trait (`Archive`,
//! `DocumentCopier`, `DocRenderer`, `CopyStore`) so the orchestrators are
//! testable with substitute implementations.

pub mod archive;
pub mod drive;
pub mod gate;
pub mod models;
pub mod orchestrator;
pub mod rotation;
pub mod store;
