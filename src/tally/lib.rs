//! # Tally Architecture
//!
//! Tally is a **UI-agnostic inventory-tracking library**. The CLI binary is
//! its first client, not its reason to exist: everything from the API facade
//! inward takes plain Rust arguments, returns plain Rust types, and never
//! touches stdout, stderr, or the process exit code.
//!
//! ## The Layers
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs + args.rs)                                   │
//! │  - Parses arguments, renders lists, maps errors to exit 1  │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  API Facade (api.rs)                                       │
//! │  - InventoryApi<S>: dispatches to commands, owns the view  │
//! │    list / search text / filtered view, refreshes after     │
//! │    every mutation                                          │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                             │
//! │  - One read-decide-write transaction per user intent       │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                    │
//! │  - DocumentStore trait over a keyed document collection    │
//! │  - HttpStore (production), MemoryStore (testing)           │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Mutation Protocol
//!
//! Quantities move in steps of one. An increment on an absent name creates
//! the record at 1; a decrement at 1 deletes the record, so no stored record
//! ever has quantity zero. Every mutation ends with a full re-fetch of the
//! collection — the view list is replaced wholesale, never patched, and after
//! a failed call it simply keeps its last known good state.
//!
//! The read-then-write pair is **not atomic** by default: two clients racing
//! on one name can lose an update. `WritePolicy::Checked` is the explicit
//! opt-in that routes mutations through the store's conditional writes
//! instead. See `commands::WritePolicy`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade — entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: The `Item` record
//! - [`config`]: Store connection settings (CLI concern, not used by the core)
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
