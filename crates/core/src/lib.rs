//! Beach Atlas Core
//!
//! Foundational traits and error types for the Beach Atlas workspace. This
//! crate has zero dependencies on application-level code (image codecs,
//! SQLite, HTTP, etc.).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `storage` - Persistence backend trait (`KeyValueStore`) and an in-memory implementation
//! - `sanitize` - Markup escaping for user-authored notes
//!
//! ## Design Principles
//!
//! 1. **No dependencies beyond thiserror** - keeps build times minimal
//! 2. **Trait-based abstractions** - lets stores run against SQLite in the app and memory in tests
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod error;
pub mod sanitize;
pub mod storage;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Storage ────────────────────────────────────────────────────────────
pub use storage::{check_quota, entry_size, InMemoryStore, KeyValueStore};

// ── Sanitization ───────────────────────────────────────────────────────
pub use sanitize::escape_html;
