//! Process-local store implementing every repository trait
//!
//! Backs `STORAGE_BACKEND=memory` and the service-level tests. It keeps the
//! same guarantees as PostgreSQL: one reaction per (user, target) under
//! concurrent toggles, point-in-time stats per call, and listing order by
//! `created_at` descending with insertion order breaking ties.

mod store;

pub use store::InMemoryStore;
