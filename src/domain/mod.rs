// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs and traits that define the core concepts of
// the system. No Burn types, no file I/O, no ML code here —
// this layer defines what things ARE, not how they work, which
// keeps it trivially unit-testable.

// A single sentence extracted from a document
pub mod sentence;

// Core abstractions (traits) that other layers implement
pub mod traits;
