//! Grant-matrix authorization engine for the HR intranet.
//!
//! This crate provides the unified permission model for the intranet. It
//! defines the core authorization types (Resource, Role, Grant) and the pure
//! decision functions the rest of the application calls to gate its pages
//! and routes.
//!
//! # Architecture Overview
//!
//! Authorization is a resource × CRUD-action matrix, one grant map per role:
//!
//! 1. **Catalogs** (the `catalog` crate) declare every protected resource
//!    and every role, with per-role default grants
//! 2. **Store** (the `store` crate) persists one grant map per role,
//!    seeding defaults on first access
//! 3. **Engine** (this crate) normalizes grant changes and answers point
//!    permission queries
//! 4. **Decision** is made: a page affordance is rendered or withheld
//!
//! # Design Principles
//!
//! - **Pure functions**: the engine holds no state; every decision is a
//!   deterministic function of the map it is given
//! - **Fail closed**: unknown resources, actions, or roles always read as
//!   denied, never as an error or panic, because these paths gate UI
//!   rendering and must not crash unrelated pages
//! - **Write implies read**: the cascade rule (any write permission implies
//!   read) holds for every map the engine produces, not just eventually
//! - **System role is immutable**: enforced here, at the mutating entry
//!   point, so every caller is protected and not just the editor UI

pub mod engine;
pub mod types;

pub use engine::{can, classify_access_level, grants_of, normalize_toggle, AccessLevel};
pub use types::{Action, Grant, PermissionMap, Resource, Role};
