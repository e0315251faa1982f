//! # Borehole Potential
//!
//! Layered geology models and extraction-limit estimation for fields of
//! borehole heat exchangers.
//!
//! Given a stratified subsurface, a borehole geometry and a minimum allowed
//! borehole temperature, this crate estimates the largest annual energy that
//! a single borehole can extract. Thermal simulations are delegated to an
//! external finite-element solver or an external borehole-design tool, both
//! reached through narrow traits.
//!
//! ## Crate layout
//!
//! - [`models`]: Extraction-limit estimation, the solver adapters, and batch
//!   orchestration over many geologies and borehole configurations.
//! - [`support`]: Geology and borehole data model, numeric constraints and
//!   unit extensions used by the models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.

pub mod models;
pub mod support;
