//! Extraction-limit models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Model structure
//!
//! Every thermal evaluation is exposed as a [`twine_core::Model`] that maps an
//! annual extraction energy to the observed borehole temperature. The
//! estimators and searches in [`geothermal`] only see that seam, so a
//! finite-element simulation, an external design tool or a test stub can be
//! swapped freely.
//!
//! Adapters to external programs are thin: they translate the crate's typed
//! inputs into the external program's vocabulary and parse its outputs back.
//! The numerics that decide the extraction limit live on this side.

pub mod geothermal;
