//! Discrete-time update engine for a simple integrate-and-fire neuron unit
//!
//! This crate implements the per-timestep state of a single leaky
//! integrate-and-fire unit as embedded in a larger discrete-event
//! simulator: the exact-integration recurrence with threshold detection and
//! reset, the ring buffers that collect asynchronously arriving spike and
//! current contributions by delivery offset, and the transactional
//! get/set-status protocol that guards against partially-applied
//! configuration. Network topology, weight/delay resolution, and multi-unit
//! scheduling belong to the host kernel.

#![deny(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod archive;
pub mod buffer;
pub mod error;
pub mod event;
pub mod neuron;
pub mod recorder;
pub mod status;

// Re-export essential types
pub use archive::SpikeArchive;
pub use buffer::RingBuffer;
pub use error::{Result, UnitError};
pub use event::{
    CurrentInput, RecordingFrame, RecordingRequest, ReceptorType, SliceHost, SliceRecorder,
    SpikeInput,
};
pub use neuron::{IafNeuron, IafParams, IafState};
pub use recorder::{DataLogger, Recordable, RecordablesMap};
pub use status::{keys, StatusDict};

/// Simulation resolution assumed until the host calibrates the unit (ms)
pub const DEFAULT_RESOLUTION_MS: f64 = 1.0;
