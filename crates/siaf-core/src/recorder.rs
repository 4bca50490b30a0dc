//! Recordable-quantity registry and per-unit data logger
//!
//! The recordables map is an explicitly constructed table from quantity name
//! to read accessor, owned by the unit type; nothing here relies on global
//! initialization order. The data logger buffers one frame per recorded step
//! for each connected recording collaborator and replies to collection
//! requests with the accumulated batch.

use crate::error::{Result, UnitError};
use crate::event::{RecordingFrame, RecordingRequest};
use crate::neuron::IafNeuron;

/// Read accessor for a single recordable quantity
pub type ReadAccessor = fn(&IafNeuron) -> f64;

/// A named quantity exposed for sampling by a recording collaborator
#[derive(Debug, Clone, Copy)]
pub struct Recordable {
    /// Quantity name as it appears in the status dictionary
    pub name: &'static str,
    /// Accessor reading the quantity off the unit
    pub read: ReadAccessor,
}

/// Table of recordable quantities exposed by a unit type
#[derive(Debug, Clone, Default)]
pub struct RecordablesMap {
    entries: Vec<Recordable>,
}

impl RecordablesMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a recordable quantity
    pub fn insert(&mut self, name: &'static str, read: ReadAccessor) {
        self.entries.push(Recordable { name, read });
    }

    /// Look up a recordable by name
    pub fn get(&self, name: &str) -> Option<&Recordable> {
        self.entries.iter().find(|r| r.name == name)
    }

    /// Names of all registered quantities
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|r| r.name.to_string()).collect()
    }

    /// Number of registered quantities
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether any quantity is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One connected recording collaborator
#[derive(Debug, Clone)]
struct Connection {
    targets: Vec<Recordable>,
    frames: Vec<RecordingFrame>,
}

/// Per-unit logger buffering recorded frames for connected collaborators
#[derive(Debug, Clone, Default)]
pub struct DataLogger {
    connections: Vec<Connection>,
    initialized: bool,
}

impl DataLogger {
    /// Create a logger with no connections
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect a recording collaborator
    ///
    /// Resolves every requested name against `map`; an unknown name rejects
    /// the whole connection. Returns the logger port for later collection.
    pub fn connect(&mut self, request: &RecordingRequest, map: &RecordablesMap) -> Result<usize> {
        let mut targets = Vec::with_capacity(request.records.len());
        for name in &request.records {
            let recordable = map
                .get(name)
                .ok_or_else(|| UnitError::unknown_recordable(name.clone()))?;
            targets.push(*recordable);
        }

        self.connections.push(Connection {
            targets,
            frames: Vec::new(),
        });
        Ok(self.connections.len() - 1)
    }

    /// Prepare the logger for a run; invoked from the calibration hook
    pub fn init(&mut self) {
        self.initialized = true;
    }

    /// Drop buffered frames; invoked at buffer-initialization time
    pub fn reset(&mut self) {
        for conn in &mut self.connections {
            conn.frames.clear();
        }
        self.initialized = false;
    }

    /// Number of connected collaborators
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Targets sampled for connection `port`
    pub fn targets(&self, port: usize) -> &[Recordable] {
        &self.connections[port].targets
    }

    /// Append a recorded frame for connection `port`
    pub fn push(&mut self, port: usize, step: u64, values: Vec<f64>) {
        debug_assert!(self.initialized, "logger recorded before calibration");
        self.connections[port].frames.push(RecordingFrame { step, values });
    }

    /// Reply to a collection request with the accumulated frames
    pub fn handle(&mut self, request: &RecordingRequest) -> Vec<RecordingFrame> {
        match self.connections.get_mut(request.port) {
            Some(conn) => std::mem::take(&mut conn.frames),
            None => Vec::new(),
        }
    }
}
