//! Event types exchanged between the host kernel and a unit
//!
//! Inbound events carry the relative delivery offset (lag) the host computed
//! from the connection's delay and the current slice origin. Outbound spike
//! notifications travel through the [`SliceHost`] trait the host passes into
//! the update call.

/// Receptor port addressed by an incoming connection
///
/// This unit only exposes receptor 0; connection setup rejects anything
/// else.
pub type ReceptorType = u32;

/// Synaptic spike contribution delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub struct SpikeInput {
    /// Synaptic weight (mV)
    pub weight: f64,
    /// Number of coincident spikes folded into this event
    pub multiplicity: u32,
    /// Connection delay in steps; must be strictly positive
    pub delay_steps: u64,
    /// Delivery offset relative to the current slice origin
    pub rel_offset: usize,
}

impl SpikeInput {
    /// Create a spike contribution with multiplicity 1
    pub fn new(weight: f64, delay_steps: u64, rel_offset: usize) -> Self {
        Self {
            weight,
            multiplicity: 1,
            delay_steps,
            rel_offset,
        }
    }

    /// Set the multiplicity, builder style
    pub fn with_multiplicity(mut self, multiplicity: u32) -> Self {
        self.multiplicity = multiplicity;
        self
    }
}

/// External current contribution delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentInput {
    /// Current magnitude (pA)
    pub current: f64,
    /// Connection weight
    pub weight: f64,
    /// Connection delay in steps; must be strictly positive
    pub delay_steps: u64,
    /// Delivery offset relative to the current slice origin
    pub rel_offset: usize,
}

impl CurrentInput {
    /// Create a current contribution
    pub fn new(current: f64, weight: f64, delay_steps: u64, rel_offset: usize) -> Self {
        Self {
            current,
            weight,
            delay_steps,
            rel_offset,
        }
    }
}

/// Request from a recording collaborator
///
/// At connection-setup time `records` names the quantities to sample; after
/// setup the host reuses the request with the `port` returned by
/// [`crate::neuron::IafNeuron::connect_recording`] to collect frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingRequest {
    /// Names of recordable quantities to sample each step
    pub records: Vec<String>,
    /// Logger port assigned at connection time
    pub port: usize,
}

impl RecordingRequest {
    /// Request sampling of the named quantities
    pub fn new(records: Vec<String>) -> Self {
        Self { records, port: 0 }
    }

    /// Set the connected logger port, builder style
    pub fn with_port(mut self, port: usize) -> Self {
        self.port = port;
        self
    }
}

/// One recorded sample: the absolute step index and the sampled values, in
/// the order the recordables were requested
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingFrame {
    /// Absolute step index the sample was taken at
    pub step: u64,
    /// Sampled values
    pub values: Vec<f64>,
}

/// Host-side event delivery facility a unit calls back into during an
/// update slice
///
/// The host routes the notification to downstream connections; the unit
/// only reports the lag within the current slice at which the threshold
/// crossing occurred.
pub trait SliceHost {
    /// Deliver a spike notification occurring at `lag` within the slice
    fn send_spike(&mut self, lag: usize);
}

/// Vec-backed [`SliceHost`] collecting spike lags, for hosts and tests
#[derive(Debug, Clone, Default)]
pub struct SliceRecorder {
    /// Lags at which the unit spiked, in step order
    pub spikes: Vec<usize>,
}

impl SliceRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }
}

impl SliceHost for SliceRecorder {
    fn send_spike(&mut self, lag: usize) {
        self.spikes.push(lag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spike_input_builder() {
        let e = SpikeInput::new(2.5, 1, 3).with_multiplicity(4);
        assert_eq!(e.weight, 2.5);
        assert_eq!(e.multiplicity, 4);
        assert_eq!(e.rel_offset, 3);
    }

    #[test]
    fn test_slice_recorder_collects_lags() {
        let mut host = SliceRecorder::new();
        host.send_spike(0);
        host.send_spike(7);
        assert_eq!(host.spikes, vec![0, 7]);
    }
}
