//! Simple integrate-and-fire unit and its per-step update engine
//!
//! The unit advances its membrane state with the exact propagators of the
//! underlying leaky-integrator ODE: for step size `h`,
//! `P22 = exp(-h/tau_m)` and `P20 = tau_m/C_m * (1 - P22)`. The constant
//! external current is scaled by `P20`; buffered spike and current
//! contributions are added as direct voltage increments, matching the
//! reference numerics bit for bit.

use crate::buffer::RingBuffer;
use crate::archive::SpikeArchive;
use crate::error::{Result, UnitError};
use crate::event::{
    CurrentInput, RecordingFrame, RecordingRequest, ReceptorType, SliceHost, SpikeInput,
};
use crate::recorder::{DataLogger, RecordablesMap};
use crate::status::{keys, StatusDict};
use crate::DEFAULT_RESOLUTION_MS;

/// Independent parameters of the unit
///
/// Immutable during the update loop; replaced wholesale only through the
/// [`IafNeuron::set_status`] commit protocol.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IafParams {
    /// Membrane time constant (ms)
    pub tau_m: f64,
    /// Resting potential (mV)
    pub e_l: f64,
    /// Reset potential (mV)
    pub v_reset: f64,
    /// Membrane capacitance (pF)
    pub c_m: f64,
    /// Constant external input current (pA)
    pub i_e: f64,
    /// Spike threshold (mV)
    pub v_th: f64,
    /// Absolute lower bound for the membrane potential (mV)
    pub v_min: f64,
}

impl Default for IafParams {
    fn default() -> Self {
        Self {
            tau_m: 10.0,    // 10ms membrane time constant
            e_l: -70.0,     // -70mV resting potential
            v_reset: -70.0, // -70mV reset potential
            c_m: 250.0,     // 250pF capacitance
            i_e: 0.0,       // no constant input
            v_th: -55.0,    // -55mV threshold
            v_min: f64::MIN, // effectively unbounded below
        }
    }
}

impl IafParams {
    /// Create new parameters with validation
    pub fn new(
        tau_m: f64,
        e_l: f64,
        v_reset: f64,
        c_m: f64,
        i_e: f64,
        v_th: f64,
        v_min: f64,
    ) -> Result<Self> {
        let params = Self {
            tau_m,
            e_l,
            v_reset,
            c_m,
            i_e,
            v_th,
            v_min,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validate parameters
    ///
    /// The update loop divides by `tau_m` and `c_m` every step, so both must
    /// be strictly positive.
    pub fn validate(&self) -> Result<()> {
        if self.tau_m <= 0.0 {
            return Err(UnitError::invalid_parameter(
                "tau_m",
                self.tau_m.to_string(),
                "> 0.0",
            ));
        }
        if self.c_m <= 0.0 {
            return Err(UnitError::invalid_parameter(
                "C_m",
                self.c_m.to_string(),
                "> 0.0",
            ));
        }
        Ok(())
    }

    /// Store current values in `d`
    pub fn get(&self, d: &mut StatusDict) {
        d.set(keys::I_E, self.i_e);
        d.set(keys::V_TH, self.v_th);
        d.set(keys::V_MIN, self.v_min);
        d.set(keys::TAU_M, self.tau_m);
        d.set(keys::E_L, self.e_l);
        d.set(keys::V_RESET, self.v_reset);
        d.set(keys::C_M, self.c_m);
    }

    /// Overlay values from `d` and re-validate
    pub fn apply(&mut self, d: &StatusDict) -> Result<()> {
        d.update(keys::V_TH, &mut self.v_th);
        d.update(keys::V_MIN, &mut self.v_min);
        d.update(keys::I_E, &mut self.i_e);
        d.update(keys::TAU_M, &mut self.tau_m);
        d.update(keys::E_L, &mut self.e_l);
        d.update(keys::V_RESET, &mut self.v_reset);
        d.update(keys::C_M, &mut self.c_m);
        self.validate()
    }
}

/// Mutable per-step numerical state of the unit
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IafState {
    /// Membrane potential (mV)
    pub v: f64,
    /// Input current sampled at the most recent step (pA)
    pub i: f64,
}

impl Default for IafState {
    fn default() -> Self {
        Self { v: -70.0, i: 0.0 }
    }
}

impl IafState {
    /// Store current values in `d`
    pub fn get(&self, d: &mut StatusDict) {
        d.set(keys::V_M, self.v);
    }

    /// Overlay values from `d`
    pub fn apply(&mut self, d: &StatusDict, _params: &IafParams) -> Result<()> {
        d.update(keys::V_M, &mut self.v);
        Ok(())
    }
}

/// Input buffers and recording apparatus of the unit
#[derive(Debug, Clone, Default)]
struct Buffers {
    /// Accumulated synaptic spike contributions per slice offset
    spikes: RingBuffer,
    /// Accumulated external current contributions per slice offset
    currents: RingBuffer,
    /// Frame logger for connected recording collaborators
    logger: DataLogger,
}

/// Leaky integrate-and-fire unit with exact-integration update rule
///
/// The host owns global time and scheduling: it delivers events through the
/// `handle_*` channels as they arrive, then invokes
/// [`IafNeuron::update`] once per scheduling slice over a contiguous range
/// of timesteps. The unit is single-writer; the host must serialize event
/// delivery against the update pass for each unit instance.
#[derive(Debug, Clone)]
pub struct IafNeuron {
    params: IafParams,
    state: IafState,
    buffers: Buffers,
    archive: SpikeArchive,
    /// Simulation resolution (ms); fixed for a run at calibration time
    h_ms: f64,
}

impl Default for IafNeuron {
    fn default() -> Self {
        Self::new()
    }
}

impl IafNeuron {
    /// Create a unit with default parameters and resting state
    pub fn new() -> Self {
        Self {
            params: IafParams::default(),
            state: IafState::default(),
            buffers: Buffers::default(),
            archive: SpikeArchive::new(),
            h_ms: DEFAULT_RESOLUTION_MS,
        }
    }

    /// Create a unit with specific parameters, validated
    pub fn with_params(params: IafParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            ..Self::new()
        })
    }

    /// Recordable quantities exposed by this unit type
    ///
    /// Explicitly constructed; no global registry is involved.
    pub fn recordables() -> RecordablesMap {
        let mut map = RecordablesMap::new();
        map.insert(keys::V_M, |n: &IafNeuron| n.state.v);
        map
    }

    /// Current membrane potential (mV)
    pub fn v_m(&self) -> f64 {
        self.state.v
    }

    /// Unit parameters
    pub fn params(&self) -> &IafParams {
        &self.params
    }

    /// Unit state
    pub fn state(&self) -> &IafState {
        &self.state
    }

    /// Spike-history archive
    pub fn archive(&self) -> &SpikeArchive {
        &self.archive
    }

    /// Calibrated simulation resolution (ms)
    pub fn resolution_ms(&self) -> f64 {
        self.h_ms
    }

    // ---------------------------------------------------------------
    // Lifecycle hooks
    // ---------------------------------------------------------------

    /// Reset input buffers and recording state for a new run segment
    ///
    /// `slice_len` is the number of timesteps per scheduling slice; both
    /// ring buffers are cleared and resized to it.
    pub fn init_buffers(&mut self, slice_len: usize) {
        self.buffers.spikes.clear(slice_len);
        self.buffers.currents.clear(slice_len);
        self.buffers.logger.reset();
        self.archive.clear_history();
        log::debug!("buffers initialized with slice length {}", slice_len);
    }

    /// Fix the run resolution and prepare the recording apparatus
    ///
    /// Invoked by the host before the first step of a run.
    pub fn calibrate(&mut self, h_ms: f64) -> Result<()> {
        if h_ms <= 0.0 || !h_ms.is_finite() {
            return Err(UnitError::invalid_parameter(
                "h_ms",
                h_ms.to_string(),
                "> 0.0 and finite",
            ));
        }
        self.h_ms = h_ms;
        self.buffers.logger.init();
        log::debug!("calibrated with resolution {}ms", h_ms);
        Ok(())
    }

    // ---------------------------------------------------------------
    // Update engine
    // ---------------------------------------------------------------

    /// Advance the membrane state over `[from, to)` within the slice that
    /// starts at absolute step `origin`
    ///
    /// For each lag the corresponding ring-buffer slots are consumed, the
    /// exact-integration recurrence is applied, and on a threshold crossing
    /// the potential is reset, the spike step `origin + lag + 1` is
    /// archived, and `host` is notified at that lag. Decay toward rest and
    /// the floor clamp apply unconditionally, also on a just-reset value.
    ///
    /// `from < to` is a precondition, as is `to` lying within the slice the
    /// buffers were initialized for; violations panic.
    pub fn update<H: SliceHost>(&mut self, origin: u64, from: usize, to: usize, host: &mut H) {
        assert!(from < to, "empty or inverted step range {}..{}", from, to);
        assert!(
            to <= self.buffers.spikes.len(),
            "step range {}..{} exceeds slice length {}",
            from,
            to,
            self.buffers.spikes.len()
        );

        let h = self.h_ms;

        for lag in from..to {
            let p22 = (-h / self.params.tau_m).exp();
            let p20 = self.params.tau_m / self.params.c_m * (1.0 - p22);

            self.state.i = self.buffers.currents.get_value(lag);
            let i_syn = self.buffers.spikes.get_value(lag);

            self.state.v += self.params.i_e * p20 + self.state.i + i_syn;

            // threshold crossing
            if self.state.v >= self.params.v_th {
                self.state.v = self.params.v_reset;
                self.archive.set_spike_step(origin + lag as u64 + 1);
                log::trace!("spike at step {}", origin + lag as u64 + 1);
                host.send_spike(lag);
            }

            self.state.v = (self.state.v - self.params.e_l) * p22 + self.params.e_l;

            // lower bound of membrane potential
            if self.state.v < self.params.v_min {
                self.state.v = self.params.v_min;
            }

            self.record_data(origin + lag as u64);
        }
    }

    /// Sample all connected recordables at absolute step `step`
    fn record_data(&mut self, step: u64) {
        for port in 0..self.buffers.logger.connection_count() {
            let targets = self.buffers.logger.targets(port).to_vec();
            let values: Vec<f64> = targets.iter().map(|r| (r.read)(self)).collect();
            self.buffers.logger.push(port, step, values);
        }
    }

    // ---------------------------------------------------------------
    // Inbound event channels
    // ---------------------------------------------------------------

    /// Accumulate a synaptic spike contribution
    ///
    /// Zero-delay self-delivery is disallowed: the contribution must land at
    /// least one step in the future.
    pub fn handle_spike(&mut self, e: &SpikeInput) {
        assert!(e.delay_steps > 0, "spike event with non-positive delay");
        self.buffers
            .spikes
            .add_value(e.rel_offset, e.weight * f64::from(e.multiplicity));
    }

    /// Accumulate an external current contribution
    pub fn handle_current(&mut self, e: &CurrentInput) {
        assert!(e.delay_steps > 0, "current event with non-positive delay");
        self.buffers
            .currents
            .add_value(e.rel_offset, e.weight * e.current);
    }

    /// Reply to a recording collaborator with the frames recorded since its
    /// last request
    pub fn handle_recording(&mut self, e: &RecordingRequest) -> Vec<RecordingFrame> {
        self.buffers.logger.handle(e)
    }

    // ---------------------------------------------------------------
    // Connection setup
    // ---------------------------------------------------------------

    /// Check that an incoming spike connection may target `receptor`
    ///
    /// This unit exposes a single receptor port 0; anything else is rejected
    /// at setup time so delivery-time failures cannot occur.
    pub fn accepts_spike_input(&self, receptor: ReceptorType) -> Result<ReceptorType> {
        if receptor != 0 {
            return Err(UnitError::unknown_receptor(receptor));
        }
        Ok(0)
    }

    /// Check that an incoming current connection may target `receptor`
    pub fn accepts_current_input(&self, receptor: ReceptorType) -> Result<ReceptorType> {
        if receptor != 0 {
            return Err(UnitError::unknown_receptor(receptor));
        }
        Ok(0)
    }

    /// Connect a recording collaborator and return its logger port
    ///
    /// Every requested quantity must be recordable; an unknown name rejects
    /// the connection.
    pub fn connect_recording(
        &mut self,
        request: &RecordingRequest,
        receptor: ReceptorType,
    ) -> Result<usize> {
        if receptor != 0 {
            return Err(UnitError::unknown_receptor(receptor));
        }
        self.buffers.logger.connect(request, &Self::recordables())
    }

    // ---------------------------------------------------------------
    // Status protocol
    // ---------------------------------------------------------------

    /// Collect parameters, state, archive values, and the recordables list
    pub fn get_status(&self) -> StatusDict {
        let mut d = StatusDict::new();
        self.params.get(&mut d);
        self.state.get(&mut d);
        self.archive.get_status(&mut d);
        d.set_list(keys::RECORDABLES, Self::recordables().names());
        d
    }

    /// Apply a configuration change atomically
    ///
    /// Builds full candidate parameters and state from the live values
    /// overlaid with the requested keys, validates both, then runs the
    /// archive's own internally-atomic set-status. Only if everything
    /// succeeds are the live parameters and state replaced, in that order.
    /// On any failure the unit is left exactly as it was.
    pub fn set_status(&mut self, d: &StatusDict) -> Result<()> {
        let mut ptmp = self.params.clone(); // temporary copy in case of errors
        ptmp.apply(d)?;
        let mut stmp = self.state.clone();
        stmp.apply(d, &ptmp)?;

        // The archive validates before mutating, so ordering it here keeps
        // the whole commit atomic.
        self.archive.set_status(d)?;

        self.params = ptmp;
        self.state = stmp;
        log::debug!("status committed");
        Ok(())
    }
}
