//! Subcommand definitions and their runners.

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use sandbox_calc::transient::suggested_duration;
use sandbox_calc::{
    Bit, CalcConfig, DividerBias, diode, FilterKind, Gate, OpAmpMode, RcCircuit, RcFilter, RcMode,
    RlCircuit, RlcOutput, SeriesRlc, Topology, TransferFunction, bjt, opamp,
    solve_ohms_law_fields, zener::ZenerRegulator,
};
use sandbox_core::{FieldValue, parse_engineering};
use tracing::debug;

use crate::report::{self, Report};

#[derive(Subcommand)]
pub enum Command {
    /// Solve V = I·R for the one quantity left out
    Ohm(OhmArgs),
    /// RC charging or discharging step response
    Rc(RcArgs),
    /// RL current rise step response
    Rl(RlArgs),
    /// Series RLC circuit driven by a sinusoidal source
    Rlc(RlcArgs),
    /// RC low-pass or high-pass filter with Bode sweep
    Filter(FilterArgs),
    /// Series RLC transfer function H(s)
    Transfer(TransferArgs),
    /// Voltage-divider biased BJT amplifier
    Bjt(BjtArgs),
    /// Collector current in the active region (Ic = β·Ib)
    Ic(IcArgs),
    /// Silicon diode forward drop (constant-drop model)
    Diode(DiodeArgs),
    /// Ideal op-amp gain stage
    Opamp(OpAmpArgs),
    /// Zener shunt regulator design
    Zener(ZenerArgs),
    /// Evaluate a logic gate or print its truth table
    Logic(LogicArgs),
    /// Prompt for inputs from a menu
    Interactive,
}

/// Shared flags for commands that produce sampled curves.
#[derive(Args)]
pub struct SampleArgs {
    /// Number of samples (overrides the configuration)
    #[arg(long)]
    pub points: Option<usize>,

    /// Print the sampled curve as a table
    #[arg(long)]
    pub samples: bool,
}

#[derive(Args)]
pub struct OhmArgs {
    /// Voltage (V)
    #[arg(short = 'V', long, allow_hyphen_values = true)]
    pub voltage: Option<String>,
    /// Current (A)
    #[arg(short = 'I', long, allow_hyphen_values = true)]
    pub current: Option<String>,
    /// Resistance (Ω)
    #[arg(short = 'R', long, allow_hyphen_values = true)]
    pub resistance: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RcModeArg {
    Charging,
    Discharging,
}

#[derive(Args)]
pub struct RcArgs {
    /// Resistance (Ω)
    #[arg(short = 'R', long)]
    pub resistance: String,
    /// Capacitance (F)
    #[arg(short = 'C', long)]
    pub capacitance: String,
    /// Source voltage or initial capacitor voltage (V)
    #[arg(short = 'V', long, allow_hyphen_values = true)]
    pub voltage: String,
    /// Simulation time (s); defaults to 5τ
    #[arg(short = 't', long)]
    pub duration: Option<String>,
    #[arg(long, value_enum, default_value = "charging")]
    pub mode: RcModeArg,
    #[command(flatten)]
    pub sampling: SampleArgs,
}

#[derive(Args)]
pub struct RlArgs {
    /// Resistance (Ω)
    #[arg(short = 'R', long)]
    pub resistance: String,
    /// Inductance (H)
    #[arg(short = 'L', long)]
    pub inductance: String,
    /// Source voltage (V)
    #[arg(short = 'V', long, allow_hyphen_values = true)]
    pub voltage: String,
    /// Simulation time (s); defaults to 5τ
    #[arg(short = 't', long)]
    pub duration: Option<String>,
    #[command(flatten)]
    pub sampling: SampleArgs,
}

#[derive(Args)]
pub struct RlcArgs {
    /// Resistance (Ω)
    #[arg(short = 'R', long)]
    pub resistance: String,
    /// Inductance (H)
    #[arg(short = 'L', long)]
    pub inductance: String,
    /// Capacitance (F)
    #[arg(short = 'C', long)]
    pub capacitance: String,
    /// Peak source voltage (V)
    #[arg(short = 'V', long)]
    pub voltage: String,
    /// Source frequency (Hz)
    #[arg(short = 'f', long)]
    pub frequency: String,
    #[command(flatten)]
    pub sampling: SampleArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FilterKindArg {
    Lowpass,
    Highpass,
}

#[derive(Args)]
pub struct FilterArgs {
    #[arg(value_enum)]
    pub kind: FilterKindArg,
    /// Resistance (Ω)
    #[arg(short = 'R', long)]
    pub resistance: String,
    /// Capacitance (F)
    #[arg(short = 'C', long)]
    pub capacitance: String,
    #[command(flatten)]
    pub sampling: SampleArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputArg {
    Resistor,
    Inductor,
    Capacitor,
}

#[derive(Args)]
pub struct TransferArgs {
    /// Resistance (Ω)
    #[arg(short = 'R', long)]
    pub resistance: String,
    /// Inductance (H)
    #[arg(short = 'L', long)]
    pub inductance: String,
    /// Capacitance (F)
    #[arg(short = 'C', long)]
    pub capacitance: String,
    /// Element the output is taken across
    #[arg(long, value_enum, default_value = "capacitor")]
    pub output: OutputArg,
    /// Also evaluate H(j2πf) at this frequency (Hz)
    #[arg(long)]
    pub at: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TopologyArg {
    Ce,
    Cb,
    Cc,
}

impl From<TopologyArg> for Topology {
    fn from(t: TopologyArg) -> Self {
        match t {
            TopologyArg::Ce => Topology::CommonEmitter,
            TopologyArg::Cb => Topology::CommonBase,
            TopologyArg::Cc => Topology::CommonCollector,
        }
    }
}

#[derive(Args)]
pub struct BjtArgs {
    #[arg(long, value_enum, default_value = "ce")]
    pub topology: TopologyArg,
    /// Supply voltage (V)
    #[arg(long)]
    pub vcc: String,
    /// Upper divider resistor (Ω)
    #[arg(long)]
    pub r1: String,
    /// Lower divider resistor (Ω)
    #[arg(long)]
    pub r2: String,
    /// Collector resistor (Ω); not used by common-collector
    #[arg(long)]
    pub rc: Option<String>,
    /// Emitter resistor (Ω)
    #[arg(long)]
    pub re: String,
    /// Current gain; defaults to 150
    #[arg(long)]
    pub beta: Option<String>,
}

#[derive(Args)]
pub struct IcArgs {
    /// Base current (A)
    #[arg(long)]
    pub ib: String,
    /// Current gain; defaults to 100
    #[arg(long)]
    pub beta: Option<String>,
}

#[derive(Args)]
pub struct DiodeArgs {
    /// Forward current (A)
    #[arg(short = 'I', long, allow_hyphen_values = true)]
    pub current: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OpAmpModeArg {
    Inverting,
    NonInverting,
}

#[derive(Args)]
pub struct OpAmpArgs {
    #[arg(long, value_enum, default_value = "inverting")]
    pub mode: OpAmpModeArg,
    /// Input resistor (Ω)
    #[arg(long)]
    pub rin: String,
    /// Feedback resistor (Ω)
    #[arg(long)]
    pub rf: String,
}

#[derive(Args)]
pub struct ZenerArgs {
    /// Unregulated input voltage (V)
    #[arg(long)]
    pub vin: String,
    /// Zener voltage (V)
    #[arg(long)]
    pub vz: String,
    /// Minimum load resistance (Ω)
    #[arg(long)]
    pub rl: String,
}

#[derive(Args)]
pub struct LogicArgs {
    /// AND, OR, NAND, NOR, XOR, NOT or BUF
    pub gate: String,
    /// First input (0 or 1)
    pub a: Option<String>,
    /// Second input for two-input gates
    pub b: Option<String>,
    /// Print the full truth table instead
    #[arg(long)]
    pub table: bool,
}

/// A rendered result and whether its table was requested.
#[derive(Debug)]
pub struct Outcome {
    pub report: Report,
    pub show_table: bool,
}

impl Outcome {
    fn plain(report: Report) -> Self {
        Self {
            report,
            show_table: false,
        }
    }
}

/// Parse a required numeric argument.
pub fn number(raw: &str, name: &str) -> Result<f64> {
    parse_engineering(raw).with_context(|| format!("invalid {name}: {raw:?}"))
}

fn optional_number(raw: Option<&str>, name: &str) -> Result<Option<f64>> {
    raw.map(|r| number(r, name)).transpose()
}

fn field(raw: Option<&str>) -> FieldValue {
    raw.map(FieldValue::parse).unwrap_or(FieldValue::Blank)
}

impl Command {
    /// Run a one-shot subcommand. `Interactive` is dispatched by the caller.
    pub fn run(&self, config: &CalcConfig) -> Result<Outcome> {
        match self {
            Self::Ohm(args) => run_ohm(args),
            Self::Rc(args) => run_rc(args, config),
            Self::Rl(args) => run_rl(args, config),
            Self::Rlc(args) => run_rlc(args, config),
            Self::Filter(args) => run_filter(args, config),
            Self::Transfer(args) => run_transfer(args),
            Self::Bjt(args) => run_bjt(args),
            Self::Ic(args) => run_ic(args),
            Self::Diode(args) => run_diode(args),
            Self::Opamp(args) => run_opamp(args),
            Self::Zener(args) => run_zener(args),
            Self::Logic(args) => run_logic(args),
            Self::Interactive => anyhow::bail!("interactive mode has no one-shot result"),
        }
    }
}

fn run_ohm(args: &OhmArgs) -> Result<Outcome> {
    let solution = solve_ohms_law_fields(
        field(args.voltage.as_deref()),
        field(args.current.as_deref()),
        field(args.resistance.as_deref()),
    )?;
    Ok(Outcome::plain(report::ohms_law(&solution)?))
}

fn run_rc(args: &RcArgs, config: &CalcConfig) -> Result<Outcome> {
    let resistance = number(&args.resistance, "resistance")?;
    let capacitance = number(&args.capacitance, "capacitance")?;
    let duration = match args.duration.as_deref() {
        Some(raw) => number(raw, "duration")?,
        None => suggested_duration(resistance * capacitance),
    };
    let circuit = RcCircuit {
        resistance,
        capacitance,
        voltage: number(&args.voltage, "voltage")?,
        duration,
        mode: match args.mode {
            RcModeArg::Charging => RcMode::Charging,
            RcModeArg::Discharging => RcMode::Discharging,
        },
    };
    let points = args.sampling.points.unwrap_or(config.transient_points);
    debug!(points, duration, "rc response");

    let title = match circuit.mode {
        RcMode::Charging => "RC Circuit (Charging)",
        RcMode::Discharging => "RC Circuit (Discharging)",
    };
    Ok(Outcome {
        report: report::transient(title, &circuit.response(points)?)?,
        show_table: args.sampling.samples,
    })
}

fn run_rl(args: &RlArgs, config: &CalcConfig) -> Result<Outcome> {
    let mut circuit = RlCircuit {
        resistance: number(&args.resistance, "resistance")?,
        inductance: number(&args.inductance, "inductance")?,
        voltage: number(&args.voltage, "voltage")?,
        duration: 0.0,
    };
    circuit.duration = match args.duration.as_deref() {
        Some(raw) => number(raw, "duration")?,
        None => suggested_duration(circuit.time_constant()?),
    };
    let points = args.sampling.points.unwrap_or(config.transient_points);

    Ok(Outcome {
        report: report::transient("RL Circuit (Current Rise)", &circuit.response(points)?)?,
        show_table: args.sampling.samples,
    })
}

fn run_rlc(args: &RlcArgs, config: &CalcConfig) -> Result<Outcome> {
    let circuit = SeriesRlc {
        resistance: number(&args.resistance, "resistance")?,
        inductance: number(&args.inductance, "inductance")?,
        capacitance: number(&args.capacitance, "capacitance")?,
        peak_voltage: number(&args.voltage, "voltage")?,
        frequency: number(&args.frequency, "frequency")?,
    };
    let analysis = circuit.analyze()?;
    let waveforms = if args.sampling.samples {
        let points = args.sampling.points.unwrap_or(config.waveform_points);
        analysis.waveforms(config.waveform_periods, points)
    } else {
        Vec::new()
    };

    Ok(Outcome {
        report: report::series_rlc(&analysis, &waveforms)?,
        show_table: args.sampling.samples,
    })
}

fn run_filter(args: &FilterArgs, config: &CalcConfig) -> Result<Outcome> {
    let filter = RcFilter {
        resistance: number(&args.resistance, "resistance")?,
        capacitance: number(&args.capacitance, "capacitance")?,
        kind: match args.kind {
            FilterKindArg::Lowpass => FilterKind::Lowpass,
            FilterKindArg::Highpass => FilterKind::Highpass,
        },
    };
    let points = args.sampling.points.unwrap_or(config.bode_points);

    Ok(Outcome {
        report: report::filter(&filter.analyze(points)?)?,
        show_table: args.sampling.samples,
    })
}

fn run_transfer(args: &TransferArgs) -> Result<Outcome> {
    let output = match args.output {
        OutputArg::Resistor => RlcOutput::Resistor,
        OutputArg::Inductor => RlcOutput::Inductor,
        OutputArg::Capacitor => RlcOutput::Capacitor,
    };
    let h = TransferFunction::series_rlc(
        number(&args.resistance, "resistance")?,
        number(&args.inductance, "inductance")?,
        number(&args.capacitance, "capacitance")?,
        output,
    )?;
    let at = optional_number(args.at.as_deref(), "frequency")?;
    Ok(Outcome::plain(report::transfer(&h, at)?))
}

fn run_bjt(args: &BjtArgs) -> Result<Outcome> {
    let topology = Topology::from(args.topology);
    let rc = match (args.rc.as_deref(), topology.has_collector_resistor()) {
        (Some(raw), _) => number(raw, "rc")?,
        (None, false) => 0.0,
        (None, true) => anyhow::bail!("--rc is required for the {topology} configuration"),
    };
    let bias = DividerBias {
        vcc: number(&args.vcc, "vcc")?,
        r1: number(&args.r1, "r1")?,
        r2: number(&args.r2, "r2")?,
        rc,
        re: number(&args.re, "re")?,
        beta: optional_number(args.beta.as_deref(), "beta")?
            .unwrap_or(bjt::AMPLIFIER_DEFAULT_BETA),
    };
    Ok(Outcome::plain(report::amplifier(&bias.analyze(topology)?)?))
}

fn run_ic(args: &IcArgs) -> Result<Outcome> {
    let ib = number(&args.ib, "base current")?;
    let beta = optional_number(args.beta.as_deref(), "beta")?;
    let ic = bjt::collector_current(ib, beta)?;
    Ok(Outcome::plain(report::collector_current(
        ib,
        beta.unwrap_or(bjt::DEFAULT_BETA),
        ic,
    )?))
}

fn run_diode(args: &DiodeArgs) -> Result<Outcome> {
    let estimate = diode::forward_estimate(number(&args.current, "forward current")?)?;
    Ok(Outcome::plain(report::diode(&estimate)?))
}

fn run_opamp(args: &OpAmpArgs) -> Result<Outcome> {
    let mode = match args.mode {
        OpAmpModeArg::Inverting => OpAmpMode::Inverting,
        OpAmpModeArg::NonInverting => OpAmpMode::NonInverting,
    };
    let analysis = opamp::analyze(
        mode,
        number(&args.rin, "input resistor")?,
        number(&args.rf, "feedback resistor")?,
    )?;
    Ok(Outcome::plain(report::opamp(&analysis)?))
}

fn run_zener(args: &ZenerArgs) -> Result<Outcome> {
    let design = ZenerRegulator {
        input_voltage: number(&args.vin, "input voltage")?,
        zener_voltage: number(&args.vz, "zener voltage")?,
        load_resistance: number(&args.rl, "load resistance")?,
    }
    .design()?;
    Ok(Outcome::plain(report::zener(&design)?))
}

fn run_logic(args: &LogicArgs) -> Result<Outcome> {
    let gate: Gate = args.gate.parse()?;
    if args.table {
        return Ok(Outcome {
            report: report::truth_table(gate, &gate.truth_table())?,
            show_table: true,
        });
    }

    let a: Bit = args
        .a
        .as_deref()
        .context("input A is required (or pass --table)")?
        .parse()?;
    let b = args.b.as_deref().map(str::parse::<Bit>).transpose()?;
    let out = gate.evaluate(a, b)?;
    Ok(Outcome::plain(report::logic(gate, a, b, out)?))
}
