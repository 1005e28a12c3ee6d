//! Rendering calculator results as text or JSON.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use sandbox_calc::{
    AmplifierAnalysis, DiodeEstimate, FilterResponse, OhmsLawSolution, OpAmpAnalysis, RlcAnalysis,
    TransferFunction, TransientResponse, TruthRow, WaveformSample, ZenerDesign,
};
use sandbox_calc::{Advisory, Bit, Gate, ResponseQuantity};
use sandbox_core::format_value;
use serde::Serialize;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// A tabulated curve (transient samples, Bode sweep, waveforms).
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<f64>>,
}

/// Everything a front end needs to show one calculation.
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub metrics: Vec<(String, String)>,
    pub notes: Vec<String>,
    pub table: Option<Table>,
    pub json: serde_json::Value,
}

impl Report {
    pub fn new(title: impl Into<String>, result: &impl Serialize) -> Result<Self> {
        Ok(Self {
            title: title.into(),
            metrics: Vec::new(),
            notes: Vec::new(),
            table: None,
            json: serde_json::to_value(result)?,
        })
    }

    pub fn metric(mut self, label: &str, value: impl Into<String>) -> Self {
        self.metrics.push((label.to_string(), value.into()));
        self
    }

    pub fn advisories(mut self, advisories: &[Advisory]) -> Self {
        self.notes.extend(advisories.iter().map(ToString::to_string));
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn table(mut self, table: Table) -> Self {
        self.table = Some(table);
        self
    }

    /// Write the report. Tables are printed only when `show_table` is set.
    pub fn render(&self, format: Format, show_table: bool, out: &mut impl Write) -> Result<()> {
        match format {
            Format::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(&self.json)?)?;
            }
            Format::Text => {
                writeln!(out, "{}", self.title)?;
                writeln!(out, "{}", "=".repeat(self.title.chars().count()))?;
                writeln!(out)?;

                let width = self
                    .metrics
                    .iter()
                    .map(|(label, _)| label.chars().count())
                    .max()
                    .unwrap_or(0);
                for (label, value) in &self.metrics {
                    writeln!(out, "{label:<width$}  {value}")?;
                }
                for note in &self.notes {
                    writeln!(out, "Warning: {note}")?;
                }

                if let (true, Some(table)) = (show_table, &self.table) {
                    writeln!(out)?;
                    for header in &table.headers {
                        write!(out, "{header:>14}")?;
                    }
                    writeln!(out)?;
                    writeln!(out, "{}", "-".repeat(14 * table.headers.len()))?;
                    for row in &table.rows {
                        for v in row {
                            write!(out, "{v:>14.4e}")?;
                        }
                        writeln!(out)?;
                    }
                    writeln!(out)?;
                    writeln!(out, "({} points)", table.rows.len())?;
                }
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

/// Value with SI prefix and unit, e.g. `4.7000kΩ`.
pub fn si(value: f64, unit: &str) -> String {
    format!("{}{unit}", format_value(value))
}

pub fn ohms_law(s: &OhmsLawSolution) -> Result<Report> {
    Ok(Report::new("Ohm's Law (V = I·R)", s)?
        .metric(
            &format!("Calculated {}", s.solved_for),
            si(s.value(), s.solved_for.unit()),
        )
        .metric("Voltage V", si(s.voltage, "V"))
        .metric("Current I", si(s.current, "A"))
        .metric("Resistance R", si(s.resistance, "Ω")))
}

pub fn transient(title: &str, r: &TransientResponse) -> Result<Report> {
    let (label, unit, header) = match r.quantity {
        ResponseQuantity::CapacitorVoltage => ("Capacitor voltage", "V", "Vc(V)"),
        ResponseQuantity::InductorCurrent => ("Inductor current", "A", "IL(A)"),
    };
    let end = r.samples.last().map_or(0.0, |s| s.x);

    Ok(Report::new(title, r)?
        .metric("Time constant τ", si(r.time_constant, "s"))
        .metric(&format!("{label} at t = {}", si(end, "s")), si(r.final_value, unit))
        .table(Table {
            headers: vec!["Time(s)", header],
            rows: r.samples.iter().map(|s| vec![s.x, s.y]).collect(),
        }))
}

pub fn series_rlc(a: &RlcAnalysis, waveforms: &[WaveformSample]) -> Result<Report> {
    #[derive(Serialize)]
    struct Payload<'a> {
        #[serde(flatten)]
        analysis: &'a RlcAnalysis,
        #[serde(skip_serializing_if = "Option::is_none")]
        waveforms: Option<&'a [WaveformSample]>,
    }

    let kind = match a.power_factor_kind {
        sandbox_calc::PowerFactorKind::Lagging => "lagging",
        sandbox_calc::PowerFactorKind::Leading => "leading",
    };

    let mut report = Report::new(
        "AC Series RLC Circuit",
        &Payload {
            analysis: a,
            waveforms: (!waveforms.is_empty()).then_some(waveforms),
        },
    )?
    .metric("Angular frequency ω", format!("{:.2} rad/s", a.angular_frequency))
    .metric("Inductive reactance XL", si(a.inductive_reactance, "Ω"))
    .metric("Capacitive reactance XC", si(a.capacitive_reactance, "Ω"))
    .metric(
        "Impedance Z",
        format!("{} at {:.2}°", si(a.impedance_magnitude, "Ω"), a.phase_deg),
    )
    .metric("Peak current Ip", si(a.peak_current, "A"))
    .metric("RMS current Irms", si(a.rms_current, "A"))
    .metric("Real power P", si(a.real_power, "W"))
    .metric("Reactive power Q", si(a.reactive_power, "VAR"))
    .metric("Apparent power S", si(a.apparent_power, "VA"))
    .metric("Power factor", format!("{:.4} ({kind})", a.power_factor));

    if let Some(res) = &a.resonance {
        report = report
            .metric("Resonant frequency f0", si(res.frequency, "Hz"))
            .metric("Offset from resonance", si(res.detuning, "Hz"))
            .metric("Quality factor Q", format!("{:.2}", res.quality_factor))
            .metric("Bandwidth BW", si(res.bandwidth, "Hz"));
    }

    if !waveforms.is_empty() {
        report = report.table(Table {
            headers: vec!["Time(s)", "v(t)(V)", "i(t)(A)"],
            rows: waveforms
                .iter()
                .map(|w| vec![w.time, w.voltage, w.current])
                .collect(),
        });
    }
    Ok(report)
}

pub fn filter(r: &FilterResponse) -> Result<Report> {
    let title = match r.kind {
        sandbox_calc::FilterKind::Lowpass => "RC Low-Pass Filter",
        sandbox_calc::FilterKind::Highpass => "RC High-Pass Filter",
    };
    Ok(Report::new(title, r)?
        .metric("Cutoff frequency (-3dB)", si(r.cutoff_frequency, "Hz"))
        .table(Table {
            headers: vec!["Freq(Hz)", "Mag(dB)", "Phase(deg)"],
            rows: r
                .bode
                .iter()
                .map(|p| vec![p.frequency, p.magnitude_db, p.phase_deg])
                .collect(),
        }))
}

pub fn transfer(h: &TransferFunction, at: Option<f64>) -> Result<Report> {
    let mut report = Report::new("Series RLC Transfer Function", h)?
        .metric("Output across", format!("{:?} ({})", h.output, h.output.response_name()))
        .metric("Transfer function", h.to_string());
    if let Some(f) = at {
        let value = h.evaluate(f);
        report = report.metric(
            &format!("|H| at {}", si(f, "Hz")),
            format!("{:.4} dB, {:.2}°", 20.0 * value.norm().log10(), value.arg().to_degrees()),
        );
    }
    Ok(report)
}

pub fn amplifier(a: &AmplifierAnalysis) -> Result<Report> {
    let q = &a.q_point;
    Ok(Report::new(format!("BJT {} Amplifier", a.topology), a)?
        .metric("Base voltage Vb", si(q.vb, "V"))
        .metric("Emitter voltage Ve", si(q.ve, "V"))
        .metric("Collector current Icq", si(q.ic, "A"))
        .metric("Collector-emitter voltage Vceq", si(q.vce, "V"))
        .metric("Internal emitter resistance re'", si(a.emitter_resistance, "Ω"))
        .metric("Voltage gain Av", format!("{:.3}", a.voltage_gain))
        .metric("Input impedance Zin", si(a.input_impedance, "Ω"))
        .metric("Output impedance Zout", si(a.output_impedance, "Ω"))
        .advisories(&a.advisories))
}

pub fn collector_current(ib: f64, beta: f64, ic: f64) -> Result<Report> {
    #[derive(Serialize)]
    struct Payload {
        base_current: f64,
        beta: f64,
        collector_current: f64,
    }
    Ok(Report::new(
        "BJT Collector Current (Active Region)",
        &Payload {
            base_current: ib,
            beta,
            collector_current: ic,
        },
    )?
    .metric("Collector current Ic = β·Ib", si(ic, "A")))
}

pub fn diode(d: &DiodeEstimate) -> Result<Report> {
    Ok(Report::new("Silicon Diode (Forward Bias)", d)?
        .metric("Forward current I", si(d.forward_current, "A"))
        .metric("Forward voltage Vf", format!("≈ {}", si(d.forward_voltage, "V")))
        .metric("Power dissipated", si(d.power, "W"))
        .note("constant-drop approximation; a real diode's Vf rises slightly with current"))
}

pub fn opamp(a: &OpAmpAnalysis) -> Result<Report> {
    let title = match a.mode {
        sandbox_calc::OpAmpMode::Inverting => "Inverting Op-Amp",
        sandbox_calc::OpAmpMode::NonInverting => "Non-Inverting Op-Amp",
    };
    let zin = if a.input_impedance.is_infinite() {
        "∞ Ω (ideal)".to_string()
    } else {
        si(a.input_impedance, "Ω")
    };
    Ok(Report::new(title, a)?
        .metric("Voltage gain Av", format!("{:.2}", a.voltage_gain))
        .metric("Input impedance Zin", zin)
        .metric("Output impedance Zout", si(a.output_impedance, "Ω"))
        .advisories(&a.advisories))
}

pub fn zener(d: &ZenerDesign) -> Result<Report> {
    Ok(Report::new("Zener Voltage Regulator Design", d)?
        .metric("Max load current IL(max)", si(d.max_load_current, "A"))
        .metric("Series resistor Rs", si(d.series_resistance, "Ω"))
        .metric("Power in Rs", si(d.series_power, "W"))
        .metric("Zener power rating (min)", si(d.zener_power_rating, "W")))
}

pub fn logic(gate: Gate, a: Bit, b: Option<Bit>, out: Bit) -> Result<Report> {
    #[derive(Serialize)]
    struct Payload {
        gate: Gate,
        inputs: Vec<Bit>,
        output: Bit,
    }
    let expr = match b {
        Some(b) => format!("{a} {gate} {b}"),
        None => format!("{gate} {a}"),
    };
    Ok(Report::new(
        "Digital Logic Gate",
        &Payload {
            gate,
            inputs: std::iter::once(a).chain(b).collect(),
            output: out,
        },
    )?
    .metric("Result", format!("{expr} = {out}")))
}

pub fn truth_table(gate: Gate, rows: &[TruthRow]) -> Result<Report> {
    let headers = match gate.arity() {
        1 => vec!["A", "Out"],
        _ => vec!["A", "B", "Out"],
    };
    Ok(Report::new(format!("{gate} Truth Table"), &rows)?
        .metric("Gate", gate.name())
        .table(Table {
            headers,
            rows: rows
                .iter()
                .map(|r| {
                    r.inputs
                        .iter()
                        .chain(std::iter::once(&r.output))
                        .map(|&b| f64::from(u8::from(b)))
                        .collect()
                })
                .collect(),
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandbox_calc::solve_ohms_law;

    fn render(report: &Report, format: Format, table: bool) -> String {
        let mut buf = Vec::new();
        report.render(format, table, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_report() {
        let s = solve_ohms_law(None, Some(2.0), Some(3.0)).unwrap();
        let text = render(&ohms_law(&s).unwrap(), Format::Text, false);
        assert!(text.starts_with("Ohm's Law (V = I·R)\n"));
        assert!(text.contains("Calculated Voltage"));
        assert!(text.contains("6.0000V"));
    }

    #[test]
    fn test_json_report() {
        let s = solve_ohms_law(Some(6.0), None, Some(3.0)).unwrap();
        let json = render(&ohms_law(&s).unwrap(), Format::Json, false);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["solved_for"], "current");
        assert_eq!(value["current"], 2.0);
    }

    #[test]
    fn test_truth_table_rendering() {
        let rows = Gate::And.truth_table();
        let report = truth_table(Gate::And, &rows).unwrap();
        let table = report.table.as_ref().unwrap();
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[3], vec![1.0, 1.0, 1.0]);

        let text = render(&report, Format::Text, true);
        assert!(text.contains("(4 points)"));
        let hidden = render(&report, Format::Text, false);
        assert!(!hidden.contains("(4 points)"));
    }

    #[test]
    fn test_unbounded_impedance_in_json_output() {
        let a = sandbox_calc::opamp::non_inverting(1e3, 9e3).unwrap();
        let report = opamp(&a).unwrap();
        let json = render(&report, Format::Json, false);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["input_impedance"], "inf");
        assert_eq!(value["voltage_gain"], 10.0);
        assert!(render(&report, Format::Text, false).contains("∞ Ω (ideal)"));
    }

    #[test]
    fn test_diode_report() {
        let d = sandbox_calc::diode::forward_estimate(10e-3).unwrap();
        let text = render(&diode(&d).unwrap(), Format::Text, false);
        assert!(text.contains("≈ 700.0000mV"));
        assert!(text.contains("Warning: constant-drop approximation"));
    }

    #[test]
    fn test_advisories_render_as_warnings() {
        let a = sandbox_calc::opamp::inverting(10e3, 1e3).unwrap();
        let text = render(&opamp(&a).unwrap(), Format::Text, false);
        assert!(text.contains("Warning: gain magnitude 0.10"));
    }
}
