//! Menu-driven prompt session.
//!
//! Each calculator page owns a [`Form`] that is cleared on every visit and
//! filled one prompt at a time. Prompts re-ask until the answer parses, and
//! blank answers are accepted only for optional fields. Calculator errors are
//! reported and the session returns to the menu. End of input ends the session.

use std::io::{BufRead, Write};

use anyhow::Result;
use sandbox_calc::transient::suggested_duration;
use sandbox_calc::{
    Bit, CalcConfig, DividerBias, FilterKind, Gate, OpAmpMode, RcCircuit, RcFilter, RcMode,
    RlCircuit, RlcOutput, SeriesRlc, Topology, TransferFunction, bjt, diode, opamp,
    solve_ohms_law_fields, zener::ZenerRegulator,
};
use sandbox_core::{Error as InputError, FieldValue, Form};
use tracing::debug;

use crate::commands::Outcome;
use crate::report::{self, Format};

const MENU: &[&str] = &[
    "Ohm's law",
    "RC circuit",
    "RL circuit",
    "AC series RLC",
    "RC filter",
    "RLC transfer function",
    "BJT amplifier",
    "BJT collector current",
    "Op-amp",
    "Zener regulator",
    "Logic gate",
    "Silicon diode",
];

/// Raised when the input stream closes mid-session.
#[derive(Debug, thiserror::Error)]
#[error("end of input")]
struct EndOfInput;

/// Input forms, one per [`MENU`] entry.
fn page_forms() -> Vec<Form> {
    vec![
        Form::new("Ohm's Law")
            .with_optional("v", "Voltage V (V)")
            .with_optional("i", "Current I (A)")
            .with_optional("r", "Resistance R (Ω)"),
        Form::new("RC Circuit")
            .with_field("r", "Resistance R (Ω)")
            .with_field("c", "Capacitance C (F)")
            .with_field("v", "Voltage (V)")
            .with_optional("t", "Simulation time (s, blank for 5τ)"),
        Form::new("RL Circuit")
            .with_field("r", "Resistance R (Ω)")
            .with_field("l", "Inductance L (H)")
            .with_field("v", "Voltage (V)")
            .with_optional("t", "Simulation time (s, blank for 5τ)"),
        Form::new("AC Series RLC")
            .with_field("r", "Resistance R (Ω)")
            .with_field("l", "Inductance L (H)")
            .with_field("c", "Capacitance C (F)")
            .with_field("vp", "Peak voltage Vp (V)")
            .with_field("f", "Frequency f (Hz)"),
        Form::new("RC Filter")
            .with_field("r", "Resistance R (Ω)")
            .with_field("c", "Capacitance C (F)"),
        Form::new("RLC Transfer Function")
            .with_field("r", "Resistance R (Ω)")
            .with_field("l", "Inductance L (H)")
            .with_field("c", "Capacitance C (F)")
            .with_optional("f", "Evaluate at frequency (Hz, optional)"),
        Form::new("BJT Amplifier")
            .with_field("vcc", "Supply voltage Vcc (V)")
            .with_field("r1", "R1 (Ω)")
            .with_field("r2", "R2 (Ω)")
            .with_field("rc", "Collector resistor Rc (Ω)")
            .with_field("re", "Emitter resistor Re (Ω)")
            .with_optional(
                "beta",
                format!("Current gain β (blank for {})", bjt::AMPLIFIER_DEFAULT_BETA),
            ),
        Form::new("BJT Collector Current")
            .with_field("ib", "Base current Ib (A)")
            .with_optional(
                "beta",
                format!("Current gain β (blank for {})", bjt::DEFAULT_BETA),
            ),
        Form::new("Op-Amp")
            .with_field("rin", "Input resistor Rin (Ω)")
            .with_field("rf", "Feedback resistor Rf (Ω)"),
        Form::new("Zener Regulator")
            .with_field("vin", "Input voltage Vin (V)")
            .with_field("vz", "Zener voltage Vz (V)")
            .with_field("rl", "Minimum load resistance RL (Ω)"),
        Form::new("Logic Gate"),
        Form::new("Silicon Diode").with_field("i", "Forward current I (A)"),
    ]
}

pub struct Session<'a, R, W> {
    input: R,
    output: W,
    config: &'a CalcConfig,
    format: Format,
    forms: Vec<Form>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(input: R, output: W, config: &'a CalcConfig, format: Format) -> Self {
        Self {
            input,
            output,
            config,
            format,
            forms: page_forms(),
        }
    }

    /// Run the menu loop until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "Circuit Sandbox")?;
            for (i, item) in MENU.iter().enumerate() {
                writeln!(self.output, "  {:>2}) {item}", i + 1)?;
            }
            writeln!(self.output, "   q) Quit")?;

            let choice = match self.line("Select: ") {
                Ok(choice) => choice,
                Err(e) if e.is::<EndOfInput>() => return Ok(()),
                Err(e) => return Err(e),
            };
            let page = match choice.trim() {
                "q" | "Q" | "quit" | "0" => return Ok(()),
                other => match other.parse::<usize>() {
                    Ok(n) if (1..=MENU.len()).contains(&n) => n,
                    _ => {
                        writeln!(self.output, "Unknown choice: {other:?}\n")?;
                        continue;
                    }
                },
            };
            debug!(page = MENU[page - 1], "menu selection");

            match self.page(page) {
                Ok(outcome) => {
                    writeln!(self.output)?;
                    outcome
                        .report
                        .render(self.format, outcome.show_table, &mut self.output)?;
                }
                Err(e) if e.is::<EndOfInput>() => return Ok(()),
                Err(e) => writeln!(self.output, "Error: {e:#}\n")?,
            }
        }
    }

    fn page(&mut self, page: usize) -> Result<Outcome> {
        let mut form = std::mem::take(&mut self.forms[page - 1]);
        form.clear();
        let outcome = match page {
            1 => self.ohm(&mut form),
            2 => self.rc(&mut form),
            3 => self.rl(&mut form),
            4 => self.rlc(&mut form),
            5 => self.filter(&mut form),
            6 => self.transfer(&mut form),
            7 => self.amplifier(&mut form),
            8 => self.collector_current(&mut form),
            9 => self.opamp(&mut form),
            10 => self.zener(&mut form),
            11 => self.logic(),
            _ => self.diode(&mut form),
        };
        self.forms[page - 1] = form;
        outcome
    }

    fn line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(EndOfInput.into());
        }
        Ok(buf.trim().to_string())
    }

    /// Prompt for one field until the answer is usable.
    fn ask(&mut self, form: &mut Form, name: &str) -> Result<()> {
        let prompt = format!("{}: ", form.label(name)?);
        let optional = form.is_optional(name)?;
        loop {
            let answer = self.line(&prompt)?;
            match FieldValue::parse(&answer) {
                FieldValue::Invalid(raw) => {
                    writeln!(self.output, "  not a number: {raw:?} (examples: 4.7k, 10u, 2.2m)")?;
                }
                FieldValue::Blank if !optional => writeln!(self.output, "  {}", InputError::Blank)?,
                _ => return Ok(form.set(name, answer)?),
            }
        }
    }

    /// Ask every field in declaration order.
    fn fill(&mut self, form: &mut Form) -> Result<()> {
        for name in form.names() {
            self.ask(form, &name)?;
        }
        Ok(())
    }

    fn choose<T: Copy>(&mut self, prompt: &str, options: &[(&str, T)]) -> Result<T> {
        let names: Vec<&str> = options.iter().map(|(name, _)| *name).collect();
        let prompt = format!("{prompt} [{}]: ", names.join("/"));
        loop {
            let answer = self.line(&prompt)?.to_ascii_lowercase();
            if let Some((_, value)) = options.iter().find(|(name, _)| *name == answer) {
                return Ok(*value);
            }
            writeln!(self.output, "  choose one of: {}", names.join(", "))?;
        }
    }

    fn yes_no(&mut self, prompt: &str) -> Result<bool> {
        self.choose(prompt, &[("yes", true), ("no", false), ("y", true), ("n", false)])
    }

    fn ohm(&mut self, form: &mut Form) -> Result<Outcome> {
        writeln!(self.output, "Leave exactly one field blank.")?;
        self.fill(form)?;
        let solution = solve_ohms_law_fields(form.value("v")?, form.value("i")?, form.value("r")?)?;
        Ok(Outcome {
            report: report::ohms_law(&solution)?,
            show_table: false,
        })
    }

    fn rc(&mut self, form: &mut Form) -> Result<Outcome> {
        let mode = self.choose(
            "Mode",
            &[("charging", RcMode::Charging), ("discharging", RcMode::Discharging)],
        )?;
        self.fill(form)?;
        let resistance = form.require("r")?;
        let capacitance = form.require("c")?;
        let duration = form
            .optional("t")?
            .unwrap_or_else(|| suggested_duration(resistance * capacitance));
        let show_table = self.yes_no("Show samples?")?;

        let circuit = RcCircuit {
            resistance,
            capacitance,
            voltage: form.require("v")?,
            duration,
            mode,
        };
        let title = match mode {
            RcMode::Charging => "RC Circuit (Charging)",
            RcMode::Discharging => "RC Circuit (Discharging)",
        };
        Ok(Outcome {
            report: report::transient(title, &circuit.response(self.config.transient_points)?)?,
            show_table,
        })
    }

    fn rl(&mut self, form: &mut Form) -> Result<Outcome> {
        self.fill(form)?;
        let mut circuit = RlCircuit {
            resistance: form.require("r")?,
            inductance: form.require("l")?,
            voltage: form.require("v")?,
            duration: 0.0,
        };
        circuit.duration = match form.optional("t")? {
            Some(t) => t,
            None => suggested_duration(circuit.time_constant()?),
        };
        let show_table = self.yes_no("Show samples?")?;

        Ok(Outcome {
            report: report::transient(
                "RL Circuit (Current Rise)",
                &circuit.response(self.config.transient_points)?,
            )?,
            show_table,
        })
    }

    fn rlc(&mut self, form: &mut Form) -> Result<Outcome> {
        self.fill(form)?;
        let circuit = SeriesRlc {
            resistance: form.require("r")?,
            inductance: form.require("l")?,
            capacitance: form.require("c")?,
            peak_voltage: form.require("vp")?,
            frequency: form.require("f")?,
        };
        let analysis = circuit.analyze()?;
        let show_table = self.yes_no("Show waveforms?")?;
        let waveforms = if show_table {
            analysis.waveforms(self.config.waveform_periods, self.config.waveform_points)
        } else {
            Vec::new()
        };

        Ok(Outcome {
            report: report::series_rlc(&analysis, &waveforms)?,
            show_table,
        })
    }

    fn filter(&mut self, form: &mut Form) -> Result<Outcome> {
        let kind = self.choose(
            "Filter",
            &[("lowpass", FilterKind::Lowpass), ("highpass", FilterKind::Highpass)],
        )?;
        self.fill(form)?;
        let filter = RcFilter {
            resistance: form.require("r")?,
            capacitance: form.require("c")?,
            kind,
        };
        let show_table = self.yes_no("Show Bode samples?")?;

        Ok(Outcome {
            report: report::filter(&filter.analyze(self.config.bode_points)?)?,
            show_table,
        })
    }

    fn transfer(&mut self, form: &mut Form) -> Result<Outcome> {
        let output = self.choose(
            "Output across",
            &[
                ("resistor", RlcOutput::Resistor),
                ("inductor", RlcOutput::Inductor),
                ("capacitor", RlcOutput::Capacitor),
            ],
        )?;
        self.fill(form)?;
        let h = TransferFunction::series_rlc(
            form.require("r")?,
            form.require("l")?,
            form.require("c")?,
            output,
        )?;
        Ok(Outcome {
            report: report::transfer(&h, form.optional("f")?)?,
            show_table: false,
        })
    }

    fn amplifier(&mut self, form: &mut Form) -> Result<Outcome> {
        let topology = self.choose(
            "Configuration",
            &[
                ("ce", Topology::CommonEmitter),
                ("cb", Topology::CommonBase),
                ("cc", Topology::CommonCollector),
            ],
        )?;
        for name in form.names() {
            if name == "rc" && !topology.has_collector_resistor() {
                continue;
            }
            self.ask(form, &name)?;
        }

        let bias = DividerBias {
            vcc: form.require("vcc")?,
            r1: form.require("r1")?,
            r2: form.require("r2")?,
            rc: if topology.has_collector_resistor() {
                form.require("rc")?
            } else {
                0.0
            },
            re: form.require("re")?,
            beta: form.or_default("beta", bjt::AMPLIFIER_DEFAULT_BETA)?,
        };
        Ok(Outcome {
            report: report::amplifier(&bias.analyze(topology)?)?,
            show_table: false,
        })
    }

    fn collector_current(&mut self, form: &mut Form) -> Result<Outcome> {
        self.fill(form)?;
        let ib = form.require("ib")?;
        let beta = form.optional("beta")?;
        let ic = bjt::collector_current(ib, beta)?;
        Ok(Outcome {
            report: report::collector_current(ib, beta.unwrap_or(bjt::DEFAULT_BETA), ic)?,
            show_table: false,
        })
    }

    fn opamp(&mut self, form: &mut Form) -> Result<Outcome> {
        let mode = self.choose(
            "Configuration",
            &[
                ("inverting", OpAmpMode::Inverting),
                ("non-inverting", OpAmpMode::NonInverting),
            ],
        )?;
        self.fill(form)?;
        let analysis = opamp::analyze(mode, form.require("rin")?, form.require("rf")?)?;
        Ok(Outcome {
            report: report::opamp(&analysis)?,
            show_table: false,
        })
    }

    fn zener(&mut self, form: &mut Form) -> Result<Outcome> {
        self.fill(form)?;
        let design = ZenerRegulator {
            input_voltage: form.require("vin")?,
            zener_voltage: form.require("vz")?,
            load_resistance: form.require("rl")?,
        }
        .design()?;
        Ok(Outcome {
            report: report::zener(&design)?,
            show_table: false,
        })
    }

    fn diode(&mut self, form: &mut Form) -> Result<Outcome> {
        self.fill(form)?;
        let estimate = diode::forward_estimate(form.require("i")?)?;
        Ok(Outcome {
            report: report::diode(&estimate)?,
            show_table: false,
        })
    }

    fn logic(&mut self) -> Result<Outcome> {
        let gate = loop {
            match self.line("Gate (AND, OR, NAND, NOR, XOR, NOT, BUF): ")?.parse::<Gate>() {
                Ok(gate) => break gate,
                Err(e) => writeln!(self.output, "  {e}")?,
            }
        };
        let a = self.bit("Input A (0/1): ")?;
        let b = match gate.arity() {
            1 => None,
            _ => Some(self.bit("Input B (0/1): ")?),
        };
        let out = gate.evaluate(a, b)?;
        Ok(Outcome {
            report: report::logic(gate, a, b, out)?,
            show_table: false,
        })
    }

    fn bit(&mut self, prompt: &str) -> Result<Bit> {
        loop {
            match self.line(prompt)?.parse::<Bit>() {
                Ok(bit) => return Ok(bit),
                Err(e) => writeln!(self.output, "  {e}")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session_as(script: &str, format: Format) -> String {
        let config = CalcConfig::default();
        let mut out = Vec::new();
        Session::new(Cursor::new(script), &mut out, &config, format)
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn session(script: &str) -> String {
        session_as(script, Format::Text)
    }

    #[test]
    fn test_every_menu_entry_has_a_form() {
        assert_eq!(page_forms().len(), MENU.len());
    }

    #[test]
    fn test_quit_immediately() {
        let out = session("q\n");
        assert!(out.contains("Circuit Sandbox"));
        assert!(!out.contains("Error"));
    }

    #[test]
    fn test_eof_ends_session() {
        let out = session("1\n6\n");
        assert!(out.contains("Voltage V (V): "));
        assert!(!out.contains("Error"));
    }

    #[test]
    fn test_ohm_page_reprompts_on_bad_number() {
        let out = session("1\nabc\n\n2\n3\nq\n");
        assert!(out.contains("not a number: \"abc\""));
        assert!(out.contains("Calculated Voltage"));
        assert!(out.contains("6.0000V"));
    }

    #[test]
    fn test_errors_return_to_menu() {
        // All three fields given, then quit from the menu.
        let out = session("1\n6\n2\n3\nq\n");
        assert!(out.contains("Error: exactly two known values are required, got 3"));
        assert_eq!(out.matches("Circuit Sandbox").count(), 2);
    }

    #[test]
    fn test_unknown_menu_choice() {
        let out = session("42\nq\n");
        assert!(out.contains("Unknown choice: \"42\""));
    }

    #[test]
    fn test_blank_beta_uses_default() {
        let out = session("8\n20u\n\nq\n");
        assert!(out.contains("2.0000mA"));
    }

    #[test]
    fn test_samples_prompt_gates_table() {
        let shown = session("2\ncharging\n1k\n1u\n5\n\nyes\nq\n");
        assert!(shown.contains("Time(s)"));
        assert!(shown.contains("(500 points)"));

        let hidden = session("2\ncharging\n1k\n1u\n5\n\nno\nq\n");
        assert!(!hidden.contains("Time(s)"));
        assert!(hidden.contains("Time constant"));
    }

    #[test]
    fn test_logic_page() {
        let out = session("11\nxnor\nxor\n1\n1\nq\n");
        assert!(out.contains("unknown gate"));
        assert!(out.contains("1 XOR 1 = 0"));
    }

    #[test]
    fn test_opamp_attenuation_warning() {
        let out = session("9\ninverting\n10k\n1k\nq\n");
        assert!(out.contains("Warning:"));
        assert!(out.contains("-0.10"));
    }

    #[test]
    fn test_required_field_reprompts_on_blank() {
        let out = session("10\n\n12\n5.1\n510\nq\n");
        assert!(out.contains("  no value provided"));
        assert_eq!(out.matches("Input voltage Vin (V): ").count(), 2);
        assert!(out.contains("Zener Voltage Regulator Design"));
    }

    #[test]
    fn test_amplifier_blank_beta_uses_150() {
        let with = |beta: &str| session(&format!("7\ncc\n12\n10k\n2.2k\n1k\n{beta}\nq\n"));
        let blank = with("");
        assert!(blank.contains("Current gain β (blank for 150): "));
        assert!(!blank.contains("Collector resistor Rc"));
        assert_eq!(blank, with("150"));
        assert_ne!(blank, with("100"));
    }

    #[test]
    fn test_page_can_be_revisited() {
        let out = session("1\n6\n\n3\n1\n\n2\n3\nq\n");
        assert!(out.contains("Calculated Current"));
        assert!(out.contains("Calculated Voltage"));
        assert!(!out.contains("Error"));
    }

    #[test]
    fn test_diode_page() {
        let out = session("12\n20m\nq\n");
        assert!(out.contains("Silicon Diode (Forward Bias)"));
        assert!(out.contains("≈ 700.0000mV"));
        assert!(out.contains("14.0000mW"));
    }

    #[test]
    fn test_json_session_tags_unbounded_impedance() {
        let out = session_as("9\nnon-inverting\n1k\n9k\nq\n", Format::Json);
        assert!(out.contains("\"input_impedance\": \"inf\""));
    }
}
