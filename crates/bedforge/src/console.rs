//! Colorful console output for solver events.
//!
//! Provides a custom `tracing` layer that formats solver events with colors.
//! Installed by [`init`], which [`crate::run_solver`] calls on first use.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_FILTER: &str = "bedforge_solver=info";

/// Initializes the solver console output.
///
/// Safe to call multiple times - only the first call has effect. Honors
/// `RUST_LOG`, falling back to info-level solver events.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another subscriber may already be installed by the host.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
 ____           _ _____
| __ )  ___  __| |  ___|__  _ __ __ _  ___
|  _ \ / _ \/ _` | |_ / _ \| '__/ _` |/ _ \
| |_) |  __/ (_| |  _| (_) | | | (_| |  __/
|____/ \___|\__,_|_|  \___/|_|  \__, |\___|
                                |___/
"#;

    let version_line = format!(
        "        v{} - Patient Admission Scheduling\n",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("bedforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_solver_event(*metadata.level(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    phase: Option<String>,
    reason: Option<String>,
    name: Option<String>,
    phase_index: Option<u64>,
    duration_ms: Option<u64>,
    steps: Option<u64>,
    speed: Option<u64>,
    score: Option<u64>,
    initial: Option<u64>,
    lower_bound: Option<u64>,
    seed: Option<u64>,
    patients: Option<u64>,
    rooms: Option<u64>,
    horizon: Option<u64>,
    patient: Option<u64>,
    attempt: Option<u64>,
    day: Option<u64>,
    placed: Option<u64>,
    moves_evaluated: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let slot = match field.name() {
            "phase_index" => &mut self.phase_index,
            "duration_ms" => &mut self.duration_ms,
            "steps" => &mut self.steps,
            "speed" => &mut self.speed,
            "score" => &mut self.score,
            "initial" => &mut self.initial,
            "lower_bound" => &mut self.lower_bound,
            "seed" => &mut self.seed,
            "patients" => &mut self.patients,
            "rooms" => &mut self.rooms,
            "horizon" => &mut self.horizon,
            "patient" => &mut self.patient,
            "attempt" => &mut self.attempt,
            "day" => &mut self.day,
            "placed" => &mut self.placed,
            "moves_evaluated" => &mut self.moves_evaluated,
            _ => return,
        };
        *slot = Some(value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let slot = match field.name() {
            "event" => &mut self.event,
            "phase" => &mut self.phase,
            "reason" => &mut self.reason,
            "name" => &mut self.name,
            _ => return,
        };
        *slot = Some(value.to_string());
    }
}

fn format_solver_event(level: Level, v: &EventVisitor) -> String {
    match (level, v.event.as_deref()) {
        (_, Some("solve_start")) => format_solve_start(v),
        (_, Some("phase_start")) => format_phase_start(v),
        (_, Some("phase_end")) => format_phase_end(v),
        (_, Some("solve_end")) => format_solve_end(v),
        (_, Some("progress")) => format_progress(v),
        (_, Some("construction_restart")) => format_restart(v),
        (Level::WARN, Some("static_infeasibility")) => format_infeasible(v),
        _ => String::new(),
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} patients ({}), rooms ({}), horizon ({} days), lower bound ({}), seed ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        count(v.patients).bright_yellow(),
        count(v.rooms).bright_yellow(),
        count(v.horizon).bright_yellow(),
        count(v.lower_bound).bright_magenta(),
        v.seed.unwrap_or(0).bright_black()
    )
}

fn format_phase_start(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    let phase_index = v.phase_index.unwrap_or(0);

    format!(
        "{} {} {} {} phase ({}) started",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", phase).bright_cyan(),
        phase.white().bold(),
        phase_index.to_string().yellow()
    )
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    let phase_index = v.phase_index.unwrap_or(0);

    let mut line = format!(
        "{} {} {} {} phase ({}) ended: time spent ({}), best cost ({}), move evaluation speed ({}/sec), step total ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", phase).bright_cyan(),
        phase.white().bold(),
        phase_index.to_string().yellow(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_cost(v.score, v.lower_bound),
        count(v.speed).bright_magenta().bold(),
        count(v.steps).white()
    );
    if let Some(reason) = &v.reason {
        line.push_str(&format!(", stopped by ({})", reason.bright_blue()));
    }
    line
}

fn format_progress(v: &EventVisitor) -> String {
    format!(
        "    {} Step {:>7} | {} | {}/sec",
        "->".bright_blue(),
        count(v.steps).white(),
        format_cost(v.score, None),
        count(v.speed).bright_magenta()
    )
}

fn format_restart(v: &EventVisitor) -> String {
    format!(
        "{} {} {} attempt {} stuck on day {} at patient {}",
        timestamp().bright_black(),
        "DEBUG".bright_blue(),
        "[Construction]".bright_cyan(),
        count(v.attempt).yellow(),
        v.day.unwrap_or(0),
        v.patient.unwrap_or(0)
    )
}

fn format_infeasible(v: &EventVisitor) -> String {
    format!(
        "{} {} {} patient {} ({}) has no feasible room and stays unplaced",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        "[Construction]".bright_cyan(),
        v.patient.unwrap_or(0).bright_red(),
        v.name.as_deref().unwrap_or("?")
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let score = v.score.unwrap_or(0);
    let lower_bound = v.lower_bound.unwrap_or(0);
    let initial = v.initial.unwrap_or(score);

    let mut output = format!(
        "{} {} {} Solving ended: best cost ({}), stopped by ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        format_cost(Some(score), Some(lower_bound)),
        v.reason.as_deref().unwrap_or("unknown").bright_blue()
    );

    let border = "║".bright_cyan();
    output.push_str("\n\n");
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    for (label, value) in [
        ("Final cost:", score),
        ("Initial cost:", initial),
        ("Lower bound:", lower_bound),
        ("Gap:", score.saturating_sub(lower_bound)),
    ] {
        output.push_str(&format!(
            "{}  {:<18}{:>36}  {}",
            border,
            label,
            value.to_formatted_string(&Locale::en),
            border
        ));
        output.push('\n');
    }
    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

// Green at the lower bound, yellow above it.
fn format_cost(cost: Option<u64>, lower_bound: Option<u64>) -> String {
    let Some(cost) = cost else {
        return "N/A".white().to_string();
    };
    let text = cost.to_formatted_string(&Locale::en);
    match lower_bound {
        Some(lb) if cost <= lb => text.bright_green().to_string(),
        Some(_) => text.yellow().to_string(),
        None => text.white().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor(event: &str) -> EventVisitor {
        EventVisitor {
            event: Some(event.to_string()),
            ..EventVisitor::default()
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_format_cost_groups_digits() {
        assert!(format_cost(Some(12_345), None).contains("12,345"));
        assert!(format_cost(None, None).contains("N/A"));
    }

    #[test]
    fn test_phase_end_includes_reason() {
        let v = EventVisitor {
            phase: Some("Tabu Search".to_string()),
            steps: Some(1000),
            score: Some(40),
            reason: Some("iteration_limit".to_string()),
            ..visitor("phase_end")
        };
        let line = format_solver_event(Level::INFO, &v);
        assert!(line.contains("Tabu Search"));
        assert!(line.contains("1,000"));
        assert!(line.contains("iteration_limit"));
    }

    #[test]
    fn test_solve_end_box_shows_gap() {
        let v = EventVisitor {
            score: Some(140),
            initial: Some(400),
            lower_bound: Some(100),
            ..visitor("solve_end")
        };
        let output = format_solver_event(Level::INFO, &v);
        assert!(output.contains("Gap:"));
        assert!(output.contains("400"));
        assert!(output.contains("40 "));
    }

    #[test]
    fn test_infeasibility_only_at_warn() {
        let v = EventVisitor {
            patient: Some(3),
            name: Some("Isolation".to_string()),
            ..visitor("static_infeasibility")
        };
        assert!(format_solver_event(Level::WARN, &v).contains("Isolation"));
        assert!(format_solver_event(Level::INFO, &v).is_empty());
    }

    #[test]
    fn test_unknown_event_is_silent() {
        assert!(format_solver_event(Level::INFO, &visitor("step")).is_empty());
        assert!(format_solver_event(Level::INFO, &EventVisitor::default()).is_empty());
    }
}
