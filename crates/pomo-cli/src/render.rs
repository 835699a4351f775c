//! Terminal rendering for sessions and reports.

use std::io::Write;
use std::process::{Command, Stdio};

use colored::{ColoredString, Colorize};
use pomo_core::report::{format_clock, format_minutes, format_remaining, GraphReport};
use pomo_core::{
    ClockSnapshot, ClockState, Notifier, Rating, Ratio, SessionKind, SessionMode, SessionObserver,
    SessionOutcome, TodaySummary,
};

const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";
const SPINNER: [&str; 8] = ["⡇", "⠏", "⠛", "⠹", "⢸", "⣰", "⣤", "⣆"];
/// Stopwatch ticks between redraws.
const STOPWATCH_REDRAW_TICKS: u64 = 10;
const LABEL_WIDTH: usize = 9;

fn kind_color(kind: SessionKind, text: &str) -> ColoredString {
    match kind {
        SessionKind::Focus => text.green(),
        SessionKind::Rest => text.magenta(),
    }
}

fn rating_color(rating: Rating, text: &str) -> ColoredString {
    match rating {
        Rating::Good => text.green(),
        Rating::Bad => text.red(),
    }
}

/// Live countdown bar or stopwatch readout.
pub struct SessionPresenter<W: Write> {
    out: W,
    bar_width: usize,
    cursor_hidden: bool,
}

impl<W: Write> SessionPresenter<W> {
    pub fn new(out: W, bar_width: usize) -> Self {
        Self {
            out,
            bar_width,
            cursor_hidden: false,
        }
    }

    fn draw(&mut self, line: &str) {
        // Draw errors (closed pipe, detached terminal) must not end the session.
        let _ = write!(self.out, "\r{line}\x1b[K");
        let _ = self.out.flush();
    }

    fn show_cursor(&mut self) {
        if self.cursor_hidden {
            let _ = write!(self.out, "{SHOW_CURSOR}");
            let _ = self.out.flush();
            self.cursor_hidden = false;
        }
    }
}

impl<W: Write> SessionObserver for SessionPresenter<W> {
    fn on_start(&mut self, snapshot: &ClockSnapshot) {
        let _ = write!(self.out, "{HIDE_CURSOR}");
        self.cursor_hidden = true;
        let line = match snapshot.target_secs {
            Some(_) => countdown_line(snapshot, self.bar_width),
            None => stopwatch_line(snapshot),
        };
        self.draw(&line);
    }

    fn on_tick(&mut self, snapshot: &ClockSnapshot) {
        match snapshot.target_secs {
            Some(_) => {
                let line = countdown_line(snapshot, self.bar_width);
                self.draw(&line);
            }
            None if snapshot.ticks % STOPWATCH_REDRAW_TICKS == 0 => {
                let line = stopwatch_line(snapshot);
                self.draw(&line);
            }
            None => {}
        }
    }

    fn on_finish(&mut self, outcome: &SessionOutcome) {
        let line = finish_line(outcome);
        self.draw(&line);
        let _ = writeln!(self.out);
        self.show_cursor();
    }
}

impl<W: Write> Drop for SessionPresenter<W> {
    fn drop(&mut self) {
        self.show_cursor();
    }
}

pub fn countdown_line(snapshot: &ClockSnapshot, bar_width: usize) -> String {
    let progress = snapshot.progress().unwrap_or(0.0);
    let filled = ((progress * bar_width as f64).round() as usize).min(bar_width);
    let bar = format!(
        "{}{}",
        kind_color(snapshot.kind, &"━".repeat(filled)),
        "━".repeat(bar_width - filled).bright_black()
    );
    let remaining = format_remaining(snapshot.remaining_secs().unwrap_or(0));
    format!(" {} {} {}", snapshot.kind.label().yellow(), bar, remaining.cyan())
}

pub fn stopwatch_line(snapshot: &ClockSnapshot) -> String {
    let frame = (snapshot.ticks / STOPWATCH_REDRAW_TICKS) as usize % SPINNER.len();
    format!(
        "{} {} {}",
        SPINNER[frame].green(),
        snapshot.kind.label(),
        format_clock(snapshot.elapsed_secs).cyan()
    )
}

pub fn finish_line(outcome: &SessionOutcome) -> String {
    let elapsed = format_clock(outcome.elapsed_secs);
    match (outcome.mode, outcome.state) {
        (SessionMode::OpenEnded, _) => format!(
            "{} {} {}",
            "!".red().bold(),
            outcome.kind.label(),
            elapsed.green().bold()
        ),
        (SessionMode::FixedDuration { .. }, ClockState::Completed) => {
            format!(" {}", "Session complete!".green().bold())
        }
        (SessionMode::FixedDuration { .. }, _) => format!(
            " {} after {}, nothing recorded",
            "Session abandoned".red().bold(),
            elapsed
        ),
    }
}

/// Today's stats block.
pub fn render_summary(summary: &TodaySummary) -> String {
    let ratio = match (summary.ratio, summary.rating) {
        (Ratio::Defined(v), Some(rating)) => rating_color(rating, &format!("{v:.2}")).bold(),
        _ => "No rest today".red().bold(),
    };

    let rows = [
        (
            "Total time focused",
            kind_color(SessionKind::Focus, &format_minutes(summary.total_time_focused)),
        ),
        (
            "Total time rested",
            kind_color(SessionKind::Rest, &format_minutes(summary.total_time_rested)),
        ),
        (
            "Focus sessions completed",
            summary.focus_sessions_completed.to_string().bold(),
        ),
        (
            "Rest sessions completed",
            summary.rest_sessions_completed.to_string().bold(),
        ),
        ("F/R ratio", ratio),
    ];

    let mut out = format!("{}\n\n", "TODAY'S STATS".yellow().bold().underline());
    for (name, value) in rows {
        out.push_str(&format!("{name:<35}{value}\n"));
    }
    out
}

/// The F/R graph, or a "no data" notice.
pub fn render_graph(report: &GraphReport, days: usize, good_ratio: f64) -> String {
    let graph = match report {
        GraphReport::NoData => return format!("{}\n", "No data!".red().bold()),
        GraphReport::Graph(graph) => graph,
    };

    let mut out = format!("{}\n\n", format!("F/R RATIO GRAPH FOR THE PAST {days} DAYS").bold());
    out.push_str(&format!(
        "{}{}   {}{}\n\n",
        "■".green(),
        format!(" Good (above {good_ratio})").green().bold(),
        "■".red(),
        format!(" Bad ({good_ratio} or below)").red().bold(),
    ));

    for row in &graph.rows {
        let bar = if row.bar_len > 1 {
            "▇".repeat(row.bar_len)
        } else {
            "▏".to_string()
        };
        out.push_str(&format!(
            "{} : {} {}\n",
            format!("{:<LABEL_WIDTH$}", row.label).blue(),
            rating_color(row.rating, &bar),
            format!("{:.2}", row.value).bold()
        ));
    }

    let span = match days {
        7 => "week".to_string(),
        1 => "day".to_string(),
        n => format!("{n} days"),
    };
    out.push_str(&format!(
        "\nAverage of past {span}: {}\n",
        rating_color(graph.average_rating, &format!("{:.2}", graph.average)).bold()
    ));
    out
}

/// Rings the terminal bell, or runs the configured command.
pub struct TerminalNotifier {
    command: Option<String>,
}

impl TerminalNotifier {
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, kind: SessionKind) {
        let Some(command) = self.command.as_deref() else {
            print!("\x07");
            let _ = std::io::stdout().flush();
            return;
        };

        let (shell, flag) = if cfg!(windows) { ("cmd", "/C") } else { ("sh", "-c") };
        let spawned = Command::new(shell)
            .args([flag, command])
            .env("POMO_SESSION_KIND", kind.label())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        if let Err(e) = spawned {
            tracing::warn!(%command, error = %e, "notification command failed to start");
        }
    }
}
