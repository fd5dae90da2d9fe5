use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::fmt;

use kaprekar_types::{Group, GroupCount, LogEntry, SessionView, SpinRecord, Trace};

/// Spin rows shown in the history table.
const HISTORY_ROWS: usize = 20;

/// Values shown in the bankroll and stake series.
const SERIES_ENTRIES: usize = 12;

fn group_cell(group: Group) -> Cell {
    let cell = Cell::new(group);
    if group == Group::Z {
        cell.fg(Color::Green)
    } else {
        cell
    }
}

/// Latest values of a series, oldest first. Earlier values collapse to `...`.
fn format_series<T: fmt::Display>(values: &[T], limit: usize) -> String {
    let start = values.len().saturating_sub(limit);
    let shown = values[start..]
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    if start > 0 {
        format!("... {shown}")
    } else {
        shown
    }
}

pub fn display_history(history: &[SpinRecord]) {
    if history.is_empty() {
        println!("No spins yet.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Spin", "Group"]);

    let start = history.len().saturating_sub(HISTORY_ROWS);
    for (i, record) in history.iter().enumerate().skip(start) {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(record.outcome),
            group_cell(record.group),
        ]);
    }

    println!("Spin history");
    println!("{table}");
}

pub fn display_log(entries: &[LogEntry]) {
    println!("Kaprekar transformations");
    if entries.is_empty() {
        println!("  (none yet)");
        return;
    }
    for entry in entries {
        let mut flags = Vec::new();
        if entry.mirrored {
            flags.push("mirrored");
        }
        if !entry.converged {
            flags.push("did not converge");
        }
        if flags.is_empty() {
            println!("  Seed: {:04}", entry.seed);
        } else {
            println!("  Seed: {:04} ({})", entry.seed, flags.join(", "));
        }
        for step in &entry.steps {
            println!("    {step}");
        }
    }
}

pub fn display_trace(trace: &Trace) {
    println!("Seed: {:04}", trace.seed);
    if trace.steps.is_empty() {
        println!("  already at 6174");
    }
    for step in &trace.steps {
        println!("  {step}");
    }
    println!("  {} step(s)", trace.steps.len());
}

pub fn display_betting(view: &SessionView) {
    let betting = &view.betting;
    let start = view.config.starting_bank();
    let delta = betting.bankroll.saturating_sub(kaprekar_types::signed(start));

    println!("Bank & betting");
    println!("  Starting bank : {start}");
    println!("  Bankroll      : {} ({delta:+})", betting.bankroll);
    println!("  Bets placed   : {}", betting.stake_history.len());
    println!(
        "  Next stake    : {}",
        view.config.progression().stake(betting.step)
    );
    if let (Some(low), Some(high)) = (
        betting.bankroll_history.iter().min(),
        betting.bankroll_history.iter().max(),
    ) {
        println!("  Range         : {low} .. {high}");
    }
    println!(
        "  Bankroll path : {}",
        format_series(&betting.bankroll_history, SERIES_ENTRIES)
    );
    if !betting.stake_history.is_empty() {
        println!(
            "  Stakes        : {}",
            format_series(&betting.stake_history, SERIES_ENTRIES)
        );
    }
}

pub fn display_frequencies(frequencies: &[GroupCount]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Group", "Count"]);

    for entry in frequencies {
        table.add_row(vec![group_cell(entry.group), Cell::new(entry.count)]);
    }

    println!("Prediction zone: most frequent groups");
    println!("{table}");
}

pub fn display_session(view: &SessionView) {
    display_history(&view.history);
    println!();
    display_log(&view.recent_log);
    println!();
    display_betting(view);
    if let Some(frequencies) = &view.frequencies {
        println!();
        display_frequencies(frequencies);
    }
}
