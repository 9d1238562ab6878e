// Entry point and high-level CLI flow.
//
// With a subcommand, one report is printed and the process exits. Without
// one, a numbered menu lets the user reload the file and pick views, with
// the selectable hours, positions and guards taken from the loaded data.
use clap::Parser;
use shift_report::cache::{self, CachedLoad};
use shift_report::cli::{Cli, Command, ListKind};
use shift_report::config::ReportConfig;
use shift_report::error::Result;
use shift_report::query::ShiftQuery;
use shift_report::{output, reports, util};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read a single line of input after printing the common "Enter choice:" prompt.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask whether to go back to the menu after a report.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Report Selection (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        io::stdin().read_line(&mut buf).ok();
        match buf.trim().to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// List `values` with numbers and let the user pick one by number or by name.
fn pick_value(title: &str, values: &[String]) -> Option<String> {
    if values.is_empty() {
        println!("No {} available.\n", title);
        return None;
    }
    println!("Select {}:", title);
    for (i, v) in values.iter().enumerate() {
        println!("[{}] {}", i + 1, v);
    }
    let choice = read_choice();
    match choice.parse::<usize>() {
        Ok(n) if (1..=values.len()).contains(&n) => Some(values[n - 1].clone()),
        _ => Some(choice),
    }
}

fn load(cli: &Cli, cfg: &ReportConfig) -> Result<CachedLoad> {
    let loaded = cache::global().get_or_load(&cli.input, cfg.parse_mode)?;
    if loaded.reloaded {
        println!(
            "Processing dataset... ({} rows read, {} unique shifts)",
            util::format_int(loaded.report.total_rows),
            util::format_int(loaded.report.canonical_rows)
        );
        if loaded.report.duplicates_removed > 0 {
            println!(
                "Info: removed {} duplicate records.",
                util::format_int(loaded.report.duplicates_removed)
            );
        }
        if loaded.report.malformed_rows > 0 {
            println!(
                "Note: {} rows skipped due to malformed date or hour.",
                util::format_int(loaded.report.malformed_rows)
            );
        }
        println!();
    }
    Ok(loaded)
}

fn show_overview(query: &ShiftQuery) {
    println!("Overview\n");
    output::preview_table_rows(&[reports::overview(query.dataset())], 1);
}

fn show_top_guards(loaded: &CachedLoad, query: &ShiftQuery, cfg: &ReportConfig, out_dir: &Path) -> Result<()> {
    let data = query.dataset();
    show_overview(query);

    let ranking = reports::guard_ranking(data);
    println!("Most Active Guards (Top {} by total shifts)\n", cfg.top_n);
    output::preview_table_rows(&ranking, cfg.top_n);

    let hour_matrix = reports::guard_hour_matrix(data, cfg);
    println!("Top {} Guards - Shifts by Hour\n", cfg.matrix_top_guards);
    output::print_matrix("Guard", &hour_matrix);

    let position_matrix = reports::guard_position_matrix(data, cfg);
    println!("Top {} Guards - Shifts by Position\n", cfg.matrix_top_guards);
    output::print_matrix("Guard", &position_matrix);

    std::fs::create_dir_all(out_dir)?;
    output::write_csv(out_dir.join("top_guards.csv"), &ranking)?;
    output::write_matrix_csv(out_dir.join("guard_hour_matrix.csv"), "guard_name", &hour_matrix)?;
    output::write_matrix_csv(
        out_dir.join("guard_position_matrix.csv"),
        "guard_name",
        &position_matrix,
    )?;
    let summary = reports::generate_summary(data, &loaded.report, &loaded.fingerprint, cfg);
    output::write_json(out_dir.join("summary.json"), &summary)?;
    println!("(Full tables exported to {})\n", out_dir.display());
    Ok(())
}

fn show_hour(query: &ShiftQuery, hour: &str, cfg: &ReportConfig) {
    let leaders = reports::hour_leaders(query, hour, cfg);
    println!("Top Guards for {}\n", hour);
    output::preview_table_rows(&leaders, cfg.top_n);
    println!("Top {} for {}:", cfg.preview_n, hour);
    for row in leaders.iter().take(cfg.preview_n) {
        println!("{}: {} shifts", row.guard_name, row.shifts);
    }
    println!();
}

fn show_position(query: &ShiftQuery, position: &str, cfg: &ReportConfig) {
    let leaders = reports::position_leaders(query, position, cfg);
    println!("Top Guards for {}\n", position);
    output::preview_table_rows(&leaders, cfg.top_n);
    println!("Top {} for {}:", cfg.preview_n, position);
    for row in leaders.iter().take(cfg.preview_n) {
        println!("{}: {} shifts", row.guard_name, row.shifts);
    }
    println!();
}

fn show_guard(query: &ShiftQuery, guard: &str, cfg: &ReportConfig) -> Result<()> {
    let profile = reports::guard_profile(query, guard, cfg)?;
    println!("Shift Statistics for {} (total shifts: {})\n", guard, profile.total_shifts);
    if profile.is_empty() {
        println!("No shift data found for the selected guard.\n");
        return Ok(());
    }

    println!("Position Breakdown\n");
    output::preview_table_rows(&profile.positions, profile.positions.len());
    println!("Hourly Distribution\n");
    output::preview_table_rows(&profile.hours, profile.hours.len());
    println!("Position vs Hour\n");
    output::print_matrix("Position", &profile.position_by_hour);
    println!("Recent Shifts\n");
    output::preview_table_rows(&profile.recent, cfg.recent_shifts);
    println!("Summary\n");
    output::preview_table_rows(&[profile.summary], 1);
    Ok(())
}

fn show_list(query: &ShiftQuery, kind: ListKind) {
    let values = match kind {
        ListKind::Hours => query.available_hours(),
        ListKind::Positions => query.available_positions(),
        ListKind::Guards => query.available_guards(),
    };
    for v in values {
        println!("{}", v);
    }
}

fn run_command(cli: &Cli, command: &Command, cfg: &ReportConfig) -> Result<()> {
    let loaded = load(cli, cfg)?;
    let query = ShiftQuery::new(loaded.dataset.clone());
    match command {
        Command::Overview => show_overview(&query),
        Command::Top => show_top_guards(&loaded, &query, cfg, &cli.out_dir)?,
        Command::Hour { label } => show_hour(&query, label, cfg),
        Command::Position { label } => show_position(&query, label, cfg),
        Command::Guard { name } => show_guard(&query, name, cfg)?,
        Command::List { kind } => show_list(&query, *kind),
    }
    Ok(())
}

fn run_menu(cli: &Cli, cfg: &ReportConfig) -> Result<()> {
    let mut loaded = load(cli, cfg)?;
    loop {
        println!("Select Report:");
        println!("[1] Reload the file");
        println!("[2] Top guards");
        println!("[3] Top guards by hour");
        println!("[4] Top guards by position");
        println!("[5] Individual guard analysis\n");
        let query = ShiftQuery::new(loaded.dataset.clone());
        let ran = match read_choice().as_str() {
            "1" => {
                match load(cli, cfg) {
                    Ok(l) => loaded = l,
                    Err(e) => eprintln!("Failed to load file: {}\n", e),
                }
                false
            }
            "2" => {
                if let Err(e) = show_top_guards(&loaded, &query, cfg, &cli.out_dir) {
                    eprintln!("Write error: {}", e);
                }
                true
            }
            "3" => {
                if let Some(hour) = pick_value("hour", &query.available_hours()) {
                    show_hour(&query, &hour, cfg);
                }
                true
            }
            "4" => {
                if let Some(position) = pick_value("position", &query.available_positions()) {
                    show_position(&query, &position, cfg);
                }
                true
            }
            "5" => {
                if let Some(guard) = pick_value("guard", &query.available_guards()) {
                    if let Err(e) = show_guard(&query, &guard, cfg) {
                        eprintln!("Report error: {}", e);
                    }
                }
                true
            }
            _ => {
                println!("Invalid choice. Please enter 1 to 5.\n");
                false
            }
        };
        if ran && !prompt_back_to_menu() {
            println!("Exiting the program.");
            return Ok(());
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    let cfg = cli.report_config();

    let result = match &cli.command {
        Some(command) => run_command(&cli, command, &cfg),
        None => run_menu(&cli, &cfg),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
