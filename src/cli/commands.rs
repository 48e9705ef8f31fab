use crate::browser::replay::ScriptedSource;
use crate::browser::session::BrowserSession;
use crate::cli::config::AppConfig;
use crate::perception::facade::Perception;
use crate::snapshot::parse_candidates;

// ============================================================================
// parse subcommand
// ============================================================================

pub fn cmd_parse(file: &str, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(file)?;
    let elements = parse_candidates(&raw, &config.perception.parse);

    println!("{}", serde_json::to_string_pretty(&elements)?);
    Ok(())
}

// ============================================================================
// replay subcommand
// ============================================================================

/// Replay recorded snapshots and return the rendered reports in order.
pub fn replay_reports(
    files: &[String],
    config: &AppConfig,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let source = ScriptedSource::from_files(files)?;
    let mut perception = Perception::new(source, config.perception.clone())?;

    let mut reports = Vec::with_capacity(files.len());
    reports.push(perception.take_snapshot().render());
    while perception.driver().remaining() > 0 {
        reports.push(perception.observe().render());
    }

    Ok(reports)
}

pub fn cmd_replay(
    files: &[String],
    config: &AppConfig,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let reports = replay_reports(files, config)?;

    for (file, report) in files.iter().zip(&reports) {
        if verbose > 0 {
            eprintln!("=== {file} ===");
        }
        println!("{report}\n");
    }

    Ok(())
}

// ============================================================================
// live subcommand
// ============================================================================

pub fn cmd_live(
    url: &str,
    headed: bool,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = config.browser.clone();
    if headed {
        options.headless = false;
    }

    let mut session = BrowserSession::launch(&options)?;
    session.navigate(url)?;

    let mut perception = Perception::new(session, config.perception.clone())?;
    let observation = perception.take_snapshot();
    println!("{observation}");

    perception.into_driver().quit()?;

    if observation.is_error() {
        return Err(observation.render().into());
    }
    Ok(())
}
