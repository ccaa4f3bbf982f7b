use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use std::path::Path;

use editlock::cli::{CliArgs, Command, ExportMode};
use editlock::config::EditorConfig;
use editlock::persistence::StateStore;
use editlock::region::RegionModel;
use editlock::script::{self, StepReport};
use editlock::GuardedEditor;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    editlock::tracing::init(args.log_options());

    let config = args.resolve_config();
    match args.command {
        Command::Load { file, json } => load(&config, &file, json),
        Command::Export { file, mode } => export(&config, &file, mode),
        Command::Replay {
            file,
            script,
            json,
            save_level,
        } => replay(&config, &file, &script, json, save_level),
        Command::State { level } => show_state(&config, level),
    }
}

fn open(config: &EditorConfig, file: &Path) -> Result<GuardedEditor> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let mut editor = GuardedEditor::new(config);
    editor
        .load(&source)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    Ok(editor)
}

fn state_store(config: &EditorConfig) -> Result<StateStore> {
    config
        .resolved_state_dir()
        .map(StateStore::new)
        .context("No state directory available; pass --state-dir")
}

fn regions_json(regions: &RegionModel) -> serde_json::Value {
    json!({
        "editableLines": regions.editable_lines(),
        "editableSections": regions.sections(),
        "startLevelEnd": regions.start_level_end(),
    })
}

fn print_regions(regions: &RegionModel) {
    let lines: Vec<String> = regions
        .editable_lines()
        .iter()
        .map(|line| line.to_string())
        .collect();
    println!("editable lines: [{}]", lines.join(", "));
    for (line, sections) in regions.sections() {
        let ranges: Vec<String> = sections
            .iter()
            .map(|s| format!("{}..{}", s.start, s.end))
            .collect();
        println!("sections on line {}: {}", line, ranges.join(", "));
    }
    if let Some(index) = regions.start_level_end() {
        println!("start level ends at line {}", index);
    }
}

fn load(config: &EditorConfig, file: &Path, as_json: bool) -> Result<()> {
    let editor = open(config, file)?;
    let session = editor.session();

    if as_json {
        let mut doc = regions_json(session.regions());
        doc["text"] = json!(editor.text());
        doc["properties"] = session.properties().clone();
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("{}", editor.text());
        println!("---");
        print_regions(session.regions());
    }
    Ok(())
}

fn export(config: &EditorConfig, file: &Path, mode: ExportMode) -> Result<()> {
    let editor = open(config, file)?;
    let text = match mode {
        ExportMode::Execution => editor.export_for_execution(),
        ExportMode::Storage => editor.export_for_storage(),
        ExportMode::Player => editor.export_player_contributions(),
    };
    print!("{}", text);
    Ok(())
}

fn replay(
    config: &EditorConfig,
    file: &Path,
    script_path: &Path,
    as_json: bool,
    save_level: Option<u32>,
) -> Result<()> {
    let mut editor = open(config, file)?;
    let steps_json = std::fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read {}", script_path.display()))?;
    let steps = script::parse(&steps_json)
        .with_context(|| format!("Invalid replay script {}", script_path.display()))?;

    let reports = editor.play_all(&steps);
    let rejected = reports
        .iter()
        .filter(|report| matches!(report, StepReport::Edit(verdict) if verdict.is_rejected()))
        .count();
    tracing::info!(steps = steps.len(), rejected, "Replay finished");

    if let Some(level) = save_level {
        let path = editor.save_to(&state_store(config)?, level)?;
        eprintln!("Saved level {} state to {}", level, path.display());
    }

    if as_json {
        let mut doc = regions_json(editor.session().regions());
        doc["text"] = json!(editor.text());
        doc["steps"] = json!(reports.iter().map(|r| r.to_string()).collect::<Vec<_>>());
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        for (i, report) in reports.iter().enumerate() {
            println!("{:>4}: {}", i + 1, report);
        }
        println!("---");
        println!("{}", editor.text());
        println!("---");
        print_regions(editor.session().regions());
    }
    Ok(())
}

fn show_state(config: &EditorConfig, level: u32) -> Result<()> {
    let store = state_store(config)?;
    let state = store.load(level)?;
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
