use std::fs::{self, File};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use simplelog::{Config, LevelFilter, WriteLogger};
use treeselect::prelude::*;

#[derive(Parser)]
#[command(name = "treeselect")]
#[command(about = "Run tree select actions over a JSON forest and print the dropdown", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON array of nodes ({"id", "label", "children", ...})
    #[arg(long)]
    data: PathBuf,

    /// JSON tree select config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the mode from the config
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Search input
    #[arg(long)]
    filter: Option<String>,

    #[arg(long)]
    select: Vec<String>,

    #[arg(long)]
    deselect: Vec<String>,

    #[arg(long)]
    expand: Vec<String>,

    #[arg(long)]
    select_all: bool,

    /// Write debug logs to this file
    #[arg(long)]
    log: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Tree,
    Flat,
    Multi,
    Single,
}

impl From<Mode> for SelectionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Tree => SelectionMode::TreeSelect,
            Mode::Flat => SelectionMode::TreeSelectFlat,
            Mode::Multi => SelectionMode::MultiSelect,
            Mode::Single => SelectionMode::Select,
        }
    }
}

fn run(cli: Cli) -> treeselect::Result<()> {
    let data = TreeNodeData::forest_from_json(&fs::read_to_string(&cli.data)?)?;
    let mut config = match &cli.config {
        Some(path) => serde_json::from_str::<TreeSelectConfig>(&fs::read_to_string(path)?)?,
        None => TreeSelectConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }

    let mut tree = TreeSelect::new(data, config, TreeSelectProps::new().default_dropdown_open(true));
    log::info!("Loaded {:?}", tree);

    for id in &cli.expand {
        tree.expand_node(Some(id));
    }
    if cli.select_all {
        tree.select_all();
    }
    for id in &cli.select {
        tree.select_node(Some(id));
    }
    for id in &cli.deselect {
        tree.deselect_node(Some(id));
    }
    if let Some(filter) = &cli.filter {
        tree.set_input_value(filter.as_str());
    }

    for event in tree.drain_events() {
        log::debug!("{:?}", event);
    }

    print_rows(&tree);
    println!();
    println!("selected: {}", tree.get_state().selected_ids.join(", "));
    println!("aggregate: {:?}", tree.aggregate_state());
    Ok(())
}

fn print_rows(tree: &TreeSelect) {
    let selection = tree.selection();
    for row in tree.dropdown_rows() {
        match row {
            DropdownRow::Input => println!("> {}", tree.input_value()),
            DropdownRow::SelectAll => {
                let mark = match tree.aggregate_state() {
                    SelectionAggregateState::All | SelectionAggregateState::EffectiveAll => "[x]",
                    SelectionAggregateState::Partial => "[-]",
                    SelectionAggregateState::None => "[ ]",
                };
                println!("{} Select all", mark);
            }
            DropdownRow::NoData => println!("(no data)"),
            DropdownRow::NoMatches => println!("(no matches)"),
            DropdownRow::Node(displayed) => {
                let Some(node) = tree.get_by_id(&displayed.id) else {
                    continue;
                };
                let mark = if selection.is_selected(&node.id) {
                    "[x]"
                } else if selection.is_partially_selected(&node.id) {
                    "[-]"
                } else {
                    "[ ]"
                };
                let toggle = match (node.is_expandable(), displayed.is_expanded) {
                    (false, _) => ' ',
                    (true, true) => '-',
                    (true, false) => '+',
                };
                let disabled = if node.disabled { " (disabled)" } else { "" };
                println!(
                    "{}{} {} {}{}",
                    "  ".repeat(displayed.depth),
                    toggle,
                    mark,
                    node.label,
                    disabled
                );
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Some(path) = &cli.log
        && let Ok(log_file) = File::create(path)
    {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
