//! d20 角色表工具
//!
//! 載入參考資料與角色紀錄，輸出含衍生數值的角色表

mod config;
mod report;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use config::{OutputFormat, SheetConfig};
use dnd_core::{load_from_path, CharacterSheet, DataFile};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// d20 角色表工具
#[derive(Parser)]
#[command(name = "dnd-sheet")]
#[command(about = "Character sheets with derived statistics", long_about = None)]
#[command(version)]
struct Cli {
    /// 設定檔路徑（預設讀取目前目錄的 sheet.toml）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 資料檔路徑，覆蓋設定檔
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// 輸出格式，覆蓋設定檔
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 列出所有角色
    List,

    /// 顯示角色表
    Show {
        /// 角色名稱
        name: String,
    },

    /// 列出職業的法術
    Spells {
        /// 職業名稱
        class: String,
    },

    /// 檢查所有角色資料是否完整
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = SheetConfig::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(data = %config.data_path.display(), "loading data file");
    let data = load_from_path(&config.data_path)?;

    match cli.command {
        Command::List => list(&data),
        Command::Show { name } => show(&data, &name, config.format),
        Command::Spells { class } => spells(&data, &class),
        Command::Check => check(&data),
    }
}

fn list(data: &DataFile) -> Result<()> {
    for record in &data.characters {
        let classes = record
            .classes
            .iter()
            .map(|class_level| format!("{} {}", class_level.class, class_level.level))
            .collect::<Vec<_>>()
            .join(" / ");
        println!("{} ({}, {})", record.name, record.race, classes);
    }
    Ok(())
}

fn show(data: &DataFile, name: &str, format: OutputFormat) -> Result<()> {
    let record = data
        .find_character(name)
        .with_context(|| format!("找不到角色 {}", name))?;
    let character = data.compendium.resolve(record)?;
    let sheet = CharacterSheet::new(&character)?;

    match format {
        OutputFormat::Text => print!("{}", report::TextSheet(&sheet)),
        OutputFormat::Json => println!("{}", sheet.to_json()?),
    }
    Ok(())
}

fn spells(data: &DataFile, class: &str) -> Result<()> {
    if !data.compendium.classes.contains_key(class) {
        bail!("找不到職業 {}", class);
    }
    let list = report::SpellList {
        class,
        spells: data.compendium.spells_for_class(class),
    };
    print!("{}", list);
    Ok(())
}

/// 組裝並計算每個角色，列出所有不完整的資料
fn check(data: &DataFile) -> Result<()> {
    let mut failures = 0;
    for record in &data.characters {
        let result = data
            .compendium
            .resolve(record)
            .and_then(|character| CharacterSheet::new(&character).map(|_| ()));

        match result {
            Ok(()) => tracing::info!(character = %record.name, "ok"),
            Err(err) => {
                failures += 1;
                tracing::error!(character = %record.name, "{}", err);
            }
        }
    }

    if failures > 0 {
        bail!("{} 個角色資料不完整", failures);
    }
    println!("{} 個角色檢查通過", data.characters.len());
    Ok(())
}
