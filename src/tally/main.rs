use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::time::Duration;
use tally::api::{CmdMessage, InventoryApi, MessageLevel};
use tally::commands::WritePolicy;
use tally::config::StoreConfig;
use tally::error::{Result, TallyError};
use tally::model::Item;
use tally::store::http::HttpStore;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: InventoryApi<HttpStore>,
    config: StoreConfig,
    config_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Config is handled before any store is built: it must work (and fail
    // helpfully) even when the remote endpoint is wrong.
    if let Some(Commands::Config { key, value }) = &cli.command {
        return handle_config(key.as_deref(), value.clone());
    }

    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::List { search }) => handle_list(&mut ctx, search),
        Some(Commands::Add { name }) => handle_add(&mut ctx, &name),
        Some(Commands::Remove { name }) => handle_remove(&mut ctx, &name),
        Some(Commands::Purge { name }) => handle_purge(&mut ctx, &name),
        Some(Commands::Search { term }) => handle_list(&mut ctx, Some(term)),
        Some(Commands::Config { .. }) => unreachable!("handled above"),
        None => handle_list(&mut ctx, None),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("tally={}", level).parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn config_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("TALLY_HOME") {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "tally", "tally")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| TallyError::Config("could not determine config dir".to_string()))
}

fn init_context() -> Result<AppContext> {
    let config_dir = config_dir()?;
    let config = StoreConfig::load(&config_dir)?;

    let mut store = HttpStore::with_timeout(
        &config.base_url,
        &config.collection,
        Duration::from_secs(config.timeout_secs),
    );
    if let Some(key) = &config.api_key {
        store = store.with_api_key(key);
    }

    let policy = if config.checked_writes {
        WritePolicy::Checked
    } else {
        WritePolicy::Unguarded
    };
    let api = InventoryApi::new(store).with_write_policy(policy);

    Ok(AppContext {
        api,
        config,
        config_dir,
    })
}

fn handle_list(ctx: &mut AppContext, search: Option<String>) -> Result<()> {
    ctx.api.refresh()?;
    if let Some(term) = search {
        ctx.api.set_search(&term);
    }
    print_items(ctx.api.filtered());
    Ok(())
}

fn handle_add(ctx: &mut AppContext, name: &str) -> Result<()> {
    let result = ctx.api.add_item(name)?;
    print_messages(&result.messages);
    print_items(ctx.api.filtered());
    Ok(())
}

fn handle_remove(ctx: &mut AppContext, name: &str) -> Result<()> {
    let result = ctx.api.remove_item(name)?;
    print_messages(&result.messages);
    print_items(ctx.api.filtered());
    Ok(())
}

fn handle_purge(ctx: &mut AppContext, name: &str) -> Result<()> {
    let result = ctx.api.purge_item(name)?;
    print_messages(&result.messages);
    print_items(ctx.api.filtered());
    Ok(())
}

fn handle_config(key: Option<&str>, value: Option<String>) -> Result<()> {
    let dir = config_dir()?;
    let mut config = StoreConfig::load(&dir)?;

    match (key, value) {
        (None, _) => print_config(&config),
        (Some(key), None) => {
            let shown = match key {
                "base-url" => config.base_url.clone(),
                "collection" => config.collection.clone(),
                "api-key" => mask_key(config.api_key.as_deref()),
                "timeout" => config.timeout_secs.to_string(),
                "checked-writes" => config.checked_writes.to_string(),
                other => return Err(TallyError::Config(format!("unknown key: {}", other))),
            };
            println!("{} = {}", key, shown);
        }
        (Some(key), Some(value)) => {
            config.set(key, &value)?;
            config.save(&dir)?;
            println!("{} updated", key);
        }
    }
    Ok(())
}

fn print_config(config: &StoreConfig) {
    println!("base-url       = {}", config.base_url);
    println!("collection     = {}", config.collection);
    println!("api-key        = {}", mask_key(config.api_key.as_deref()));
    println!("timeout        = {}", config.timeout_secs);
    println!("checked-writes = {}", config.checked_writes);
}

fn mask_key(key: Option<&str>) -> String {
    match key {
        Some(_) => "********".to_string(),
        None => "(unset)".to_string(),
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_items(items: &[Item]) {
    if items.is_empty() {
        println!("No items tracked.");
        return;
    }

    let name_width = items
        .iter()
        .map(|item| item.name.width())
        .max()
        .unwrap_or(0);

    for item in items {
        let padding = name_width.saturating_sub(item.name.width());
        println!(
            "  {}{}  {}",
            item.name,
            " ".repeat(padding),
            format!("x{}", item.quantity).cyan()
        );
    }
}
