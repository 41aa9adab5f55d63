//! Application orchestrator.
//! Loads/merges config, initializes logging, validates the link directory and
//! runs either a plain allocation (--dir) or an atomic install (--install).

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, error, info};

use fdb_symlink::cli::Args;
use fdb_symlink::config::{create_template_config, load_config_from_xml, CONFIG_ENV};
use fdb_symlink::output as out;
use fdb_symlink::{
    default_config_path, ensure_link_dir, link_dir, publish_symlink_with, Config, OsLinker,
    SuffixGenerator, SymlinkError, TempSymlinkAllocator,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config / --init-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }
    if args.init_config {
        let path = default_config_path()?;
        create_template_config(&path)?;
        out::print_success(&format!(
            "A template fdb_symlink config was written to: {}",
            path.display()
        ));
        return Ok(());
    }

    // Config file first, CLI flags win. A file that fails to load is InvalidConfig.
    let mut cfg = load_config_from_xml()
        .map_err(|e| SymlinkError::InvalidConfig(format!("{e:#}")))?
        .unwrap_or_default();
    args.apply_overrides(&mut cfg);

    // Hold the guard until we return so the file appender flushes.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    debug!("Starting fdb_symlink: {:?}", args);

    if let Err(e) = execute(&args, &cfg) {
        error!(code = e.code(), kind = kind_of(&e), error = %e, "fdb_symlink failed");
        return Err(e.into());
    }
    Ok(())
}

fn execute(args: &Args, cfg: &Config) -> Result<(), SymlinkError> {
    cfg.validate()?;

    // clap guarantees TARGET is present unless --print-config/--init-config was given.
    let target = args
        .target
        .as_deref()
        .map(Path::new)
        .ok_or_else(|| SymlinkError::InvalidConfig("missing TARGET argument".into()))?;

    let allocator = TempSymlinkAllocator::new(SuffixGenerator::global(), OsLinker)
        .with_limits(cfg.limits());
    debug!(limits = ?allocator.limits(), "allocator ready");

    if let Some(dest) = args.install.as_deref() {
        ensure_link_dir(link_dir(dest))?;
        let installed = publish_symlink_with(&allocator, target, dest)?;
        out::print_path(&installed);
        return Ok(());
    }

    let dir = args
        .dir
        .as_deref()
        .ok_or_else(|| {
            SymlinkError::InvalidConfig("one of --dir or --install is required".into())
        })?;
    ensure_link_dir(dir)?;
    let temp = allocator
        .allocate(target, dir)
        .map_err(|e| SymlinkError::from_allocate(dir, e))?;
    info!(path = %temp.display(), link_target = %target.display(), "Allocated temp symlink");
    out::print_path(&temp);
    Ok(())
}

fn kind_of(e: &SymlinkError) -> &'static str {
    match e {
        SymlinkError::DirMissing(_) => "dir_missing",
        SymlinkError::NotADirectory(_) => "not_a_directory",
        SymlinkError::Exhausted { .. } => "exhausted",
        SymlinkError::Create { .. } => "create_failed",
        SymlinkError::Install { .. } => "install_failed",
        SymlinkError::InvalidConfig(_) => "invalid_config",
    }
}

fn print_config_location() {
    if let Some(cfg_env) = std::env::var_os(CONFIG_ENV) {
        out::print_info(&format!(
            "Using {CONFIG_ENV} (explicit):\n  {}\n",
            Path::new(&cfg_env).display()
        ));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return;
    }
    match default_config_path().context("determine default config path") {
        Ok(p) => {
            out::print_info(&format!("Default fdb_symlink config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info(
                    "No config file exists there yet. Run with --init-config to create a template.",
                );
            }
        }
        Err(e) => out::print_error(&format!("Could not determine a default config path: {e:#}")),
    }
}
