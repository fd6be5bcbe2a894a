//! Subcommand implementations.
//!
//! Each command writes to the given writer so it can be exercised without
//! spawning the binary. `run` returns `Ok(false)` when the command completed
//! but the answer was negative (e.g. a package does not exist).

use crate::cli::{Cli, Command};
use crate::config::PkgIdConfig;
use crate::error::Result;
use pkgid_core::{
    HttpClient, SimilarityOptions, SimilarityResult, is_platform_specific, normalize,
    platform_target,
};
use pkgid_npm::{NpmPackage, NpmRegistry};
use serde::Serialize;
use std::io::Write;

/// Platform classification of one name, as printed by `pkgid platform --json`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PlatformReport<'a> {
    pub name: &'a str,
    pub platform_specific: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abi: Option<&'a str>,
}

impl<'a> PlatformReport<'a> {
    pub fn new(name: &'a str) -> Self {
        let target = platform_target(name);
        Self {
            name,
            platform_specific: target.is_some(),
            os: target.map(|t| t.os),
            arch: target.map(|t| t.arch),
            abi: target.and_then(|t| t.abi),
        }
    }
}

/// Runs the parsed command line.
pub async fn run<W: Write>(cli: Cli, out: &mut W) -> Result<bool> {
    let mut config = PkgIdConfig::load_or_default(cli.config.as_deref())?;
    if let Some(registry) = cli.registry {
        config.registry.base_url = registry;
    }

    match cli.command {
        Command::Normalize { names } => {
            for name in &names {
                writeln!(out, "{}", normalize(name))?;
            }
            Ok(true)
        }
        Command::Platform { names, json } => {
            let reports: Vec<PlatformReport<'_>> =
                names.iter().map(|name| PlatformReport::new(name)).collect();
            write_platform(out, &reports, json)?;
            Ok(true)
        }
        Command::Similar {
            query,
            max_distance,
            limit,
            json,
        } => {
            let options = SimilarityOptions {
                max_edit_distance: max_distance.unwrap_or(config.similarity.max_edit_distance),
                search_limit: limit.unwrap_or(config.similarity.search_limit),
            };
            let registry = build_registry(&config)?;
            let results = registry.find_similar(&query, &options).await;
            write_similar(out, &results, json)?;
            Ok(true)
        }
        Command::Exists { name } => {
            let registry = build_registry(&config)?;
            let exists = registry.package_exists(&name).await;
            if exists {
                writeln!(out, "{} exists", name)?;
            } else {
                writeln!(out, "{} not found", name)?;
            }
            Ok(exists)
        }
        Command::Search {
            query,
            limit,
            hide_platform,
            json,
        } => {
            let registry = build_registry(&config)?;
            let limit = limit.unwrap_or(config.similarity.search_limit);
            let mut packages = registry.search(&query, limit).await?;
            if hide_platform {
                packages.retain(|pkg| !is_platform_specific(&pkg.name));
            }
            write_search(out, &packages, json)?;
            Ok(true)
        }
    }
}

fn build_registry(config: &PkgIdConfig) -> Result<NpmRegistry> {
    let http = HttpClient::with_options(&config.registry.user_agent, config.registry.timeout())?;
    Ok(NpmRegistry::with_base_url(
        http,
        config.registry.base_url.as_str(),
    ))
}

fn write_platform<W: Write>(out: &mut W, reports: &[PlatformReport<'_>], json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, reports)?;
        writeln!(out)?;
        return Ok(());
    }

    for report in reports {
        match (report.os, report.arch) {
            (Some(os), Some(arch)) => match report.abi {
                Some(abi) => writeln!(out, "{}\tyes\t{}-{}-{}", report.name, os, arch, abi)?,
                None => writeln!(out, "{}\tyes\t{}-{}", report.name, os, arch)?,
            },
            _ => writeln!(out, "{}\tno", report.name)?,
        }
    }
    Ok(())
}

fn write_similar<W: Write>(out: &mut W, results: &[SimilarityResult], json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, results)?;
        writeln!(out)?;
        return Ok(());
    }

    for result in results {
        match &result.description {
            Some(description) => writeln!(
                out,
                "{}\t{}\t{}",
                result.name, result.similarity, description
            )?,
            None => writeln!(out, "{}\t{}", result.name, result.similarity)?,
        }
    }
    Ok(())
}

fn write_search<W: Write>(out: &mut W, packages: &[NpmPackage], json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, packages)?;
        writeln!(out)?;
        return Ok(());
    }

    for pkg in packages {
        match &pkg.description {
            Some(description) => writeln!(out, "{}\t{}", pkg.name, description)?,
            None => writeln!(out, "{}", pkg.name)?,
        }
    }
    Ok(())
}
