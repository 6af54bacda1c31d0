use std::time::Duration;

use anyhow::bail;
use clap::Parser;

mod cli;
mod config;
mod platforms;
mod probe;
mod report;
mod scrape;
#[cfg(test)]
mod tests;

use config::Config;
use probe::fetch::{Fetch, HttpFetcher};
use probe::ProbeEngine;
use report::Report;

fn main() -> anyhow::Result<()> {
    init_logging();

    let args = cli::Args::parse();
    let config = Config::load()?;

    match args.command {
        cli::Command::Search {
            username,
            concurrency,
            timeout,
            json,
            csv,
            found_only,
        } => {
            let username = match username {
                Some(username) => username,
                None => inquire::Text::new("Username:").prompt()?,
            };
            let username = username.trim().to_string();
            if username.is_empty() {
                bail!("username must not be empty");
            }

            let catalog = platforms::assemble(&config)?;
            if catalog.is_empty() {
                bail!("platform catalog is empty; check `disabled` in config.yaml");
            }

            let mut run_config = config;
            if let Some(concurrency) = concurrency {
                run_config.concurrency = concurrency;
            }
            if let Some(timeout) = timeout {
                run_config.timeout_secs = timeout;
            }
            if run_config.concurrency == 0 {
                bail!("concurrency must be greater than 0");
            }
            if run_config.timeout_secs == 0 {
                bail!("timeout must be greater than 0");
            }

            let engine = ProbeEngine::new(&run_config)?;

            log::info!("probing {} platforms for '{username}'", catalog.len());
            let report = runtime()?.block_on(engine.run(&username, &catalog));

            if let Some(path) = csv {
                let file = std::fs::File::create(&path)?;
                report.write_csv(file)?;
                log::info!("report written to {path}");
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_cards(&report, found_only);
            }

            Ok(())
        }

        cli::Command::Platforms {} => {
            let catalog = platforms::assemble(&config)?;
            for spec in &catalog {
                println!("{:<16} {:<24} {}", spec.key, spec.name, spec.url_template);
            }
            Ok(())
        }

        cli::Command::Meta { url, timeout } => {
            let fetcher = HttpFetcher::new(config.accept_invalid_certs)?;
            let timeout = Duration::from_secs(timeout.unwrap_or(config.timeout_secs));

            let outcome = runtime()?.block_on(fetcher.fetch(&url, timeout));
            let metadata = outcome
                .body
                .as_deref()
                .map(scrape::extract_profile_meta);

            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "status": outcome.status,
                    "final_url": outcome.final_url,
                    "metadata": metadata,
                }))?
            );
            Ok(())
        }
    }
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("userfind=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_cards(report: &Report, found_only: bool) {
    for result in report.iter() {
        if found_only && !result.found {
            continue;
        }

        let verdict = if result.found { "found" } else { "not found" };
        let status = result
            .status_code
            .map(|status| status.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!("{} [{}]: {verdict} (status {status})", result.platform, result.key);
        println!("  url: {}", result.url);
        if let Some(metadata) = &result.metadata {
            if let Some(image) = &metadata.image {
                println!("  image: {image}");
            }
            if let Some(description) = &metadata.description {
                println!("  description: {description}");
            }
        }
        println!();
    }

    println!(
        "found {} profile(s) across {} platforms",
        report.found_count(),
        report.len()
    );
}
