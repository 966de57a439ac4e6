//! Thin CLI demonstrator: loads a browscap INI catalog and classifies a
//! single User-Agent string against it. Not part of the core matching
//! engine — see `browscap_rs::Catalog` for that.

use std::process::ExitCode;

use browscap_rs::Catalog;
use clap::Parser;

/// Classify a User-Agent string against a browscap INI catalog.
#[derive(Parser)]
#[command(name = "classify", version, about)]
struct Cli {
    /// Path to a browscap-format INI catalog file.
    catalog: std::path::PathBuf,

    /// The User-Agent string to classify.
    user_agent: String,

    /// Pattern batch size used when compiling the catalog (§4.6).
    #[arg(long, default_value_t = browscap_rs::DEFAULT_BATCH_SIZE)]
    batch_size: usize,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let catalog = match Catalog::load_path(&cli.catalog, cli.batch_size) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "loaded catalog version {} ({} sections, {} patterns)",
        catalog.version(),
        catalog.section_count(),
        catalog.pattern_count()
    );

    match catalog.classify(&cli.user_agent) {
        Some(record) => {
            println!("pattern:               {}", record.pattern);
            println!("browser:               {}", record.browser);
            println!("browser_maker:         {}", record.browser_maker);
            println!("version:               {}", record.version);
            println!("platform:              {}", record.platform);
            println!("platform_version:      {}", record.platform_version);
            println!("is_mobile_device:      {}", record.is_mobile_device.value);
            println!("is_tablet:             {}", record.is_tablet.value);
            println!("is_crawler:            {}", record.is_crawler.value);
            println!("device_type:           {}", record.device_type);
            println!("device_name:           {}", record.device_name);
            println!("device_code_name:      {}", record.device_code_name);
            println!("device_brand_name:     {}", record.device_brand_name);
            ExitCode::SUCCESS
        }
        None => {
            println!("no match");
            ExitCode::FAILURE
        }
    }
}
