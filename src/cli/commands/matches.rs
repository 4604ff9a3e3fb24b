//! Match commands - report packages the client can skip uploading

use crate::audit::{AuditLog, MatchRecord};
use crate::cli::args::{MatchArgs, OutputFormat};
use crate::config::schema::{StoreBackend, StoreConfig};
use crate::config::Config;
use crate::error::{RelmatchError, RelmatchResult};
use crate::manifest::{CompiledMatchRequest, SourceMatchRequest};
use crate::matching::Matcher;
use crate::store::{create_store, RecordStore};
use crate::ui;
use std::path::{Path, PathBuf};

/// Open the record store a match command reads from
///
/// `--store` wins over the configured backend. The memory backend only makes
/// sense when embedding the library: from the CLI it is always empty.
pub fn open_store(
    flag: Option<PathBuf>,
    config: &Config,
    config_path: &Path,
) -> RelmatchResult<Box<dyn RecordStore>> {
    let store_config = match flag {
        Some(path) => StoreConfig {
            backend: StoreBackend::File,
            path: Some(path),
        },
        None => config.store.clone(),
    };

    if store_config.backend == StoreBackend::Memory {
        return Err(RelmatchError::ConfigInvalid {
            path: config_path.to_path_buf(),
            reason: "[store] backend \"memory\" has no records to match against; \
                     set backend = \"file\" with a path, or pass --store"
                .to_string(),
        });
    }

    create_store(&store_config)
}

/// Execute the match command
pub async fn source(args: MatchArgs, store: &dyn RecordStore, config: &Config) -> RelmatchResult<()> {
    let request = SourceMatchRequest::from_file(&args.manifest).await?;
    let matched = Matcher::new(store).match_source(&request).await?;

    AuditLog::new(config)
        .log(
            "match.source",
            &MatchRecord::new(
                &request.name,
                &request.version,
                request.packages.len(),
                matched.len(),
            ),
        )
        .await;

    print_matches(&matched, args.format)
}

/// Execute the match-compiled command
pub async fn compiled(
    args: MatchArgs,
    store: &dyn RecordStore,
    config: &Config,
) -> RelmatchResult<()> {
    let request = CompiledMatchRequest::from_file(&args.manifest).await?;
    let matched = Matcher::new(store).match_compiled(&request).await?;

    AuditLog::new(config)
        .log(
            "match.compiled",
            &MatchRecord::new(
                &request.name,
                &request.version,
                request.compiled_packages.len(),
                matched.len(),
            ),
        )
        .await;

    print_matches(&matched, args.format)
}

fn print_matches(matched: &[String], format: OutputFormat) -> RelmatchResult<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(matched)?),
        OutputFormat::Plain => {
            if matched.is_empty() {
                ui::step_info("No matching packages");
            }
            for fingerprint in matched {
                println!("{}", fingerprint);
            }
        }
    }
    Ok(())
}
