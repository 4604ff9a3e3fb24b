//! Dependency key command - show the key a compiled entry is matched by

use crate::cli::args::DependencyKeyArgs;
use crate::error::{RelmatchError, RelmatchResult};
use crate::manifest::CompiledMatchRequest;
use crate::matching::dependency_key_for;

/// Execute the dependency-key command
pub async fn execute(args: DependencyKeyArgs) -> RelmatchResult<()> {
    let request = CompiledMatchRequest::from_file(&args.manifest).await?;

    let key = dependency_key_for(&request, &args.package).ok_or_else(|| {
        RelmatchError::User(format!(
            "Package '{}' not found in {}",
            args.package,
            args.manifest.display()
        ))
    })?;

    println!("{}", key);
    Ok(())
}
