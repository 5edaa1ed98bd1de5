// src/store/policy.rs
// =============================================================================
// Decides whether PageStore may create a missing directory.
//
// Two implementations:
// - InteractivePolicy: asks on the terminal ("Create dirs '...'? [n]|y: ")
// - AlwaysCreate: says yes without asking (--create-all-paths)
// =============================================================================

use crate::prompt;
use std::io;
use std::path::Path;
use tracing::error;

pub trait CreationPolicy {
    fn should_create(&self, dir: &Path) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysCreate;

impl CreationPolicy for AlwaysCreate {
    fn should_create(&self, _dir: &Path) -> bool {
        true
    }
}

// Blocks the crawl until the operator answers; the default answer is "no"
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractivePolicy;

impl CreationPolicy for InteractivePolicy {
    fn should_create(&self, dir: &Path) -> bool {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let question = format!("Create dirs '{}'?", dir.display());

        match prompt::confirm(&mut stdin.lock(), &mut stdout.lock(), &question, false) {
            Ok(answer) => answer,
            Err(e) => {
                error!("could not read an answer for '{}': {}", dir.display(), e);
                false
            }
        }
    }
}

// Picks the policy matching the --create-all-paths flag
pub fn policy_for(create_all_paths: bool) -> Box<dyn CreationPolicy> {
    if create_all_paths {
        Box::new(AlwaysCreate)
    } else {
        Box::new(InteractivePolicy)
    }
}
