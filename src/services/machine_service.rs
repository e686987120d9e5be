use tracing::{debug, info};

use crate::error::AppError;
use crate::models::{MachineGuide, MachineMatch};
use crate::store::SharedStore;

/// First guide, in the order given, whose key set contains one of the
/// candidate labels or the manual hint. Candidates must already be case-folded.
pub fn find_guide<'a>(
    guides: &'a [MachineGuide],
    candidates: &[String],
    hint: Option<&str>,
) -> Option<&'a MachineGuide> {
    guides.iter().find(|guide| {
        let keys = guide.match_keys();
        candidates.iter().any(|candidate| keys.contains(candidate))
            || hint.map_or(false, |hint| keys.iter().any(|key| key == hint))
    })
}

fn fold(value: &str) -> Option<String> {
    let folded = value.trim().to_lowercase();
    (!folded.is_empty()).then_some(folded)
}

#[derive(Clone)]
pub struct MachineService {
    store: SharedStore,
}

impl MachineService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Map classifier labels (and an optional typed machine name) to a guide.
    ///
    /// The catalog is scanned in id order and the first match wins, so two
    /// guides sharing an alias always resolve to the lower id.
    pub async fn identify(
        &self,
        labels: &[String],
        manual_hint: Option<&str>,
    ) -> Result<MachineMatch, AppError> {
        let candidates: Vec<String> = labels.iter().filter_map(|label| fold(label)).collect();
        let hint = manual_hint.and_then(fold);

        if candidates.is_empty() && hint.is_none() {
            return Err(AppError::validation(
                "Provide at least one label or a machine name",
            ));
        }

        let guides = self.store.machine_guides().await?;
        debug!(guides = guides.len(), candidates = ?candidates, ?hint, "Matching machine labels");

        match find_guide(&guides, &candidates, hint.as_deref()) {
            Some(guide) => {
                info!(label = %guide.label, "Machine identified");
                Ok(MachineMatch::Matched(guide.clone()))
            }
            None => {
                info!(labels = ?labels, "No machine guide matched");
                Ok(MachineMatch::NoMatch {
                    labels_tested: labels.to_vec(),
                })
            }
        }
    }
}
