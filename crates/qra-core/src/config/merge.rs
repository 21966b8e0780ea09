//! Shallow merge of stored configuration records.

use serde_json::Value;

use super::model::Configuration;
use crate::error::{QraError, Result};

/// Result of merging a stored record over a configuration.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub config: Configuration,
    /// Fields taken from the stored record.
    pub applied: Vec<String>,
    /// Recognized fields whose stored value had the wrong shape, with the error.
    pub rejected: Vec<(String, String)>,
    /// Fields the configuration does not know about.
    pub ignored: Vec<String>,
}

/// Overlays the top-level fields of `stored` on `base`.
///
/// Each recognized field present in `stored` replaces the whole field of
/// `base`; nested records such as `menuStyles` are not merged entry by entry.
/// A field whose value does not fit is rejected on its own and the other
/// fields still apply.
pub fn shallow_merge(base: &Configuration, stored: &Value) -> Result<MergeOutcome> {
    let Some(stored) = stored.as_object() else {
        return Err(QraError::Serialization {
            format: "JSON".to_string(),
            message: "stored settings record is not an object".to_string(),
        });
    };

    let mut merged = serde_json::to_value(base)?;
    let mut applied = Vec::new();
    let mut rejected = Vec::new();
    let mut ignored = Vec::new();

    for (key, value) in stored {
        if !Configuration::FIELDS.contains(&key.as_str()) {
            ignored.push(key.clone());
            continue;
        }

        let mut candidate = merged.clone();
        candidate[key.as_str()] = value.clone();
        match serde_json::from_value::<Configuration>(candidate.clone()) {
            Ok(_) => {
                merged = candidate;
                applied.push(key.clone());
            }
            Err(e) => {
                tracing::warn!("Ignoring stored setting '{}': {}", key, e);
                rejected.push((key.clone(), e.to_string()));
            }
        }
    }

    let config: Configuration = serde_json::from_value(merged)?;

    Ok(MergeOutcome {
        config: config.normalized(),
        applied,
        rejected,
        ignored,
    })
}
