//! Shortcode allocation: custom code validation, random generation with
//! collision probing, and the time-derived fallback.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::activity_log::ActivityLog;
use crate::config::Config;
use crate::domain::clock::Clock;
use crate::domain::repositories::{LogRepository, RecordRepository};
use crate::error::AppError;
use crate::utils::code_generator::{
    DEFAULT_CODE_LENGTH, fallback_code, generate_code, validate_custom_code,
};

pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Tunables for [`ShortcodeAllocator`].
#[derive(Debug, Clone, PartialEq)]
pub struct AllocatorSettings {
    /// Length of randomly generated codes.
    pub code_length: usize,
    /// Number of random probes before falling back.
    pub max_attempts: usize,
    /// Check the fallback code against the repository once before returning it.
    pub recheck_fallback: bool,
}

impl Default for AllocatorSettings {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            recheck_fallback: false,
        }
    }
}

impl From<&Config> for AllocatorSettings {
    fn from(config: &Config) -> Self {
        Self {
            code_length: config.shortcode_length,
            max_attempts: config.max_generation_attempts,
            recheck_fallback: config.recheck_fallback_shortcode,
        }
    }
}

/// Produces shortcodes that are unique at the time of the check.
///
/// Allocation never writes records. The caller persists the record and the
/// repository's `create` re-checks uniqueness right before the write.
/// Generated and fallback codes are written to the activity log together
/// with the number of probes spent.
pub struct ShortcodeAllocator<R: RecordRepository, L: LogRepository> {
    repository: Arc<R>,
    activity: Arc<ActivityLog<L>>,
    clock: Arc<dyn Clock>,
    settings: AllocatorSettings,
}

impl<R: RecordRepository, L: LogRepository> ShortcodeAllocator<R, L> {
    pub fn new(
        repository: Arc<R>,
        activity: Arc<ActivityLog<L>>,
        clock: Arc<dyn Clock>,
        settings: AllocatorSettings,
    ) -> Self {
        Self {
            repository,
            activity,
            clock,
            settings,
        }
    }

    pub fn settings(&self) -> &AllocatorSettings {
        &self.settings
    }

    /// Returns a shortcode for a new record.
    ///
    /// A custom code is trimmed first; one that is empty after trimming is
    /// treated as absent. Otherwise a random code is generated, probing the
    /// repository up to `max_attempts` times before using the fallback.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidFormat`] if the custom code breaks the length or charset rules.
    /// Returns [`AppError::Collision`] if the custom code is taken, or if a re-checked fallback is.
    /// Returns [`AppError::StorageFailure`] if the repository cannot be read.
    pub async fn allocate(&self, custom: Option<&str>) -> Result<String, AppError> {
        match custom.map(str::trim).filter(|c| !c.is_empty()) {
            Some(code) => self.claim_custom(code),
            None => self.generate_unique().await,
        }
    }

    fn claim_custom(&self, code: &str) -> Result<String, AppError> {
        validate_custom_code(code)?;

        if self.repository.exists(code)? {
            return Err(AppError::collision(
                "This shortcode is already in use",
                json!({ "shortcode": code }),
            ));
        }

        Ok(code.to_string())
    }

    async fn generate_unique(&self) -> Result<String, AppError> {
        for attempt in 1..=self.settings.max_attempts {
            let code = generate_code(self.settings.code_length);

            if !self.repository.exists(&code)? {
                self.activity.info(
                    "Generated unique shortcode",
                    json!({ "shortcode": code, "attempts": attempt }),
                );
                return Ok(code);
            }

            tracing::debug!(attempt, "shortcode collision, retrying");
            tokio::task::yield_now().await;
        }

        let code = fallback_code(self.clock.now());
        self.activity.warn(
            "Using fallback shortcode generation",
            json!({ "shortcode": code, "attempts": self.settings.max_attempts }),
        );
        metrics::counter!("shortener_fallback_codes_total").increment(1);

        if self.settings.recheck_fallback && self.repository.exists(&code)? {
            return Err(AppError::collision(
                "Generated fallback shortcode is already in use",
                json!({ "shortcode": code }),
            ));
        }

        Ok(code)
    }
}
