//! Timeout configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::warn;

impl Validate for TimeoutConfig {
    fn validate(&self) -> Result<(), String> {
        let named = [
            ("default", self.default_ms),
            ("api", self.api_ms),
            ("database", self.database_ms),
            ("file", self.file_ms),
            ("network", self.network_ms),
        ];

        for (name, value) in named {
            if value == 0 {
                return Err(format!("{} timeout must be greater than 0", name));
            }
            if value > self.max_ms {
                warn!(
                    "{} timeout {}ms exceeds the recommended maximum of {}ms",
                    name, value, self.max_ms
                );
            }
        }

        if self.max_ms == 0 {
            return Err("Maximum timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
