// parley/parley-client
//
// Copyright: 2026, Parley Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::ClientError;

pub const MIN_LOG_SIZE: u64 = 64;
pub const MAX_LOG_SIZE: u64 = 1_048_580;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AutoAwayMode {
    #[default]
    Off,
    Idle,
    Away,
}

/// The flat preference set the UI exposes with get/set commands. The
/// session layer consults the handful it acts on (`states`, `outtype`,
/// `gone_minutes`, the timer intervals); the rest belong to display and
/// notification behavior and are carried for the embedding layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub beep: bool,
    pub flash: bool,
    pub splash: bool,
    pub vercheck: bool,
    /// Show inbound typing notifications.
    pub intype: bool,
    /// Send composing/paused states while typing.
    pub outtype: bool,
    /// Send chat state notifications at all.
    pub states: bool,
    pub chlog: bool,
    pub grlog: bool,
    pub history: bool,
    pub titlebar_version: bool,
    pub mouse: bool,
    pub statuses: bool,
    pub notify_message: bool,
    pub notify_typing: bool,
    pub notify_invite: bool,
    pub notify_sub: bool,
    /// Reminder period in seconds, 0 disables.
    pub notify_remind: u32,
    /// Minutes of silence before a session is closed with `gone`, 0
    /// disables.
    pub gone_minutes: u32,
    pub autoaway_mode: AutoAwayMode,
    /// Idle minutes before auto-away kicks in.
    pub autoaway_time: u32,
    pub autoaway_message: Option<String>,
    /// Restore presence when activity resumes.
    pub autoaway_check: bool,
    /// Seconds before one reconnect attempt after a lost connection, 0
    /// disables.
    pub reconnect_seconds: u32,
    /// Keepalive ping interval in seconds, 0 disables.
    pub autoping_seconds: u32,
    pub log_maxsize: u64,
    pub priority: i8,
    pub theme: Option<String>,
    pub roster_visible: bool,
    pub roster_offline: bool,
    pub roster_resource: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            beep: false,
            flash: false,
            splash: true,
            vercheck: true,
            intype: true,
            outtype: true,
            states: true,
            chlog: false,
            grlog: false,
            history: false,
            titlebar_version: false,
            mouse: true,
            statuses: true,
            notify_message: true,
            notify_typing: false,
            notify_invite: true,
            notify_sub: true,
            notify_remind: 0,
            gone_minutes: 10,
            autoaway_mode: AutoAwayMode::Off,
            autoaway_time: 15,
            autoaway_message: None,
            autoaway_check: true,
            reconnect_seconds: 30,
            autoping_seconds: 0,
            log_maxsize: MAX_LOG_SIZE,
            priority: 0,
            theme: None,
            roster_visible: true,
            roster_offline: true,
            roster_resource: false,
        }
    }
}

impl Preferences {
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.log_maxsize < MIN_LOG_SIZE || self.log_maxsize > MAX_LOG_SIZE {
            return Err(ClientError::ValueOutOfRange {
                name: "log_maxsize",
                value: self.log_maxsize as i64,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preferences_are_valid() {
        assert!(Preferences::default().validate().is_ok());
    }

    #[test]
    fn test_log_maxsize_bounds() {
        let mut prefs = Preferences::default();
        prefs.log_maxsize = MIN_LOG_SIZE - 1;
        assert!(matches!(
            prefs.validate(),
            Err(ClientError::ValueOutOfRange { name: "log_maxsize", .. })
        ));

        prefs.log_maxsize = MIN_LOG_SIZE;
        assert!(prefs.validate().is_ok());
    }

    #[test]
    fn test_serde_round_trip() {
        let prefs = Preferences {
            autoaway_mode: AutoAwayMode::Idle,
            gone_minutes: 5,
            ..Default::default()
        };

        let json = serde_json::to_string(&prefs).unwrap();
        let parsed: Preferences = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, prefs);
    }
}
