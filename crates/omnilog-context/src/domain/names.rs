//! Event names produced by the engine.

/// Emitted by `experience_loaded`.
pub const EXPERIENCE_LOADED: &str = "Experience Loaded";
/// Emitted by `experience_unloaded`.
pub const EXPERIENCE_UNLOADED: &str = "Experience Unloaded";
pub const APP_STARTED: &str = "App Started";
pub const APP_STOPPED: &str = "App Stopped";
pub const SESSION_STARTED: &str = "Session Started";
pub const SESSION_ENDED: &str = "Session Ended";
pub const AB_REGISTERED: &str = "AB Registered";
pub const HEARTBEAT: &str = "Heartbeat";

/// Payload key carrying an outcome's error code.
pub const ERROR_CODE_KEY: &str = "errorCode";
/// Payload key carrying an outcome's error message.
pub const ERROR_MESSAGE_KEY: &str = "errorMessage";
pub const TEST_NAME_KEY: &str = "testName";
pub const TEST_VARIANT_ID_KEY: &str = "testVariantId";

/// `"<flow> - Started"`
#[must_use]
pub fn flow_started(flow_name: &str) -> String {
    format!("{flow_name} - Started")
}

/// `"<flow> - Completed"`
#[must_use]
pub fn flow_completed(flow_name: &str) -> String {
    format!("{flow_name} - Completed")
}

/// `"<flow> - <step> Loaded"`
#[must_use]
pub fn step_loaded(flow_name: &str, step_name: &str) -> String {
    format!("{flow_name} - {step_name} Loaded")
}

/// `"<flow> - <step> Unloaded"`
#[must_use]
pub fn step_unloaded(flow_name: &str, step_name: &str) -> String {
    format!("{flow_name} - {step_name} Unloaded")
}

/// `"<flow> - <step> Completed"`
#[must_use]
pub fn step_completed(flow_name: &str, step_name: &str) -> String {
    format!("{flow_name} - {step_name} Completed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_names_follow_dash_convention() {
        assert_eq!(flow_started("signup"), "signup - Started");
        assert_eq!(flow_completed("signup"), "signup - Completed");
        assert_eq!(step_loaded("signup", "email"), "signup - email Loaded");
        assert_eq!(step_unloaded("signup", "email"), "signup - email Unloaded");
        assert_eq!(step_completed("signup", "email"), "signup - email Completed");
    }
}
