//! Installing the global subscriber gets its own test binary so it cannot
//! collide with the `#[traced_test]` subscriber in the unit tests.

use agentmon_telemetry::EventLogger;

#[test]
fn init_twice_does_not_panic() {
    EventLogger::init_with("warn");
    EventLogger::init();
    EventLogger::log_event("startup", "subscriber installed");
}
