pub mod roster_json;

pub use roster_json::{
    process_roster_validation, request_schema_json, validate_roster_json, RosterEntry,
    RosterValidationRequest, RosterValidationResponse, SCHEMA_VERSION,
};
