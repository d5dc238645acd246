//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses against the record type
//! - Validate value ranges (ttl, interval, timeouts > 0)
//! - Detect a record pair that cannot represent two distinct entries
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FailoverConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::{Ipv4Addr, Ipv6Addr};

use thiserror::Error;

use crate::config::schema::FailoverConfig;
use crate::dns::types::RecordType;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{field} is not a valid http(s) URL: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{field} '{value}' is not a valid {record_type} value")]
    InvalidAddress {
        field: &'static str,
        value: String,
        record_type: RecordType,
    },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("primary and secondary {0} must differ")]
    NotDistinct(&'static str),
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &FailoverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.health_check.id.trim().is_empty() {
        errors.push(ValidationError::Empty("health_check.id"));
    }
    if config.health_check.failure_token.is_empty() {
        errors.push(ValidationError::Empty("health_check.failure_token"));
    }
    check_url("health_check.endpoint", &config.health_check.endpoint, &mut errors);

    if config.dns.hosted_zone_id.trim().is_empty() {
        errors.push(ValidationError::Empty("dns.hosted_zone_id"));
    }
    check_url("dns.endpoint", &config.dns.endpoint, &mut errors);

    let record = &config.record;
    if record.name.trim().is_empty() {
        errors.push(ValidationError::Empty("record.name"));
    }
    if record.ttl == 0 {
        errors.push(ValidationError::Zero("record.ttl"));
    }
    check_address("record.primary_address", &record.primary_address, record.record_type, &mut errors);
    check_address("record.secondary_address", &record.secondary_address, record.record_type, &mut errors);
    if !record.primary_address.is_empty() && record.primary_address == record.secondary_address {
        errors.push(ValidationError::NotDistinct("addresses"));
    }

    if record.primary_set_identifier.is_empty() {
        errors.push(ValidationError::Empty("record.primary_set_identifier"));
    }
    if record.secondary_set_identifier.is_empty() {
        errors.push(ValidationError::Empty("record.secondary_set_identifier"));
    }
    if !record.primary_set_identifier.is_empty()
        && record.primary_set_identifier == record.secondary_set_identifier
    {
        errors.push(ValidationError::NotDistinct("set identifiers"));
    }

    if config.controller.interval_secs == 0 {
        errors.push(ValidationError::Zero("controller.interval_secs"));
    }
    if config.controller.cycle_timeout_secs == 0 {
        errors.push(ValidationError::Zero("controller.cycle_timeout_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        _ => errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        }),
    }
}

fn check_address(
    field: &'static str,
    value: &str,
    record_type: RecordType,
    errors: &mut Vec<ValidationError>,
) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Empty(field));
        return;
    }

    let valid = match record_type {
        RecordType::A => value.parse::<Ipv4Addr>().is_ok(),
        RecordType::Aaaa => value.parse::<Ipv6Addr>().is_ok(),
        RecordType::Cname => !value.contains(char::is_whitespace),
    };
    if !valid {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
            record_type,
        });
    }
}
