#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use rampart_core::{CostTable, MatchConfig, OccupiedCell, UnitDescriptor};
use serde::{Deserialize, Serialize};

const SCENARIO_DOMAIN: &str = "rampart";
const SCENARIO_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded scenario payload.
pub(crate) const SCENARIO_HEADER: &str = "rampart:v1";
/// Delimiter used to separate the prefix, arena size and payload.
const FIELD_DELIMITER: char = ':';

/// One self-contained planning situation: configuration, descriptor table,
/// board occupancy and ledger balances.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Scenario {
    /// Match configuration the engine is built with.
    pub config: MatchConfig,
    /// Unit descriptor table advertised by the external engine.
    pub descriptors: Vec<UnitDescriptor>,
    /// Occupied cells composing the board snapshot.
    pub occupied: Vec<OccupiedCell>,
    /// Structure currency available this turn.
    pub structure_balance: u32,
    /// Mobile-unit currency available this turn.
    pub mobile_balance: u32,
    /// Per-kind unit costs reported by the ledger.
    pub costs: CostTable,
}

impl Scenario {
    /// Encodes the scenario into a single-line string suitable for sharing.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let json = serde_json::to_vec(self).expect("scenario serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!("{SCENARIO_HEADER}:{}:{encoded}", self.config.arena_size)
    }

    /// Decodes a scenario from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, ScenarioTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ScenarioTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(ScenarioTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(ScenarioTransferError::MissingVersion)?;
        let arena = parts.next().ok_or(ScenarioTransferError::MissingArenaSize)?;
        let payload = parts.next().ok_or(ScenarioTransferError::MissingPayload)?;

        if domain != SCENARIO_DOMAIN {
            return Err(ScenarioTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != SCENARIO_VERSION {
            return Err(ScenarioTransferError::UnsupportedVersion(version.to_owned()));
        }

        let arena_size = arena
            .trim()
            .parse::<i32>()
            .map_err(|_| ScenarioTransferError::InvalidArenaSize(arena.to_owned()))?;
        if arena_size <= 0 {
            return Err(ScenarioTransferError::InvalidArenaSize(arena.to_owned()));
        }

        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(ScenarioTransferError::InvalidEncoding)?;
        let decoded: Scenario =
            serde_json::from_slice(&bytes).map_err(ScenarioTransferError::InvalidPayload)?;

        if decoded.config.arena_size != arena_size {
            return Err(ScenarioTransferError::ArenaSizeMismatch {
                header: arena_size,
                payload: decoded.config.arena_size,
            });
        }

        Ok(decoded)
    }
}

/// Errors that can occur while decoding scenario transfer strings.
#[derive(Debug)]
pub(crate) enum ScenarioTransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded scenario.
    MissingPrefix,
    /// The encoded scenario did not contain a version segment.
    MissingVersion,
    /// The encoded scenario did not include the arena size.
    MissingArenaSize,
    /// The encoded scenario did not include the payload segment.
    MissingPayload,
    /// The encoded scenario used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded scenario used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The arena size could not be parsed from the encoded scenario.
    InvalidArenaSize(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
    /// The header arena size disagrees with the payload configuration.
    ArenaSizeMismatch {
        /// Arena size announced in the header segment.
        header: i32,
        /// Arena size carried by the decoded configuration.
        payload: i32,
    },
}

impl fmt::Display for ScenarioTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "scenario payload was empty"),
            Self::MissingPrefix => write!(f, "scenario string is missing the prefix"),
            Self::MissingVersion => write!(f, "scenario string is missing the version"),
            Self::MissingArenaSize => write!(f, "scenario string is missing the arena size"),
            Self::MissingPayload => write!(f, "scenario string is missing the payload"),
            Self::InvalidPrefix(prefix) => {
                write!(f, "scenario prefix '{prefix}' is not supported")
            }
            Self::UnsupportedVersion(version) => {
                write!(f, "scenario version '{version}' is not supported")
            }
            Self::InvalidArenaSize(arena) => {
                write!(f, "could not parse arena size '{arena}'")
            }
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode scenario payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not parse scenario payload: {error}")
            }
            Self::ArenaSizeMismatch { header, payload } => {
                write!(
                    f,
                    "header arena size {header} disagrees with payload arena size {payload}"
                )
            }
        }
    }
}

impl Error for ScenarioTransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}
