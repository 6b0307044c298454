//! Network messages - communication between App and Network layers

use crate::models::FormFields;
use crate::network::SubmitOutcome;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// POST the form to the given contact endpoint
    SubmitContact {
        id: u64,
        url: String,
        fields: FormFields,
    },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// A submission finished, one way or another
    Submitted {
        id: u64,
        outcome: SubmitOutcome,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Submitted { id, .. } => *id,
        }
    }
}
