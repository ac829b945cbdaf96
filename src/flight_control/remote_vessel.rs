use crate::flight_control::ports::{ActuationPort, PortError, TelemetryPort};
use crate::flight_control::telemetry::VesselSnapshot;
use crate::http_handler::{
    http_client::HTTPClient,
    http_request::{
        attitude_put::AttitudeRequest,
        autopilot_put::AutopilotRequest,
        rcs_put::RcsRequest,
        request_common::{JSONBodyHTTPRequestType, NoBodyHTTPRequestType},
        sas_put::SasRequest,
        stage_post::StageRequest,
        telemetry_get::TelemetryRequest,
        throttle_put::ThrottleRequest,
    },
    http_response::control::ControlResponse,
    http_response::response_common::HTTPError,
};
use crate::log;
use async_trait::async_trait;

/// The live vessel, reached through the simulation backend's REST API.
///
/// Implements both ports on top of one `HTTPClient`. Telemetry reads map to a
/// single GET, every actuation command to one mutator request; nothing is
/// retried here since the sequencer treats all port failures as fatal.
#[derive(Debug)]
pub struct RemoteVessel {
    client: HTTPClient,
}

impl RemoteVessel {
    pub fn new(base_url: &str) -> Self {
        Self { client: HTTPClient::new(base_url) }
    }

    fn actuation_err(e: HTTPError) -> PortError {
        PortError::ActuationFailed(e.to_string())
    }

    fn checked(response: ControlResponse, command: &str) -> Result<(), PortError> {
        if response.is_accepted() {
            Ok(())
        } else {
            Err(PortError::ActuationFailed(format!("{command} rejected by backend")))
        }
    }
}

#[async_trait]
impl TelemetryPort for RemoteVessel {
    async fn read_snapshot(&self) -> Result<VesselSnapshot, PortError> {
        let response = TelemetryRequest {}
            .send_request(&self.client)
            .await
            .map_err(|e| PortError::TelemetryUnavailable(e.to_string()))?;
        Ok(VesselSnapshot::from(response))
    }
}

#[async_trait]
impl ActuationPort for RemoteVessel {
    async fn set_throttle(&self, fraction: f64) -> Result<(), PortError> {
        let req = ThrottleRequest { throttle: fraction.clamp(0.0, 1.0) };
        let resp = req.send_request(&self.client).await.map_err(Self::actuation_err)?;
        Self::checked(resp, "set_throttle")
    }

    async fn set_target_pitch(&self, pitch_deg: f64) -> Result<(), PortError> {
        let req = AttitudeRequest { pitch: pitch_deg, heading: None };
        let resp = req.send_request(&self.client).await.map_err(Self::actuation_err)?;
        Self::checked(resp, "set_target_pitch")
    }

    async fn set_target_pitch_and_heading(
        &self,
        pitch_deg: f64,
        heading_deg: f64,
    ) -> Result<(), PortError> {
        let req = AttitudeRequest { pitch: pitch_deg, heading: Some(heading_deg) };
        let resp = req.send_request(&self.client).await.map_err(Self::actuation_err)?;
        Self::checked(resp, "set_target_pitch_and_heading")
    }

    async fn engage_autopilot(&self) -> Result<(), PortError> {
        let req = AutopilotRequest { engaged: true };
        let resp = req.send_request(&self.client).await.map_err(Self::actuation_err)?;
        Self::checked(resp, "engage_autopilot")
    }

    async fn disengage_autopilot(&self) -> Result<(), PortError> {
        let req = AutopilotRequest { engaged: false };
        let resp = req.send_request(&self.client).await.map_err(Self::actuation_err)?;
        Self::checked(resp, "disengage_autopilot")
    }

    async fn set_rcs(&self, enabled: bool) -> Result<(), PortError> {
        let req = RcsRequest { enabled };
        let resp = req.send_request(&self.client).await.map_err(Self::actuation_err)?;
        Self::checked(resp, "set_rcs")
    }

    async fn set_sas(&self, enabled: bool) -> Result<(), PortError> {
        let req = SasRequest { enabled };
        let resp = req.send_request(&self.client).await.map_err(Self::actuation_err)?;
        Self::checked(resp, "set_sas")
    }

    async fn activate_next_stage(&self) -> Result<(), PortError> {
        let resp =
            StageRequest {}.send_request(&self.client).await.map_err(Self::actuation_err)?;
        log!("Staged, vehicle now on stage {}", resp.stage());
        Ok(())
    }
}
