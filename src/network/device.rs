// src/network/device.rs
use crate::stats::snapshot::{StatusSnapshot, SystemInfo};
use crate::types::RestartOutcome;
use crate::utils::error::MonitorError;
use chrono::Local;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Bound on every request made to a device
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Operations the monitor needs from a device
///
/// Implemented by [`DeviceClient`] for real hardware; tests provide
/// scripted devices.
#[allow(async_fn_in_trait)]
pub trait DeviceApi {
    /// Address the device is reached at
    fn ip(&self) -> &str;

    /// Reads the current device status
    async fn fetch_status(&self) -> Result<StatusSnapshot, MonitorError>;

    /// Asks the device to reboot
    async fn send_restart(&self) -> RestartOutcome;
}

/// HTTP client for a single device's system API
#[derive(Debug, Clone)]
pub struct DeviceClient {
    /// Address as configured
    ip: String,
    /// `GET` endpoint returning the status document
    info_url: Url,
    /// `POST` endpoint triggering a reboot
    restart_url: Url,
    /// Shared HTTP client (5 second timeout)
    client: Client,
}

impl DeviceClient {
    /// Creates a client for the device at `ip`
    ///
    /// `ip` may carry a port (`192.168.1.20:8080`).
    ///
    /// # Errors
    /// Returns `MonitorError::UrlError` if `ip` is not a usable host
    pub fn new(ip: &str, client: Client) -> Result<Self, MonitorError> {
        let base = device_url(ip)?;
        Ok(DeviceClient {
            ip: ip.to_string(),
            info_url: base.join("api/system/info")?,
            restart_url: base.join("api/system/restart")?,
            client,
        })
    }

    /// Builds the HTTP client shared by all device clients
    pub fn http_client() -> Result<Client, MonitorError> {
        Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
    }
}

impl DeviceApi for DeviceClient {
    fn ip(&self) -> &str {
        &self.ip
    }

    async fn fetch_status(&self) -> Result<StatusSnapshot, MonitorError> {
        let response = self.client.get(self.info_url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MonitorError::FetchError(format!(
                "{} returned {}",
                self.info_url, status
            )));
        }

        let body = response.bytes().await?;
        let info: SystemInfo = serde_json::from_slice(&body)?;
        log::debug!("{}: status body {} bytes", self.ip, body.len());

        Ok(StatusSnapshot::from_info(info, Local::now()))
    }

    async fn send_restart(&self) -> RestartOutcome {
        match self.client.post(self.restart_url.clone()).send().await {
            Ok(response) if response.status() == StatusCode::OK => RestartOutcome::Succeeded,
            Ok(response) => RestartOutcome::RejectedByDevice(response.status()),
            Err(e) => RestartOutcome::TransportFailed(e.to_string()),
        }
    }
}

/// Parses a configured device address into its `http://` base URL
///
/// # Errors
/// Returns `MonitorError::UrlError` for unparsable hosts, or
/// `MonitorError::ConfigError` if the address carries a path or query.
pub fn device_url(ip: &str) -> Result<Url, MonitorError> {
    let url = Url::parse(&format!("http://{}/", ip))?;
    if url.host_str().is_none() || url.path() != "/" || url.query().is_some() {
        return Err(MonitorError::ConfigError(format!(
            "Invalid device address '{}'",
            ip
        )));
    }
    Ok(url)
}
