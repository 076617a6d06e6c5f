//! Network management and station communication module
//!
//! This module owns the UDP connections to the VDES-1000 transceivers and
//! routes outgoing messages to them.

mod connection;

pub use self::connection::VdesConnection;

use std::collections::HashMap;
use std::sync::Arc;
use futures::future::join_all;

use crate::core::{AisChannel, Error, GatewayConfig, Result};
use crate::protocol::Message;

/// Registry of station connections built from a [`GatewayConfig`]
#[derive(Debug)]
pub struct Gateway {
    /// Connections in configuration order
    stations: Vec<Arc<VdesConnection>>,
    /// Station name to index in `stations`
    by_name: HashMap<String, usize>,
}

impl Gateway {
    /// Opens one connection per configured station
    pub async fn connect(config: GatewayConfig) -> Result<Self> {
        config.validate()?;

        let connections = join_all(config.stations.into_iter().map(VdesConnection::connect)).await;

        let mut stations = Vec::with_capacity(connections.len());
        let mut by_name = HashMap::with_capacity(connections.len());
        for connection in connections {
            let connection = connection?;
            by_name.insert(connection.name().to_string(), stations.len());
            stations.push(Arc::new(connection));
        }

        tracing::info!(stations = stations.len(), "Gateway started");
        Ok(Gateway { stations, by_name })
    }

    /// Number of stations
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Station names in configuration order
    pub fn station_names(&self) -> impl Iterator<Item = &str> {
        self.stations.iter().map(|s| s.name())
    }

    /// Looks a station connection up by name
    pub fn station(&self, name: &str) -> Result<Arc<VdesConnection>> {
        self.by_name
            .get(name)
            .map(|&i| Arc::clone(&self.stations[i]))
            .ok_or_else(|| Error::unknown_station(name))
    }

    /// Sends a message to one station, on its configured channel unless one is given
    pub async fn send_to(
        &self,
        name: &str,
        message: Option<&dyn Message>,
        channel: Option<AisChannel>,
    ) -> Result<usize> {
        let station = self.station(name)?;
        let channel = channel.unwrap_or(station.config().channel);
        station.send_message(message, channel).await
    }

    /// Sends a message to every station in parallel, each on its configured channel
    ///
    /// Returns one result per station, in configuration order.
    pub async fn broadcast(&self, message: Option<&dyn Message>) -> Vec<(String, Result<usize>)> {
        let sends = self.stations.iter().map(|station| async move {
            let result = station.send_message(message, station.config().channel).await;
            if let Err(e) = &result {
                tracing::warn!(station = %station.name(), error = %e, "Broadcast to station failed");
            }
            (station.name().to_string(), result)
        });
        join_all(sends).await
    }

    /// Closes every station connection
    pub async fn shutdown(&self) {
        join_all(self.stations.iter().map(|station| station.close())).await;
        tracing::info!(stations = self.stations.len(), "Gateway stopped");
    }
}
