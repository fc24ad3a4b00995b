use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

use smartcity_boundary as json;
use smartcity_core::{
    entities::Id,
    gateways::{EntityGateway, Result as GatewayResult},
    kinds::*,
};

use crate::{into_ack, into_json, Result};

/// Smart City REST API
#[derive(Debug, Clone)]
pub struct Api {
    pub(crate) url: String,
    pub(crate) client: Client,
}

impl Api {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_owned(),
            client: Client::new(),
        }
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into().trim_end_matches('/').to_owned(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn resource_url(&self, resource: &str) -> String {
        format!("{}/{resource}", self.url)
    }

    fn record_url(&self, resource: &str, id: &Id) -> String {
        let encoded_id = utf8_percent_encode(id.as_str(), NON_ALPHANUMERIC);
        format!("{}/{resource}/{encoded_id}", self.url)
    }

    async fn fetch_list<W, T>(&self, resource: &str) -> Result<Vec<T>>
    where
        W: DeserializeOwned,
        T: From<W>,
    {
        let url = self.resource_url(resource);
        log::debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        let records: Vec<W> = into_json(response).await?;
        Ok(records.into_iter().map(T::from).collect())
    }

    async fn post_payload<P: Serialize>(&self, resource: &str, payload: &P) -> Result<()> {
        let url = self.resource_url(resource);
        log::debug!("POST {url}");
        let response = self.client.post(&url).json(payload).send().await?;
        into_ack(response).await
    }

    async fn put_payload<P: Serialize>(&self, resource: &str, id: &Id, payload: &P) -> Result<()> {
        let url = self.record_url(resource, id);
        log::debug!("PUT {url}");
        let response = self.client.put(&url).json(payload).send().await?;
        into_ack(response).await
    }

    async fn delete_record(&self, resource: &str, id: &Id) -> Result<()> {
        let url = self.record_url(resource, id);
        log::debug!("DELETE {url}");
        let response = self.client.delete(&url).send().await?;
        into_ack(response).await
    }
}

macro_rules! entity_gateway {
    ($kind:ty, $record:ty, $payload:ty) => {
        impl EntityGateway<$kind> for Api {
            async fn fetch_all(&self) -> GatewayResult<Vec<<$kind as EntityKind>::Record>> {
                Ok(self.fetch_list::<$record, _>(<$kind>::RESOURCE).await?)
            }
            async fn create(&self, payload: &<$kind as EntityKind>::Payload) -> GatewayResult<()> {
                let payload = <$payload>::from(payload.clone());
                Ok(self.post_payload(<$kind>::RESOURCE, &payload).await?)
            }
            async fn update(
                &self,
                id: &Id,
                payload: &<$kind as EntityKind>::Payload,
            ) -> GatewayResult<()> {
                let payload = <$payload>::from(payload.clone());
                Ok(self.put_payload(<$kind>::RESOURCE, id, &payload).await?)
            }
            async fn delete(&self, id: &Id) -> GatewayResult<()> {
                Ok(self.delete_record(<$kind>::RESOURCE, id).await?)
            }
        }
    };
}

entity_gateway!(Users, json::User, json::UserPayload);
entity_gateway!(Transports, json::Transport, json::TransportPayload);
entity_gateway!(Stations, json::Station, json::StationPayload);
entity_gateway!(Events, json::Event, json::EventPayload);
entity_gateway!(Zones, json::Zone, json::ZonePayload);
