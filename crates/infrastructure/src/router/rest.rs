use super::duration::parse_routeros_duration;
use async_trait::async_trait;
use dnslist_application::ports::RouterApi;
use dnslist_domain::config::RouterConfig;
use dnslist_domain::{AddressListEntry, DomainError};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

const CONFLICT_DETAIL: &str = "already have such entry";
const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Deserialize)]
struct FilterRule {
    #[serde(rename = "dst-address-list", default)]
    dst_address_list: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AddressListRecord {
    #[serde(rename = ".id")]
    id: String,
    #[serde(default)]
    timeout: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RestError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    detail: String,
}

#[derive(Debug, Serialize)]
struct NewAddressListEntry<'a> {
    list: &'a str,
    address: String,
    timeout: String,
    dynamic: &'static str,
}

#[derive(Debug, Serialize)]
struct TimeoutUpdate {
    timeout: String,
}

struct RestReply {
    status: StatusCode,
    is_json: bool,
    body: String,
}

/// `RouterApi` over the RouterOS v7 REST interface.
///
/// One request is in flight at a time. The HTTP session is built on first use
/// and dropped after a transport failure, so the next call reconnects.
pub struct RouterOsRestClient {
    base_url: String,
    username: String,
    password: String,
    insecure_tls: bool,
    timeout: Duration,
    session: Mutex<Option<reqwest::Client>>,
}

impl RouterOsRestClient {
    pub fn new(config: &RouterConfig) -> Self {
        Self {
            base_url: format!("{}/rest", config.address.trim_end_matches('/')),
            username: config.username.clone(),
            password: config.password.clone(),
            insecure_tls: config.insecure_tls,
            timeout: config.request_timeout(),
            session: Mutex::new(None),
        }
    }

    fn build_session(&self) -> Result<reqwest::Client, DomainError> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .danger_accept_invalid_certs(self.insecure_tls)
            .user_agent(concat!("dnslist/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::RouterTransport(format!("Failed to build HTTP client: {e}")))
    }

    async fn call<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<RestReply, DomainError> {
        let mut session = self.session.lock().await;
        let client = match session.as_ref() {
            Some(client) => client.clone(),
            None => {
                let client = self.build_session()?;
                *session = Some(client.clone());
                client
            }
        };

        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "RouterOS request");

        let mut request = client
            .request(method, &url)
            .basic_auth(&self.username, Some(&self.password));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let is_json = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .is_some_and(|value| value.starts_with(JSON_CONTENT_TYPE));
            let body = response.text().await?;
            Ok::<_, reqwest::Error>(RestReply {
                status,
                is_json,
                body,
            })
        };

        match exchange.await {
            Ok(reply) => Ok(reply),
            Err(e) => {
                *session = None;
                warn!(url = %url, error = %e, "RouterOS request failed, session reset");
                Err(DomainError::RouterTransport(e.to_string()))
            }
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, DomainError> {
        let reply = self.call::<()>(Method::GET, path, query, None).await?;
        check_status(&reply)?;

        if !reply.is_json {
            return Err(DomainError::RouterApi(format!(
                "Unexpected content type from {path}"
            )));
        }

        serde_json::from_str(&reply.body).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Malformed RouterOS response from {path}: {e}"))
        })
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<(), DomainError> {
        let reply = self.call(method, path, &[], Some(body)).await?;
        check_status(&reply)
    }
}

fn check_status(reply: &RestReply) -> Result<(), DomainError> {
    let status = reply.status;
    if status.is_success() {
        return Ok(());
    }

    match status {
        StatusCode::BAD_REQUEST => {
            let error: RestError = serde_json::from_str(&reply.body).unwrap_or_default();
            if error.detail.contains(CONFLICT_DETAIL) {
                return Err(DomainError::AddressListEntryExists);
            }
            let reason = if error.detail.is_empty() {
                error.message
            } else {
                error.detail
            };
            Err(DomainError::RouterApi(reason))
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(DomainError::RouterAuth(format!("HTTP {status}")))
        }
        _ => Err(DomainError::RouterApi(format!("HTTP {status}"))),
    }
}

#[async_trait]
impl RouterApi for RouterOsRestClient {
    async fn list_rule_address_lists(&self) -> Result<Vec<String>, DomainError> {
        let rules: Vec<FilterRule> = self
            .get(
                "/ip/firewall/filter",
                &[("disabled", "false"), (".proplist", "dst-address-list")],
            )
            .await?;

        let mut lists: Vec<String> = Vec::new();
        for list in rules.into_iter().filter_map(|rule| rule.dst_address_list) {
            if !list.is_empty() && !lists.contains(&list) {
                lists.push(list);
            }
        }
        Ok(lists)
    }

    async fn find_address_list_entry(
        &self,
        address: Ipv4Addr,
        list: &str,
    ) -> Result<Option<AddressListEntry>, DomainError> {
        let address_str = address.to_string();
        let records: Vec<AddressListRecord> = self
            .get(
                "/ip/firewall/address-list",
                &[
                    ("address", address_str.as_str()),
                    ("list", list),
                    (".proplist", ".id,timeout"),
                ],
            )
            .await?;

        let Some(record) = records.into_iter().next() else {
            return Ok(None);
        };

        // Entries without a timeout are static and never expire.
        let timeout_secs = match record.timeout.as_deref() {
            Some(timeout) if !timeout.is_empty() => parse_routeros_duration(timeout)?,
            _ => u32::MAX,
        };

        Ok(Some(AddressListEntry {
            id: record.id,
            list: list.to_string(),
            address,
            timeout_secs,
        }))
    }

    async fn add_address_list_entry(
        &self,
        list: &str,
        address: Ipv4Addr,
        timeout_secs: u32,
    ) -> Result<(), DomainError> {
        let entry = NewAddressListEntry {
            list,
            address: address.to_string(),
            timeout: timeout_secs.to_string(),
            dynamic: "true",
        };
        self.send(Method::PUT, "/ip/firewall/address-list", &entry)
            .await
    }

    async fn set_address_list_timeout(
        &self,
        id: &str,
        timeout_secs: u32,
    ) -> Result<(), DomainError> {
        let update = TimeoutUpdate {
            timeout: timeout_secs.to_string(),
        };
        self.send(
            Method::PATCH,
            &format!("/ip/firewall/address-list/{id}"),
            &update,
        )
        .await
    }

    async fn flush_dns_cache(&self) -> Result<(), DomainError> {
        self.send(Method::POST, "/ip/dns/cache/flush", &serde_json::json!({}))
            .await
    }
}
