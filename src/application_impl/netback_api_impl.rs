use super::ApiClient;
use crate::application_port::*;
use crate::domain_model::*;
use chrono::NaiveTime;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;

const STATUS_NOT_FOUND: u16 = 404;

pub struct NetbackApiImpl {
    client: Arc<ApiClient>,
}

impl NetbackApiImpl {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.client.execute(request).await?;
        Ok(response.decode()?)
    }

    /// Like `fetch`, but a body that is not a JSON array reads as empty.
    async fn fetch_list<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Vec<T>, ApiError> {
        let path = request.path.clone();
        let response = self.client.execute(request).await?;
        if !response.body.is_array() {
            tracing::debug!(%path, "list endpoint returned a non-array body");
            return Ok(Vec::new());
        }
        Ok(response.decode()?)
    }

    async fn discard(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.client.execute(request).await.map(|_| ())
    }
}

fn body<T: Serialize>(input: &T) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(input)?)
}

fn require(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::invalid_input(format!("{field} is required")));
    }
    Ok(())
}

fn ping_outcome(body: &Value) -> PingOutcome {
    if body.get("status").and_then(Value::as_str) == Some("success") {
        return PingOutcome {
            reachable: true,
            message: "device reachable".to_string(),
            details: body.get("data").cloned().unwrap_or(Value::Null),
        };
    }

    let data = body.get("data").cloned().unwrap_or_else(|| json!({}));
    let message = data
        .get("message")
        .or_else(|| body.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();
    PingOutcome {
        reachable: false,
        message,
        details: data,
    }
}

#[async_trait::async_trait]
impl NetbackApi for NetbackApiImpl {
    // region users

    async fn current_user(&self) -> Result<User, ApiError> {
        self.fetch(ApiRequest::get("/users/me/")).await
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.fetch_list(ApiRequest::get("/users/")).await
    }

    async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        self.fetch(ApiRequest::get(format!("/users/{id}/"))).await
    }

    async fn create_user(&self, input: &UserInput) -> Result<User, ApiError> {
        require(input.username.as_deref().unwrap_or_default(), "username")?;
        self.fetch(ApiRequest::post("/users/", body(input)?)).await
    }

    async fn update_user(&self, id: UserId, input: &UserInput) -> Result<User, ApiError> {
        self.fetch(ApiRequest::put(format!("/users/{id}/"), body(input)?))
            .await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        self.discard(ApiRequest::delete(format!("/users/{id}/"))).await
    }

    // endregion

    // region devices

    async fn list_devices(&self) -> Result<Vec<NetworkDevice>, ApiError> {
        self.fetch_list(ApiRequest::get("/networkdevice/")).await
    }

    async fn get_device(&self, id: DeviceId) -> Result<NetworkDevice, ApiError> {
        self.fetch(ApiRequest::get(format!("/networkdevice/{id}/")))
            .await
    }

    async fn create_device(&self, input: &DeviceInput) -> Result<NetworkDevice, ApiError> {
        require(&input.hostname, "hostname")?;
        require(&input.ip_address, "ip address")?;
        if input.vault_credential.is_some()
            && (input.custom_user.is_some() || input.custom_pass.is_some())
        {
            return Err(ApiError::invalid_input(
                "a device uses either a vault credential or custom credentials",
            ));
        }
        self.fetch(ApiRequest::post("/networkdevice/", body(input)?))
            .await
    }

    async fn update_device(
        &self,
        id: DeviceId,
        patch: &DevicePatch,
    ) -> Result<NetworkDevice, ApiError> {
        self.fetch(ApiRequest::patch(
            format!("/networkdevice/{id}/"),
            body(patch)?,
        ))
        .await
    }

    async fn delete_device(&self, id: DeviceId) -> Result<(), ApiError> {
        self.discard(ApiRequest::delete(format!("/networkdevice/{id}/")))
            .await
    }

    // endregion

    // region vault credentials

    async fn list_vault_credentials(&self) -> Result<Vec<VaultCredential>, ApiError> {
        self.fetch_list(ApiRequest::get("/vaultcredentials/")).await
    }

    async fn create_vault_credential(
        &self,
        input: &VaultCredentialInput,
    ) -> Result<VaultCredential, ApiError> {
        require(&input.nick, "nick")?;
        self.fetch(ApiRequest::post("/vaultcredentials/", body(input)?))
            .await
    }

    async fn update_vault_credential(
        &self,
        id: VaultCredentialId,
        input: &VaultCredentialInput,
    ) -> Result<VaultCredential, ApiError> {
        self.fetch(ApiRequest::put(
            format!("/vaultcredentials/{id}/"),
            body(input)?,
        ))
        .await
    }

    async fn delete_vault_credential(&self, id: VaultCredentialId) -> Result<(), ApiError> {
        self.discard(ApiRequest::delete(format!("/vaultcredentials/{id}/")))
            .await
    }

    // endregion

    // region catalog

    async fn list_manufacturers(&self) -> Result<Vec<Manufacturer>, ApiError> {
        self.fetch_list(ApiRequest::get("/manufacturers/")).await
    }

    async fn list_device_types(&self) -> Result<Vec<DeviceType>, ApiError> {
        self.fetch_list(ApiRequest::get("/devicetypes/")).await
    }

    // endregion

    // region backups

    async fn create_backup(&self, device_id: DeviceId) -> Result<Value, ApiError> {
        self.fetch(ApiRequest::post(
            format!("/networkdevice/{device_id}/backup/"),
            json!({}),
        ))
        .await
    }

    async fn last_backups(&self) -> Result<Vec<BackupSummary>, ApiError> {
        self.fetch_list(ApiRequest::get("/backups_last/")).await
    }

    async fn backup_history(&self, device_id: DeviceId) -> Result<Vec<BackupEntry>, ApiError> {
        self.fetch_list(ApiRequest::get(format!(
            "/networkdevice/{device_id}/backups/"
        )))
        .await
    }

    async fn backup_details(&self, backup_id: BackupId) -> Result<Backup, ApiError> {
        self.fetch(ApiRequest::get(format!("/backup/{backup_id}/")))
            .await
    }

    async fn compare_backups(
        &self,
        old: BackupId,
        new: BackupId,
    ) -> Result<BackupComparison, ApiError> {
        self.fetch(ApiRequest::get(format!("/backups/compare/{old}/{new}/")))
            .await
    }

    async fn compare_last_backups(
        &self,
        device_id: DeviceId,
    ) -> Result<BackupComparison, ApiError> {
        self.fetch(ApiRequest::get(format!(
            "/networkdevice/{device_id}/compare/"
        )))
        .await
    }

    // endregion

    // region locations

    async fn list_countries(&self) -> Result<Vec<Country>, ApiError> {
        self.fetch_list(ApiRequest::get("/countries/")).await
    }

    async fn create_country(&self, input: &CountryInput) -> Result<Country, ApiError> {
        require(&input.name, "name")?;
        self.fetch(ApiRequest::post("/countries/", body(input)?))
            .await
    }

    async fn list_sites(&self, country: Option<CountryId>) -> Result<Vec<Site>, ApiError> {
        let mut options = RequestOptions::default();
        if let Some(country) = country {
            options = options.with_query("country_id", country);
        }
        self.fetch_list(ApiRequest::get("/sites/").with_options(options))
            .await
    }

    async fn create_site(&self, input: &SiteInput) -> Result<Site, ApiError> {
        require(&input.name, "name")?;
        if input.country.is_none() {
            return Err(ApiError::invalid_input("country is required"));
        }
        self.fetch(ApiRequest::post("/sites/", body(input)?)).await
    }

    async fn list_areas(
        &self,
        site: Option<SiteId>,
        country: Option<CountryId>,
    ) -> Result<Vec<Area>, ApiError> {
        let options = match (site, country) {
            (Some(site), _) => RequestOptions::default().with_query("site_id", site),
            (None, Some(country)) => RequestOptions::default().with_query("country_id", country),
            (None, None) => RequestOptions::default(),
        };
        self.fetch_list(ApiRequest::get("/areas/").with_options(options))
            .await
    }

    async fn create_area(&self, input: &AreaInput) -> Result<Area, ApiError> {
        require(&input.name, "name")?;
        if input.site.is_none() {
            return Err(ApiError::invalid_input("site is required"));
        }
        self.fetch(ApiRequest::post("/areas/", body(input)?)).await
    }

    // endregion

    // region schedule

    async fn backup_schedule(&self) -> Result<BackupSchedule, ApiError> {
        match self.fetch(ApiRequest::get("/backup-config/schedule/")).await {
            Err(ApiError::Status {
                status: STATUS_NOT_FOUND,
                ..
            }) => Ok(BackupSchedule {
                scheduled_time: None,
            }),
            result => result,
        }
    }

    async fn update_backup_schedule(
        &self,
        scheduled_time: &str,
    ) -> Result<BackupSchedule, ApiError> {
        NaiveTime::parse_from_str(scheduled_time, "%H:%M").map_err(|_| {
            ApiError::invalid_input(format!("invalid time {scheduled_time:?}, expected HH:MM"))
        })?;
        self.fetch(ApiRequest::post(
            "/backup-config/schedule/",
            json!({ "scheduled_time": scheduled_time }),
        ))
        .await
    }

    // endregion

    // region classification rules

    async fn list_rule_sets(&self) -> Result<Vec<ClassificationRuleSet>, ApiError> {
        self.fetch_list(ApiRequest::get("/classification-rules/"))
            .await
    }

    async fn get_rule_set(&self, id: RuleSetId) -> Result<ClassificationRuleSet, ApiError> {
        self.fetch(ApiRequest::get(format!("/classification-rules/{id}/")))
            .await
    }

    async fn save_rule_set(
        &self,
        id: Option<RuleSetId>,
        input: &RuleSetInput,
    ) -> Result<ClassificationRuleSet, ApiError> {
        require(&input.name, "name")?;
        let request = match id {
            Some(id) => ApiRequest::put(format!("/classification-rules/{id}/"), body(input)?),
            None => ApiRequest::post("/classification-rules/", body(input)?),
        };
        self.fetch(request).await
    }

    async fn delete_rule_set(&self, id: RuleSetId) -> Result<(), ApiError> {
        self.discard(ApiRequest::delete(format!("/classification-rules/{id}/")))
            .await
    }

    // endregion

    async fn ping(&self, ip: &str) -> Result<PingOutcome, ApiError> {
        require(ip, "ip")?;
        match self
            .client
            .execute(ApiRequest::post("/ping/", json!({ "ip": ip })))
            .await
        {
            Ok(response) => Ok(ping_outcome(&response.body)),
            // Timeouts and invalid addresses come back as error statuses.
            Err(ApiError::Status { body, .. }) => Ok(ping_outcome(&body)),
            Err(error) => Err(error),
        }
    }
}
