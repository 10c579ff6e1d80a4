use super::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// region auth

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: Option<AccessToken>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: Option<AccessToken>,
}

// endregion

// region users

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// endregion

// region devices

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupTracker {
    pub success_count: u32,
    pub no_change_count: u32,
    pub error_count: u32,
    #[serde(default)]
    pub last_status: Option<String>,
    #[serde(default)]
    pub last_attempt_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkDevice {
    pub id: DeviceId,
    pub hostname: String,
    #[serde(rename = "ipAddress")]
    pub ip_address: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<ManufacturerId>,
    #[serde(default)]
    pub manufacturer_name: Option<String>,
    #[serde(default, rename = "deviceType")]
    pub device_type: Option<DeviceTypeId>,
    #[serde(default)]
    pub device_type_name: Option<String>,
    #[serde(default)]
    pub area: Option<AreaId>,
    #[serde(default)]
    pub area_name: Option<String>,
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default, rename = "vaultCredential")]
    pub vault_credential: Option<VaultCredentialId>,
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub backup_tracker: Option<BackupTracker>,
}

/// Body for creating a device. A device uses either a vault credential or a
/// custom user/password pair; `vault_credential` is always sent, as `null` when
/// absent.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceInput {
    pub hostname: String,
    #[serde(rename = "ipAddress")]
    pub ip_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub manufacturer: ManufacturerId,
    #[serde(rename = "deviceType")]
    pub device_type: DeviceTypeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<AreaId>,
    #[serde(rename = "vaultCredential")]
    pub vault_credential: Option<VaultCredentialId>,
    #[serde(rename = "customUser", skip_serializing_if = "Option::is_none")]
    pub custom_user: Option<String>,
    #[serde(rename = "customPass", skip_serializing_if = "Option::is_none")]
    pub custom_pass: Option<String>,
}

/// Partial update; only the fields that are set go on the wire.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DevicePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(rename = "ipAddress", skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<ManufacturerId>,
    #[serde(rename = "deviceType", skip_serializing_if = "Option::is_none")]
    pub device_type: Option<DeviceTypeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<AreaId>,
    #[serde(rename = "vaultCredential", skip_serializing_if = "Option::is_none")]
    pub vault_credential: Option<VaultCredentialId>,
    #[serde(rename = "customUser", skip_serializing_if = "Option::is_none")]
    pub custom_user: Option<String>,
    #[serde(rename = "customPass", skip_serializing_if = "Option::is_none")]
    pub custom_pass: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: ManufacturerId,
    pub name: String,
    #[serde(default)]
    pub get_running_config: Option<String>,
    #[serde(default)]
    pub get_vlan_info: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceType {
    pub id: DeviceTypeId,
    pub name: String,
}

// endregion

// region vault credentials

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultCredential {
    pub id: VaultCredentialId,
    pub nick: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VaultCredentialInput {
    pub nick: String,
    pub username: String,
    pub password: String,
}

// endregion

// region backups

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupSummary {
    pub id: DeviceId,
    pub hostname: String,
    #[serde(rename = "ipAddress")]
    pub ip_address: String,
    #[serde(default, rename = "lastBackup")]
    pub last_backup: Option<DateTime<Utc>>,
    pub backup_id: BackupId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupEntry {
    pub id: BackupId,
    #[serde(rename = "backupTime")]
    pub backup_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backup {
    pub id: BackupId,
    pub device: DeviceId,
    #[serde(rename = "backupTime")]
    pub backup_time: DateTime<Utc>,
    #[serde(default, rename = "runningConfig")]
    pub running_config: String,
    #[serde(default, rename = "vlanBrief")]
    pub vlan_brief: String,
    #[serde(default)]
    pub checksum: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupComparison {
    pub success: bool,
    #[serde(default, rename = "backupDiffId")]
    pub backup_diff_id: Option<BackupDiffId>,
    #[serde(default)]
    pub changes: Value,
}

// endregion

// region locations

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountryInput {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    pub country: CountryId,
    #[serde(default)]
    pub country_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteInput {
    pub name: String,
    pub country: Option<CountryId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    pub name: String,
    pub site: SiteId,
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AreaInput {
    pub name: String,
    pub site: Option<SiteId>,
}

// endregion

// region schedule

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupSchedule {
    /// 24h `HH:MM`, or `None` when no schedule is configured.
    pub scheduled_time: Option<String>,
}

// endregion

// region classification

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRuleSet {
    pub id: RuleSetId,
    pub name: String,
    #[serde(default)]
    pub rules: Value,
    #[serde(default, rename = "vaultCredential")]
    pub vault_credential: Option<VaultCredentialId>,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleSetInput {
    pub name: String,
    pub rules: Value,
    #[serde(rename = "vaultCredential")]
    pub vault_credential: Option<VaultCredentialId>,
}

// endregion

// region ping

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PingOutcome {
    pub reachable: bool,
    pub message: String,
    pub details: Value,
}

// endregion
