use super::ApiError;
use crate::domain_model::*;
use serde_json::Value;

/// Typed access to the backup service. Every call is authenticated and goes
/// through the session refresh protocol.
#[async_trait::async_trait]
pub trait NetbackApi: Send + Sync {
    // users
    async fn current_user(&self) -> Result<User, ApiError>;
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;
    async fn get_user(&self, id: UserId) -> Result<User, ApiError>;
    async fn create_user(&self, input: &UserInput) -> Result<User, ApiError>;
    async fn update_user(&self, id: UserId, input: &UserInput) -> Result<User, ApiError>;
    async fn delete_user(&self, id: UserId) -> Result<(), ApiError>;

    // devices
    async fn list_devices(&self) -> Result<Vec<NetworkDevice>, ApiError>;
    async fn get_device(&self, id: DeviceId) -> Result<NetworkDevice, ApiError>;
    async fn create_device(&self, input: &DeviceInput) -> Result<NetworkDevice, ApiError>;
    async fn update_device(
        &self,
        id: DeviceId,
        patch: &DevicePatch,
    ) -> Result<NetworkDevice, ApiError>;
    async fn delete_device(&self, id: DeviceId) -> Result<(), ApiError>;

    // vault credentials
    async fn list_vault_credentials(&self) -> Result<Vec<VaultCredential>, ApiError>;
    async fn create_vault_credential(
        &self,
        input: &VaultCredentialInput,
    ) -> Result<VaultCredential, ApiError>;
    async fn update_vault_credential(
        &self,
        id: VaultCredentialId,
        input: &VaultCredentialInput,
    ) -> Result<VaultCredential, ApiError>;
    async fn delete_vault_credential(&self, id: VaultCredentialId) -> Result<(), ApiError>;

    // catalog
    async fn list_manufacturers(&self) -> Result<Vec<Manufacturer>, ApiError>;
    async fn list_device_types(&self) -> Result<Vec<DeviceType>, ApiError>;

    // backups
    async fn create_backup(&self, device_id: DeviceId) -> Result<Value, ApiError>;
    async fn last_backups(&self) -> Result<Vec<BackupSummary>, ApiError>;
    async fn backup_history(&self, device_id: DeviceId) -> Result<Vec<BackupEntry>, ApiError>;
    async fn backup_details(&self, backup_id: BackupId) -> Result<Backup, ApiError>;
    async fn compare_backups(
        &self,
        old: BackupId,
        new: BackupId,
    ) -> Result<BackupComparison, ApiError>;
    async fn compare_last_backups(&self, device_id: DeviceId)
    -> Result<BackupComparison, ApiError>;

    // locations
    async fn list_countries(&self) -> Result<Vec<Country>, ApiError>;
    async fn create_country(&self, input: &CountryInput) -> Result<Country, ApiError>;
    async fn list_sites(&self, country: Option<CountryId>) -> Result<Vec<Site>, ApiError>;
    async fn create_site(&self, input: &SiteInput) -> Result<Site, ApiError>;
    async fn list_areas(
        &self,
        site: Option<SiteId>,
        country: Option<CountryId>,
    ) -> Result<Vec<Area>, ApiError>;
    async fn create_area(&self, input: &AreaInput) -> Result<Area, ApiError>;

    // schedule
    async fn backup_schedule(&self) -> Result<BackupSchedule, ApiError>;
    async fn update_backup_schedule(&self, scheduled_time: &str)
    -> Result<BackupSchedule, ApiError>;

    // classification rules
    async fn list_rule_sets(&self) -> Result<Vec<ClassificationRuleSet>, ApiError>;
    async fn get_rule_set(&self, id: RuleSetId) -> Result<ClassificationRuleSet, ApiError>;
    async fn save_rule_set(
        &self,
        id: Option<RuleSetId>,
        input: &RuleSetInput,
    ) -> Result<ClassificationRuleSet, ApiError>;
    async fn delete_rule_set(&self, id: RuleSetId) -> Result<(), ApiError>;

    // diagnostics
    async fn ping(&self, ip: &str) -> Result<PingOutcome, ApiError>;
}
