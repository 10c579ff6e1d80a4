use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! resource_id {
    ($($name:ident),+ $(,)?) => {$(
        #[derive(
            Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub uuid::Uuid);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::from_str(s).map($name)
            }
        }
    )+};
}

resource_id!(
    UserId,
    DeviceId,
    BackupId,
    BackupDiffId,
    VaultCredentialId,
    ManufacturerId,
    DeviceTypeId,
    CountryId,
    SiteId,
    AreaId,
    RuleSetId,
);
