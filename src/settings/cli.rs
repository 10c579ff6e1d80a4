use super::{Parser, Subcommand};
use crate::domain_model::{BackupId, DeviceId};

#[derive(Parser, Debug)]
#[command(name = "netback", about = "Operator console for the netback backup service")]
pub struct Cli {
    #[arg(long)]
    pub settings: Option<String>,

    #[arg(long, short)]
    pub username: String,

    #[arg(long, env = "NETBACK_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the logged-in user
    Me,
    /// List network devices
    Devices,
    /// Show a single network device
    Device { id: DeviceId },
    /// List the backup history of a device
    Backups { device_id: DeviceId },
    /// List the most recent backup of every device
    LastBackups,
    /// Compare two backups of the same device
    Compare { old: BackupId, new: BackupId },
    /// Show the automatic backup schedule
    Schedule,
    /// Check reachability of an address from the backend
    Ping { ip: String },
    /// List classification rule sets
    RuleSets,
}
