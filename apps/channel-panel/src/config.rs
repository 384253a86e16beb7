use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_PATHS: [&str; 2] = ["/etc/channel-admin/panel.toml", "./panel.toml"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub listen_addr: IpAddr,
    pub listen_port: u16,
    /// Start with the demo discounts, audit trail, agents and branches.
    pub seed_demo: bool,
    pub admin: AdminConfig,
}

/// The single account accepted by the mock login. It is also the actor
/// recorded on audit entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
    pub otp: String,
    pub user_id: String,
    pub name: String,
    pub role: String,
    pub email: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            listen_addr: IpAddr::from([0, 0, 0, 0]),
            listen_port: 3000,
            seed_demo: true,
            admin: AdminConfig::default(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            otp: "123456".to_string(),
            user_id: "U001".to_string(),
            name: "Admin User".to_string(),
            role: "superadmin".to_string(),
            email: "admin@echannelling.lk".to_string(),
        }
    }
}

impl PanelConfig {
    /// Reads the first config file found (explicit path, then the system and
    /// working-directory defaults), falling back to environment variables.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        for path in CONFIG_PATHS {
            let path = PathBuf::from(path);
            if path.is_file() {
                return Self::from_file(&path);
            }
        }

        tracing::info!("Loading config from environment");
        Self::from_env(|key| std::env::var(key).ok())
    }

    fn from_file(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    fn from_env(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(addr) = var("PANEL_LISTEN_ADDR") {
            config.listen_addr = addr
                .parse()
                .with_context(|| format!("PANEL_LISTEN_ADDR is not an IP address: {addr}"))?;
        }
        if let Some(port) = var("PANEL_LISTEN_PORT") {
            config.listen_port = port
                .parse()
                .with_context(|| format!("PANEL_LISTEN_PORT is not a port: {port}"))?;
        }
        if let Some(seed) = var("PANEL_SEED_DEMO") {
            config.seed_demo = matches!(
                seed.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        let admin = &mut config.admin;
        for (key, field) in [
            ("ADMIN_USERNAME", &mut admin.username),
            ("ADMIN_PASSWORD", &mut admin.password),
            ("ADMIN_OTP", &mut admin.otp),
            ("ADMIN_NAME", &mut admin.name),
            ("ADMIN_EMAIL", &mut admin.email),
            ("ADMIN_USER_ID", &mut admin.user_id),
            ("ADMIN_ROLE", &mut admin.role),
        ] {
            if let Some(value) = var(key) {
                *field = value;
            }
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen_addr, self.listen_port)
    }
}
