// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Credentials sent with each `/calendar` request, read from the `[client.auth]`
/// table with a `type` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "type")]
pub enum AuthMethod {
    /// The service is open; no `Authorization` header.
    #[serde(rename = "none")]
    #[default]
    None,
    /// `type = "basic"`, sent as HTTP basic credentials.
    #[serde(rename = "basic")]
    Basic {
        /// Account name on the event service.
        username: String,
        /// Sent in clear text inside the header; use HTTPS.
        password: String,
    },
    /// `type = "bearer"`, sent as `Authorization: Bearer <token>`.
    #[serde(rename = "bearer")]
    Bearer {
        /// Opaque token issued by the event service.
        token: String,
    },
}

/// Where the calendar endpoint lives and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ClientConfig {
    /// Origin that `/calendar` is resolved against, e.g. `http://localhost:3000`.
    pub base_url: String,
    /// Omitted means [`AuthMethod::None`].
    #[serde(default)]
    pub auth: AuthMethod,
    /// Applies to both the event fetch and event creation, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Defaults to `calboard-client/<version>`.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("calboard-client/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            auth: AuthMethod::default(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
