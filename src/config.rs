use crate::error::{RateSheetsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CLIENT_ID: i64 = 1240;

/// DB接続設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 3306,
            user: String::new(),
            password: None,
            database: String::new(),
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("host", self.host.is_empty()),
            ("user", self.user.is_empty()),
            ("database", self.database.is_empty()),
        ]
        .into_iter()
        .filter(|(_, empty)| *empty)
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(RateSheetsError::Config(format!(
                "DB設定が不足しています: {}",
                missing.join(", ")
            )))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub output_dir: PathBuf,
    pub default_client_id: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            output_dir: PathBuf::from("output"),
            default_client_id: DEFAULT_CLIENT_ID,
        }
    }
}

impl Config {
    /// 設定ファイル + 環境変数から読み込み
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// 設定ファイルのみ読み込み（指定が無く既定パスにも無ければデフォルト）
    pub fn load_file(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(RateSheetsError::Config(format!(
                        "設定ファイルが見つかりません: {}",
                        p.display()
                    )));
                }
                p.to_path_buf()
            }
            None => match Self::config_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&config_path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("rate-sheets").join("config.json"))
    }

    /// 環境変数（DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_NAME）で上書き
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("DB_HOST") {
            self.database.host = host;
        }
        if let Some(port) = lookup("DB_PORT") {
            self.database.port = port
                .parse()
                .map_err(|_| RateSheetsError::Config(format!("DB_PORTが不正です: {}", port)))?;
        }
        if let Some(user) = lookup("DB_USER") {
            self.database.user = user;
        }
        if let Some(password) = lookup("DB_PASSWORD") {
            self.database.password = Some(password);
        }
        if let Some(name) = lookup("DB_NAME") {
            self.database.database = name;
        }
        Ok(())
    }

    /// パスワードを伏せた表示用の行
    pub fn display_lines(&self) -> Vec<String> {
        vec![
            format!("  DBホスト: {}:{}", self.database.host, self.database.port),
            format!("  DBユーザー: {}", self.database.user),
            format!(
                "  DBパスワード: {}",
                if self.database.password.is_some() { "設定済み" } else { "未設定" }
            ),
            format!("  DB名: {}", self.database.database),
            format!("  出力先: {}", self.output_dir.display()),
            format!("  既定クライアントID: {}", self.default_client_id),
        ]
    }
}
