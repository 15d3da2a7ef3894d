use anyhow::{Context, Result};
use crates::domain::value_objects::payments::BankQrAccount;

use super::{
    config_model::{Database, DotEnvyConfig, Server, Session},
    stage::Stage,
};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: required("SERVER_PORT")?
            .parse()
            .context("SERVER_PORT is invalid")?,
        body_limit: required("SERVER_BODY_LIMIT")?
            .parse()
            .context("SERVER_BODY_LIMIT is invalid")?,
        timeout: required("SERVER_TIMEOUT")?
            .parse()
            .context("SERVER_TIMEOUT is invalid")?,
    };

    let database = Database {
        url: required("DATABASE_URL")?,
        max_connections: match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .context("DATABASE_MAX_CONNECTIONS is invalid")?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        },
    };

    let session = Session {
        jwt_secret: required("SESSION_JWT_SECRET")?,
    };

    let bank_qr = BankQrAccount {
        bank_id: std::env::var("BANK_QR_BANK_ID").unwrap_or_else(|_| "970422".to_string()),
        account_no: std::env::var("BANK_QR_ACCOUNT_NO")
            .unwrap_or_else(|_| "0123456789".to_string()),
        account_name: std::env::var("BANK_QR_ACCOUNT_NAME")
            .unwrap_or_else(|_| "RESTAURANT".to_string()),
    };

    Ok(DotEnvyConfig {
        server,
        database,
        session,
        bank_qr,
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or_default();
    Stage::try_from(&stage_str).unwrap_or_default()
}

pub fn get_session_secret() -> Result<String> {
    dotenvy::dotenv().ok();

    required("SESSION_JWT_SECRET")
}

fn required(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("{key} is invalid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_parses_aliases_and_defaults_to_local() {
        assert_eq!(Stage::try_from("prod").unwrap(), Stage::Production);
        assert_eq!(Stage::try_from(" Development ").unwrap(), Stage::Development);
        assert!(Stage::try_from("staging").is_err());
        assert_eq!(Stage::try_from("").unwrap_or_default(), Stage::Local);
    }
}
