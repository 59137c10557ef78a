use super::{collect_records, RateSource};
use crate::config::DatabaseConfig;
use crate::error::{RateSheetsError, Result};
use mysql_async::prelude::*;
use mysql_async::{Conn, Opts, OptsBuilder, Row};
use rate_sheets_common::{RateRecord, RawRateRecord, Zone};
use tracing::{debug, info};

/// ゾーンは数値列でも文字列として受け取る
const RATES_QUERY: &str = "SELECT client_id, locale, shipping_speed, CAST(zone AS CHAR) AS zone, \
     start_weight, end_weight, rate FROM `rates` WHERE `client_id` = ?";

/// MySQLの `rates` テーブルから読むデータソース
#[derive(Debug, Clone)]
pub struct MySqlRateSource {
    opts: Opts,
    host: String,
}

impl MySqlRateSource {
    pub fn new(config: &DatabaseConfig) -> Result<Self> {
        config.validate()?;

        let opts = OptsBuilder::default()
            .ip_or_hostname(config.host.clone())
            .tcp_port(config.port)
            .user(Some(config.user.clone()))
            .pass(config.password.clone())
            .db_name(Some(config.database.clone()));

        Ok(Self {
            opts: opts.into(),
            host: format!("{}:{}", config.host, config.port),
        })
    }
}

impl RateSource for MySqlRateSource {
    async fn fetch_rates(&self, client_id: i64) -> Result<Vec<RateRecord>> {
        info!(host = %self.host, client_id, "querying rates");

        let mut conn = Conn::new(self.opts.clone())
            .await
            .map_err(|e| unavailable(&self.host, e))?;
        let rows: Vec<Row> = conn
            .exec(RATES_QUERY, (client_id,))
            .await
            .map_err(|e| unavailable(&self.host, e))?;
        conn.disconnect()
            .await
            .map_err(|e| unavailable(&self.host, e))?;
        debug!(rows = rows.len(), "fetched rate rows");

        let raw = rows
            .into_iter()
            .map(raw_from_row)
            .collect::<Result<Vec<_>>>()?;
        Ok(collect_records(raw))
    }
}

fn unavailable(host: &str, err: mysql_async::Error) -> RateSheetsError {
    RateSheetsError::SourceUnavailable(format!("{}: {}", host, err))
}

fn raw_from_row(mut row: Row) -> Result<RawRateRecord> {
    Ok(RawRateRecord {
        client_id: take(&mut row, "client_id")?,
        locale: take(&mut row, "locale")?,
        shipping_speed: take(&mut row, "shipping_speed")?,
        zone: Zone::new(take::<String>(&mut row, "zone")?),
        start_weight: take(&mut row, "start_weight")?,
        end_weight: take(&mut row, "end_weight")?,
        rate: take(&mut row, "rate")?,
    })
}

fn take<T: FromValue>(row: &mut Row, column: &str) -> Result<T> {
    row.take_opt::<T, _>(column)
        .ok_or_else(|| RateSheetsError::SourceUnavailable(format!("列がありません: {}", column)))?
        .map_err(|e| {
            RateSheetsError::SourceUnavailable(format!("列 {} の値を変換できません: {:?}", column, e))
        })
}
