//! Aladhan-compatible HTTP client.

use std::time::Duration;

use chrono::{Duration as ChronoDuration, NaiveDate, NaiveDateTime, NaiveTime};
use miqat_core::{CalendarDate, GeoCoordinate, MiqatError, Prayer, PrayerParams, PrayerTimes};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::NetworkConfig;
use crate::timetable::Timetable;

/// One day as reported by the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteDay {
    pub hijri: CalendarDate,
    pub times: PrayerTimes,
}

/// `GET /v1/timings/{DD-MM-YYYY}` response envelope.
#[derive(Debug, Deserialize)]
struct TimingsResponse {
    code: u16,
    #[serde(default)]
    status: String,
    data: Option<TimingsData>,
}

#[derive(Debug, Deserialize)]
struct TimingsData {
    timings: Timings,
    date: DateInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Timings {
    fajr: String,
    dhuhr: String,
    asr: String,
    maghrib: String,
    isha: String,
}

#[derive(Debug, Deserialize)]
struct DateInfo {
    hijri: HijriInfo,
}

#[derive(Debug, Deserialize)]
struct HijriInfo {
    day: String,
    month: HijriMonth,
    year: String,
}

#[derive(Debug, Deserialize)]
struct HijriMonth {
    number: usize,
}

/// Client for the remote prayer-time API.
#[derive(Debug, Clone)]
pub struct AladhanClient {
    http: reqwest::Client,
    config: NetworkConfig,
}

impl AladhanClient {
    /// # Errors
    /// Returns `NetworkError` if the HTTP client cannot be built.
    pub fn new(config: NetworkConfig) -> Result<Self, MiqatError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| MiqatError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Fetches the timings and Hijri date of a single day.
    ///
    /// # Errors
    /// `NetworkError` for transport failures and non-success statuses,
    /// `ParseError` for bodies that do not describe a valid day.
    #[instrument(skip(self), fields(source = "aladhan"))]
    pub async fn fetch_day(&self, coords: GeoCoordinate, date: NaiveDate) -> Result<RemoteDay, MiqatError> {
        let url = format!(
            "{}/v1/timings/{}",
            self.config.base_url.trim_end_matches('/'),
            date.format("%d-%m-%Y")
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("latitude", coords.lat.to_string()),
                ("longitude", coords.lng.to_string()),
                ("method", self.config.method.to_string()),
                ("school", self.config.school.to_string()),
            ])
            .send()
            .await
            .map_err(|e| MiqatError::NetworkError(format!("Timings request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, %date, "timings request rejected");
            return Err(MiqatError::NetworkError(format!("Timings request returned {}", status)));
        }

        let body: TimingsResponse = response
            .json()
            .await
            .map_err(|e| MiqatError::ParseError(format!("Failed to parse timings response: {}", e)))?;

        let day = parse_day(body, coords, date)?;
        debug!(hijri = %day.hijri, "fetched remote day");
        Ok(day)
    }

    /// Fetches `days` consecutive days starting at `start`.
    ///
    /// Requests are sequential; the first failure aborts the whole fetch.
    pub async fn fetch_timetable(&self, coords: GeoCoordinate, start: NaiveDate, days: u32) -> Result<Timetable, MiqatError> {
        let mut timetable = Timetable::new(coords);
        let mut date = start;
        for _ in 0..days {
            let day = self.fetch_day(coords, date).await?;
            timetable.insert(date, day);
            date = date
                .succ_opt()
                .ok_or_else(|| MiqatError::not_available(date))?;
        }
        Ok(timetable)
    }
}

fn parse_day(body: TimingsResponse, coords: GeoCoordinate, date: NaiveDate) -> Result<RemoteDay, MiqatError> {
    let data = match body.data {
        Some(data) if body.code == 200 => data,
        _ => {
            return Err(MiqatError::ParseError(format!(
                "API reported code {} ({})",
                body.code, body.status
            )))
        }
    };

    let hijri = parse_hijri(&data.date.hijri)?;

    let fajr = at(date, parse_clock(&data.timings.fajr)?);
    let dhuhr = at(date, parse_clock(&data.timings.dhuhr)?);
    let asr = at(date, parse_clock(&data.timings.asr)?);
    let maghrib = after(asr, at(date, parse_clock(&data.timings.maghrib)?));
    let isha = after(maghrib, at(date, parse_clock(&data.timings.isha)?));

    if !(fajr < dhuhr && dhuhr < asr) {
        return Err(MiqatError::ParseError(format!(
            "Timings out of order for {}: Fajr {}, Dhuhr {}, Asr {}",
            date, data.timings.fajr, data.timings.dhuhr, data.timings.asr
        )));
    }

    Ok(RemoteDay {
        hijri,
        times: PrayerTimes {
            date,
            coords,
            params: PrayerParams::mwl(),
            fajr,
            dhuhr,
            asr,
            maghrib,
            isha,
            clamped: Default::default(),
        },
    })
}

fn parse_hijri(info: &HijriInfo) -> Result<CalendarDate, MiqatError> {
    let day: usize = info
        .day
        .trim()
        .parse()
        .map_err(|_| MiqatError::ParseError(format!("Bad Hijri day '{}'", info.day)))?;
    let year: usize = info
        .year
        .trim()
        .parse()
        .map_err(|_| MiqatError::ParseError(format!("Bad Hijri year '{}'", info.year)))?;
    let month = info.month.number;
    if !(1..=30).contains(&day) || !(1..=12).contains(&month) || year == 0 {
        return Err(MiqatError::ParseError(format!(
            "Hijri date out of range: {}/{}/{}",
            day, month, year
        )));
    }
    Ok(CalendarDate::new(day, month, year))
}

/// Parses `"HH:MM"`, ignoring a trailing zone label such as `" (EET)"`.
fn parse_clock(raw: &str) -> Result<NaiveTime, MiqatError> {
    let bad = || MiqatError::ParseError(format!("Bad time '{}'", raw));
    let clock = raw.split_whitespace().next().ok_or_else(bad)?;
    NaiveTime::parse_from_str(clock, "%H:%M").map_err(|_| bad())
}

fn at(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// Evening prayers reported past midnight belong to the next civil day.
fn after(previous: NaiveDateTime, time: NaiveDateTime) -> NaiveDateTime {
    if time < previous {
        time + ChronoDuration::days(1)
    } else {
        time
    }
}

impl RemoteDay {
    pub fn get(&self, prayer: Prayer) -> NaiveDateTime {
        self.times.get(prayer)
    }
}
