//! Response normalization into the weather display model.

use super::api::{ConditionDto, CurrentResponse, ForecastEntry, ForecastResponse};
use super::{WeatherError, WeatherResult};
use crate::model::weather::{Condition, CurrentConditions, DailyForecast, WeatherReport};
use chrono::DateTime;

/// Samples per day in a 3-hour forecast series.
pub const SAMPLES_PER_DAY: usize = 8;
pub const FORECAST_DAYS: usize = 5;

/// Keeps every 8th sample, starting with the first, up to 5 days.
pub fn downsample(entries: &[ForecastEntry]) -> Vec<&ForecastEntry> {
    entries
        .iter()
        .step_by(SAMPLES_PER_DAY)
        .take(FORECAST_DAYS)
        .collect()
}

/// Builds the flat display model from both endpoint responses.
pub fn normalize_report(
    current: &CurrentResponse,
    forecast: &ForecastResponse,
) -> WeatherResult<WeatherReport> {
    let condition = current
        .weather
        .first()
        .ok_or(WeatherError::Incomplete("current conditions carry no weather entry"))?;

    let days = downsample(&forecast.list)
        .into_iter()
        .map(daily_forecast)
        .collect::<WeatherResult<Vec<_>>>()?;

    Ok(WeatherReport {
        city: current.name.clone(),
        country: current.sys.country.clone(),
        current: CurrentConditions {
            temp: round_half_up(current.main.temp),
            humidity: current.main.humidity,
            wind_speed: current.wind.speed,
            condition: to_condition(condition),
        },
        forecast: days,
    })
}

fn daily_forecast(entry: &ForecastEntry) -> WeatherResult<DailyForecast> {
    let condition = entry
        .weather
        .first()
        .ok_or(WeatherError::Incomplete("forecast entry carries no weather entry"))?;
    let date = DateTime::from_timestamp(entry.dt, 0)
        .ok_or(WeatherError::Incomplete("forecast timestamp out of range"))?
        .format("%a")
        .to_string();

    Ok(DailyForecast {
        date,
        min: round_half_up(entry.main.temp_min),
        max: round_half_up(entry.main.temp_max),
        main: condition.main.clone(),
        icon: condition.icon.clone(),
    })
}

fn to_condition(dto: &ConditionDto) -> Condition {
    Condition {
        main: dto.main.clone(),
        description: dto.description.clone(),
        icon: dto.icon.clone(),
    }
}

/// Rounds halves toward positive infinity (`-2.5 -> -2`, `2.5 -> 3`).
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::{downsample, normalize_report, round_half_up};
    use crate::weather::api::{
        ConditionDto, CurrentMain, CurrentResponse, ForecastEntry, ForecastMain,
        ForecastResponse, Sys, Wind,
    };

    fn condition() -> ConditionDto {
        ConditionDto {
            main: "Clouds".to_string(),
            description: "broken clouds".to_string(),
            icon: "04d".to_string(),
        }
    }

    fn series(len: usize) -> Vec<ForecastEntry> {
        // 2024-01-01T00:00:00Z was a Monday.
        (0..len)
            .map(|index| ForecastEntry {
                dt: 1_704_067_200 + (index as i64) * 3 * 3600,
                main: ForecastMain {
                    temp_min: index as f64,
                    temp_max: index as f64 + 0.5,
                },
                weather: vec![condition()],
            })
            .collect()
    }

    #[test]
    fn downsample_takes_every_eighth_entry_capped_at_five() {
        assert_eq!(downsample(&series(40)).len(), 5);
        assert_eq!(downsample(&series(48)).len(), 5);
        assert_eq!(downsample(&series(16)).len(), 2);
        assert_eq!(downsample(&series(17)).len(), 3);
        assert!(downsample(&series(0)).is_empty());

        let full = series(40);
        let picked = downsample(&full);
        let picked_dts: Vec<i64> = picked.iter().map(|entry| entry.dt).collect();
        let expected: Vec<i64> = [0, 8, 16, 24, 32].iter().map(|i| full[*i].dt).collect();
        assert_eq!(picked_dts, expected);
    }

    #[test]
    fn normalize_rounds_and_labels_days() {
        let current = CurrentResponse {
            name: "Lisbon".to_string(),
            sys: Sys {
                country: "PT".to_string(),
            },
            main: CurrentMain {
                temp: 18.5,
                humidity: 71,
            },
            wind: Wind { speed: 4.1 },
            weather: vec![condition()],
        };
        let forecast = ForecastResponse { list: series(40) };

        let report = normalize_report(&current, &forecast).expect("complete response");
        assert_eq!(report.city, "Lisbon");
        assert_eq!(report.current.temp, 19);
        assert_eq!(report.current.condition.description, "broken clouds");
        assert_eq!(report.forecast.len(), 5);
        assert_eq!(report.forecast[0].date, "Mon");
        assert_eq!(report.forecast[1].date, "Tue");
        assert_eq!(report.forecast[1].min, 8);
        assert_eq!(report.forecast[1].max, 9);
    }

    #[test]
    fn normalize_rejects_missing_condition() {
        let current = CurrentResponse {
            name: "Nowhere".to_string(),
            sys: Sys {
                country: String::new(),
            },
            main: CurrentMain {
                temp: 1.0,
                humidity: 1,
            },
            wind: Wind { speed: 0.0 },
            weather: Vec::new(),
        };
        let forecast = ForecastResponse { list: Vec::new() };
        assert!(normalize_report(&current, &forecast).is_err());
    }

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
    }
}
