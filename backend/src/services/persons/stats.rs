//! `GET /api/persons/stats`
//!
//! Dashboard counts over the whole registry, computed in memory from one
//! table scan.

use crate::auth::Caller;
use crate::db::{persons, Database};
use crate::error::ApiError;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Duration, Utc};
use common::model::person::{Gender, Person, ResidencyStatus};
use common::model::stats::{NationalityCount, PersonStats};
use std::collections::HashMap;

const TOP_NATIONALITIES: usize = 5;
const RECENT_DAYS: i64 = 30;

fn compute(all: &[Person], now: DateTime<Utc>) -> PersonStats {
    let mut stats = PersonStats {
        total_persons: all.len(),
        ..PersonStats::default()
    };
    let recent_since = now - Duration::days(RECENT_DAYS);
    let mut nationalities: HashMap<&str, usize> = HashMap::new();

    for person in all {
        if person.is_voter {
            stats.total_voters += 1;
        }
        match person.gender {
            Gender::M => stats.by_gender.male += 1,
            Gender::F => stats.by_gender.female += 1,
        }
        match person.status {
            ResidencyStatus::Actif => stats.by_status.actif += 1,
            ResidencyStatus::Demenager => stats.by_status.demenager += 1,
            ResidencyStatus::Decede => stats.by_status.decede += 1,
        }
        if person.created_at >= recent_since {
            stats.recent_registrations += 1;
        }
        *nationalities.entry(person.nationality.as_str()).or_default() += 1;
    }
    stats.total_non_voters = stats.total_persons - stats.total_voters;

    let mut ranked: Vec<NationalityCount> = nationalities
        .into_iter()
        .map(|(nationality, count)| NationalityCount {
            nationality: nationality.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.nationality.cmp(&b.nationality)));
    ranked.truncate(TOP_NATIONALITIES);
    stats.top_nationalities = ranked;

    stats
}

/// Actix web handler for the `GET /api/persons/stats` endpoint.
///
/// # Returns
/// - `200 OK` with a `PersonStats` JSON object.
pub(crate) async fn process(
    _caller: Caller,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    let all = db.with_conn(|conn| Ok(persons::list(conn)?))?;
    Ok(HttpResponse::Ok().json(compute(&all, Utc::now())))
}
