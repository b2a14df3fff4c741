//! `GET /api/taxes/stats`
//!
//! Totals over every tax, overall and per year. The fold runs on the rayon
//! pool; each worker builds partial totals that are merged at the end.

use crate::auth::Caller;
use crate::db::{taxes, Database};
use crate::error::ApiError;
use actix_web::{web, HttpResponse};
use common::model::stats::{TaxStats, YearTaxStats};
use common::model::tax::Tax;
use common::requests::TaxQuery;
use rayon::prelude::*;
use std::collections::BTreeMap;

#[derive(Default)]
struct Partial {
    count: usize,
    amount: f64,
    paid: f64,
    paid_count: usize,
    years: BTreeMap<i32, YearTaxStats>,
}

impl Partial {
    fn add(mut self, tax: &Tax) -> Self {
        self.count += 1;
        self.amount += tax.amount;
        self.paid += tax.paid_amount;
        if tax.is_paid {
            self.paid_count += 1;
        }
        let year = self.years.entry(tax.year).or_insert_with(|| YearTaxStats {
            year: tax.year,
            ..YearTaxStats::default()
        });
        year.total += tax.amount;
        year.paid += tax.paid_amount;
        year.unpaid += tax.outstanding();
        year.count += 1;
        self
    }

    fn merge(mut self, other: Partial) -> Self {
        self.count += other.count;
        self.amount += other.amount;
        self.paid += other.paid;
        self.paid_count += other.paid_count;
        for (key, theirs) in other.years {
            let ours = self.years.entry(key).or_insert_with(|| YearTaxStats {
                year: key,
                ..YearTaxStats::default()
            });
            ours.total += theirs.total;
            ours.paid += theirs.paid;
            ours.unpaid += theirs.unpaid;
            ours.count += theirs.count;
        }
        self
    }
}

fn compute(all: &[Tax]) -> TaxStats {
    let totals = all
        .par_iter()
        .fold(Partial::default, Partial::add)
        .reduce(Partial::default, Partial::merge);

    TaxStats {
        total_taxes: totals.count,
        total_amount: totals.amount,
        total_paid: totals.paid,
        total_unpaid: totals.amount - totals.paid,
        paid_count: totals.paid_count,
        unpaid_count: totals.count - totals.paid_count,
        by_year: totals.years.into_values().rev().collect(),
    }
}

/// Actix web handler for the `GET /api/taxes/stats` endpoint.
///
/// Loads every tax, then folds them on the blocking pool.
///
/// # Returns
/// - `200 OK` with a `TaxStats` JSON object, `byYear` most recent first.
pub(crate) async fn process(
    _caller: Caller,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    let all = db.with_conn(|conn| Ok(taxes::list(conn, &TaxQuery::default())?))?;
    let stats = web::block(move || compute(&all))
        .await
        .map_err(|e| ApiError::Internal(format!("tax stats task failed: {}", e)))?;
    Ok(HttpResponse::Ok().json(stats))
}
