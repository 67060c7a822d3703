//! Backfills missing rating, revenue and genre cells from OMDb.

use crate::domain::model::{EnrichColumns, OmdbResponse, Row, Value};
use crate::domain::ports::MovieLookup;
use crate::utils::error::EdaError;

/// OMDb's "no data" placeholder.
const UNAVAILABLE: &str = "N/A";

/// True when at least one target column is missing in `row`.
pub fn needs_lookup(row: &Row, columns: &EnrichColumns) -> bool {
    columns.targets.iter().any(|column| row.is_missing(column))
}

/// Fills the row's missing target columns with one OMDb lookup by title.
///
/// Never fails: a not-found title, a non-success status, a transport error or
/// an undecodable body are logged and the row comes back with those cells
/// still missing. A row with nothing missing is returned without a request.
pub async fn fill_from_omdb<L: MovieLookup>(
    mut row: Row,
    lookup: &L,
    columns: &EnrichColumns,
) -> Row {
    if !needs_lookup(&row, columns) {
        return row;
    }

    let title = match row.get(&columns.title) {
        Value::Text(t) if !t.trim().is_empty() => t.clone(),
        v if !v.is_missing() && !matches!(v, Value::Text(_)) => v.to_string(),
        _ => {
            tracing::warn!("Row has missing values but no '{}' to look up", columns.title);
            return row;
        }
    };

    match lookup.lookup(&title).await {
        Ok(data) if data.is_found() => apply_response(&mut row, &title, &data, columns),
        Ok(data) => {
            tracing::info!(
                "Not found in OMDb: {} ({})",
                title,
                data.error.as_deref().unwrap_or("no match")
            );
        }
        Err(EdaError::HttpStatusError { status }) => {
            tracing::warn!("API error for {}: {}", title, status);
        }
        Err(e) => {
            tracing::warn!("OMDb lookup failed for {}: {}", title, e);
        }
    }

    row
}

fn available(field: Option<&str>) -> Option<&str> {
    field
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != UNAVAILABLE)
}

fn should_fill(row: &Row, column: &str, columns: &EnrichColumns) -> bool {
    columns.is_target(column) && row.is_missing(column)
}

fn fill(row: &mut Row, title: &str, column: &str, value: Value) {
    tracing::info!("{} -> {}: {}", title, column, value);
    row.set(column, value);
}

fn apply_response(row: &mut Row, title: &str, data: &OmdbResponse, columns: &EnrichColumns) {
    if should_fill(row, &columns.rating, columns) {
        if let Some(rating) = available(data.imdb_rating.as_deref()) {
            let value = rating
                .parse::<f64>()
                .map(Value::Float)
                .unwrap_or_else(|_| Value::from(rating));
            fill(row, title, &columns.rating, value);
        }
    }

    if should_fill(row, &columns.revenue, columns) {
        if let Some(revenue) = available(data.box_office.as_deref()) {
            fill(row, title, &columns.revenue, Value::from(revenue));
        }
    }

    if should_fill(row, &columns.genre, columns) {
        // 只保留第一個類型
        let first_genre = available(data.genre.as_deref())
            .and_then(|genres| genres.split(',').next())
            .map(str::trim)
            .filter(|g| !g.is_empty());
        if let Some(genre) = first_genre {
            fill(row, title, &columns.genre, Value::from(genre));
        }
    }
}
