use anyhow::Context;
use axum::extract::{Form, Path, State};
use axum::response::{Html, Redirect};

use super::error::AppError;
use super::form::ExpenseForm;
use super::AppState;
use crate::chart;
use crate::store;

/// Run ledger I/O off the async executor.
async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f)
        .await
        .context("Ledger task did not complete")?;
    Ok(result?)
}

/// `GET /`: form, table and charts.
pub(crate) async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let ledger = state.store.clone();
    let (records, charts) = blocking(move || {
        let records = ledger.load()?;
        let charts = chart::dashboard_charts(&records)?;
        Ok((records, charts))
    })
    .await?;

    tracing::debug!(records = records.len(), charts = charts.len(), "rendering dashboard");
    let html = state.pages.dashboard(&records, &charts)?;
    Ok(Html(html))
}

/// `POST /`: validate, append, persist, then send the browser back to `/`.
pub(crate) async fn add_expense(
    State(state): State<AppState>,
    Form(form): Form<ExpenseForm>,
) -> Result<Redirect, AppError> {
    let new = form.validate()?;

    let ledger = state.store.clone();
    let (id, expense) = blocking(move || {
        let mut records = ledger.load()?;
        let id = store::insert(&mut records, new)?;
        ledger.save(&records)?;
        Ok((id, records.last().cloned()))
    })
    .await?;

    if let Some(e) = expense {
        tracing::info!(id, category = %e.category, amount = %e.amount, "expense added");
    }
    Ok(Redirect::to("/"))
}

/// `GET /delete/{id}`: remove the record if present. Unknown IDs are not an
/// error; the ledger is rewritten either way.
pub(crate) async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let ledger = state.store.clone();
    let removed = blocking(move || {
        let mut records = ledger.load()?;
        let removed = store::delete(&mut records, id);
        ledger.save(&records)?;
        Ok(removed)
    })
    .await?;

    if removed {
        tracing::info!(id, "expense deleted");
    } else {
        tracing::debug!(id, "delete of unknown expense ignored");
    }
    Ok(Redirect::to("/"))
}
