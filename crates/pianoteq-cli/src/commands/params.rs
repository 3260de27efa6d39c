//! Parameter inspection and editing.

use anyhow::{Result, bail};
use pianoteq_client::{ParameterInfo, ParameterUpdate};

use super::Context;
use crate::ui;

/// Parameter listing arguments.
#[derive(Debug, Clone, Default)]
pub struct ParamsArgs {
    /// Case-insensitive substring matched against id and name.
    pub filter: Option<String>,
    /// Only parameters in this group.
    pub group: Option<String>,
}

/// List parameters.
pub async fn run_params(ctx: &Context, args: ParamsArgs) -> Result<()> {
    let params: Vec<ParameterInfo> = ctx
        .client
        .get_parameters()
        .await?
        .into_iter()
        .filter(|p| {
            args.group.as_deref().is_none_or(|g| {
                p.group
                    .as_deref()
                    .is_some_and(|pg| pg.eq_ignore_ascii_case(g))
            })
        })
        .filter(|p| {
            args.filter.as_deref().is_none_or(|f| {
                let f = f.to_lowercase();
                p.id.to_lowercase().contains(&f) || p.name.to_lowercase().contains(&f)
            })
        })
        .collect();

    if ctx.json {
        return ui::json(&params);
    }

    ui::header("Parameters");
    ui::table_header(&[("Id", 28), ("Name", 32), ("Norm", 8), ("Value", 0)]);
    for param in &params {
        let norm = format!("{:.3}", param.normalized_value);
        ui::table_row(&[
            (param.id.as_str(), 28),
            (param.name.as_str(), 32),
            (norm.as_str(), 8),
            (param.display_value().as_str(), 0),
        ]);
    }
    Ok(())
}

/// Set one parameter. Numbers are normalized values, anything else is text.
pub async fn run_set_param(ctx: &Context, id: &str, value: &str) -> Result<()> {
    let update = parse_update(id, value)?;
    ctx.client.set_parameters(std::slice::from_ref(&update)).await?;
    ui::success(&format!("Set {id} = {value}"));
    Ok(())
}

/// Randomize parameters.
pub async fn run_randomize(ctx: &Context, amount: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&amount) {
        bail!("Amount must be between 0 and 1, got {amount}");
    }
    ctx.client.randomize_parameters(amount).await?;
    ui::success(&format!("Randomized parameters by {amount}"));
    Ok(())
}

fn parse_update(id: &str, value: &str) -> Result<ParameterUpdate> {
    match value.trim().parse::<f64>() {
        Ok(v) if (0.0..=1.0).contains(&v) => Ok(ParameterUpdate::normalized(id, v)),
        Ok(v) => bail!("Normalized value must be between 0 and 1, got {v}"),
        Err(_) => Ok(ParameterUpdate::text(id, value)),
    }
}
