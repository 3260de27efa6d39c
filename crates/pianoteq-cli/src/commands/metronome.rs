//! Metronome control.

use anyhow::{Result, bail};
use pianoteq_client::MetronomeUpdate;

use super::Context;
use crate::ui;

/// Metronome arguments. With no changes the current state is shown.
#[derive(Debug, Clone, Default)]
pub struct MetronomeArgs {
    /// Turn the metronome on.
    pub enable: bool,
    /// Turn the metronome off.
    pub disable: bool,
    /// Tempo in beats per minute.
    pub bpm: Option<u32>,
    /// Click volume in dB.
    pub volume_db: Option<f64>,
    /// Time signature, e.g. `3/4`.
    pub timesig: Option<String>,
    /// Accent the first beat.
    pub accentuate: Option<bool>,
}

/// Show or change the metronome.
pub async fn run_metronome(ctx: &Context, args: MetronomeArgs) -> Result<()> {
    let update = build_update(args)?;
    if !update.is_empty() {
        ctx.client.set_metronome(&update).await?;
    }

    let metronome = ctx.client.get_metronome().await?;
    if ctx.json {
        return ui::json(&metronome);
    }

    ui::header("Metronome");
    ui::kv("Enabled", if metronome.enabled { "yes" } else { "no" });
    ui::kv("Tempo", &format!("{} bpm", metronome.bpm));
    ui::kv("Volume", &format!("{:.1} dB", metronome.volume_db));
    ui::kv("Time signature", &metronome.timesig);
    ui::kv("Accent", if metronome.accentuate { "yes" } else { "no" });
    Ok(())
}

fn build_update(args: MetronomeArgs) -> Result<MetronomeUpdate> {
    if args.enable && args.disable {
        bail!("--enable and --disable are mutually exclusive");
    }

    let mut update = MetronomeUpdate::new();
    if args.enable || args.disable {
        update = update.enabled(args.enable);
    }
    if let Some(bpm) = args.bpm {
        if bpm == 0 {
            bail!("Tempo must be positive");
        }
        update = update.bpm(bpm);
    }
    if let Some(volume_db) = args.volume_db {
        update = update.volume_db(volume_db);
    }
    if let Some(timesig) = args.timesig {
        validate_timesig(&timesig)?;
        update = update.timesig(timesig);
    }
    if let Some(accentuate) = args.accentuate {
        update = update.accentuate(accentuate);
    }
    Ok(update)
}

fn validate_timesig(timesig: &str) -> Result<()> {
    let valid = timesig
        .split_once('/')
        .is_some_and(|(beats, unit)| {
            beats.parse::<u32>().is_ok_and(|b| b > 0) && unit.parse::<u32>().is_ok_and(|u| u > 0)
        });
    if !valid {
        bail!("Invalid time signature '{timesig}', expected e.g. 4/4");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_flags_is_empty_update() {
        assert!(build_update(MetronomeArgs::default()).unwrap().is_empty());
    }

    #[test]
    fn test_sparse_update() {
        let update = build_update(MetronomeArgs {
            enable: true,
            bpm: Some(96),
            ..MetronomeArgs::default()
        })
        .unwrap();
        assert_eq!(update, MetronomeUpdate::new().enabled(true).bpm(96));
    }

    #[test]
    fn test_off_sends_disabled() {
        let update = build_update(MetronomeArgs {
            disable: true,
            ..MetronomeArgs::default()
        })
        .unwrap();
        assert_eq!(update.enabled, Some(false));
    }

    #[test]
    fn test_rejects_conflicts_and_bad_values() {
        let conflicting = MetronomeArgs {
            enable: true,
            disable: true,
            ..MetronomeArgs::default()
        };
        assert!(build_update(conflicting).is_err());

        let bad_sig = MetronomeArgs {
            timesig: Some("four".to_string()),
            ..MetronomeArgs::default()
        };
        assert!(build_update(bad_sig).is_err());

        let zero = MetronomeArgs {
            bpm: Some(0),
            ..MetronomeArgs::default()
        };
        assert!(build_update(zero).is_err());
    }
}
