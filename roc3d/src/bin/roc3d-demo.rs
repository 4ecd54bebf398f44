//! Compare a clean detector with one that adds a saturated false alarm.
//!
//! The clean map should score better; plain 3D-ROC SNPR prefers the noisy
//! one, the adaptive top-cut variant does not.

use std::process::ExitCode;

use flexi_logger::Logger;
use roc3d::{evaluate_detectors, Roc3dConfig};
use roc3d_core::{Result, Summarizable};

const SIDE: usize = 20;

fn block(values: &mut [f64], rows: usize, cols: usize, value: f64) {
    for r in 0..rows {
        for c in 0..cols {
            values[r * SIDE + c] = value;
        }
    }
}

fn run() -> Result<()> {
    let mut gt = vec![0.0; SIDE * SIDE];
    block(&mut gt, 5, 5, 1.0);

    let mut clean = vec![0.0; SIDE * SIDE];
    block(&mut clean, 5, 3, 10.0);

    let mut stray = clean.clone();
    stray[10 * SIDE + 10] = 100.0;

    for (title, topcut) in [
        ("3D-ROC metrics (Chang 2021). Eg1 should be better than Eg2.", false),
        ("Adaptive 3D-ROC metrics (Li et al. 2023).", true),
    ] {
        println!("{title}");
        let config = Roc3dConfig::default().with_adaptive_topcut(topcut);
        let results = evaluate_detectors(&gt, &[clean.as_slice(), stray.as_slice()], &config)?;
        for (i, result) in results.iter().enumerate() {
            println!("Eg{} {}", i + 1, result.summary.summary());
            log::debug!("Eg{}: {}, top-cut limit {:?}", i + 1, result.summary(), result.topcut_limit);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let _logger = match Logger::try_with_env_or_str("info").and_then(|logger| logger.start()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("failed to start logger: {e}");
            None
        }
    };
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
